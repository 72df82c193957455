use super::*;
use crate::util::render::MessageStyle;

// =============================================================
// Presentation flags
// =============================================================

#[test]
fn disconnected_view_enables_connect_only() {
    let view = ViewState::default();
    assert!(view.connect_enabled());
    assert!(!view.disconnect_enabled());
    assert!(!view.chat_area_visible());
}

#[test]
fn connecting_view_allows_cancel_but_hides_chat() {
    let mut view = ViewState::default();
    view.set_connection_status(ConnectionStatus::Connecting);
    assert!(!view.connect_enabled());
    assert!(view.disconnect_enabled());
    assert!(!view.chat_area_visible());
}

#[test]
fn connected_view_shows_chat_area() {
    let mut view = ViewState::default();
    view.set_connection_status(ConnectionStatus::Connected);
    assert!(!view.connect_enabled());
    assert!(view.disconnect_enabled());
    assert!(view.chat_area_visible());
}

// =============================================================
// View impl
// =============================================================

#[test]
fn clear_private_message_keeps_receiver() {
    let mut view = ViewState {
        private_receiver: "bob".to_owned(),
        private_message: "psst".to_owned(),
        ..ViewState::default()
    };
    view.clear_private_message_input();
    assert_eq!(view.private_receiver_input(), "bob");
    assert!(view.private_message_input().is_empty());
}

#[test]
fn clear_message_input_default_method_empties_field() {
    let mut view = ViewState { message: "draft".to_owned(), ..ViewState::default() };
    view.clear_message_input();
    assert!(view.message_input().is_empty());
}

#[test]
fn append_and_clear_messages() {
    let mut view = ViewState::default();
    view.append_message(RenderedMessage {
        style: MessageStyle::Chat,
        label: "alice".to_owned(),
        content: "hi".to_owned(),
    });
    assert_eq!(view.messages.len(), 1);
    view.clear_messages();
    assert!(view.messages.is_empty());
}

#[test]
fn show_error_keeps_only_the_latest_notice() {
    let mut view = ViewState::default();
    assert_eq!(view.last_notice(), None);

    for n in 0..1000 {
        view.show_error(&format!("error {n}"));
    }
    assert_eq!(view.last_notice(), Some("error 999"));
    assert_eq!(view.notice.as_deref(), Some("error 999"));
}

// =============================================================
// Reactive message list
// =============================================================

#[cfg(feature = "csr")]
mod reactive {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use leptos::prelude::*;

    use crate::state::view::{View, ViewState, message_count, message_list};
    use crate::util::render::{MessageStyle, RenderedMessage};

    #[test]
    fn input_edits_leave_the_message_list_alone() {
        let view = RwSignal::new(ViewState::default());
        let list = message_list(view);
        let count = message_count(view);
        let renders = Arc::new(AtomicUsize::new(0));
        let rendered = {
            let renders = Arc::clone(&renders);
            Memo::new(move |_| {
                renders.fetch_add(1, Ordering::SeqCst);
                list.with(Vec::len)
            })
        };
        assert_eq!(rendered.get(), 0);
        assert_eq!(renders.load(Ordering::SeqCst), 1);

        view.update(|v| v.message = "typing".to_owned());
        view.update(|v| v.private_receiver = "bob".to_owned());
        assert_eq!(rendered.get(), 0);
        assert_eq!(count.get(), 0);
        assert_eq!(renders.load(Ordering::SeqCst), 1);

        let mut handle = view;
        handle.append_message(RenderedMessage {
            style: MessageStyle::Chat,
            label: "alice".to_owned(),
            content: "hi".to_owned(),
        });
        assert_eq!(rendered.get(), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(renders.load(Ordering::SeqCst), 2);
    }
}
