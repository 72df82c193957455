//! The view collaborator: what the session reads from and writes to the UI.
//!
//! DESIGN
//! ======
//! The session never touches the DOM. It talks to a `View`, and `ViewState`
//! is the plain-data implementation that both tests and the Leptos panel
//! (through a signal) use.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use crate::state::chat::ConnectionStatus;
use crate::util::render::RenderedMessage;

/// UI surface driven by the chat session.
pub trait View {
    fn username_input(&self) -> String;
    fn message_input(&self) -> String;
    fn private_receiver_input(&self) -> String;
    fn private_message_input(&self) -> String;

    fn set_message_input(&mut self, value: String);

    fn clear_message_input(&mut self) {
        self.set_message_input(String::new());
    }

    /// Clears only the private message; the receiver is kept for repeated sends.
    fn clear_private_message_input(&mut self);

    /// Append a rendered node to the message list. Its text is inserted as
    /// text, never parsed as markup.
    fn append_message(&mut self, message: RenderedMessage);

    fn clear_messages(&mut self);

    /// Toggle controls and chat area for the new status.
    fn set_connection_status(&mut self, status: ConnectionStatus);

    /// Blocking user notification.
    fn show_error(&mut self, message: &str);

    /// Show the emoji overlay with `glyphs`, or hide it with `None`.
    fn set_emoji_picker(&mut self, glyphs: Option<Vec<String>>);
}

/// Plain-data view: input values, rendered nodes, the current notice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub username: String,
    pub message: String,
    pub private_receiver: String,
    pub private_message: String,
    pub messages: Vec<RenderedMessage>,
    pub status: ConnectionStatus,
    /// Latest notification shown to the user; each one replaces the last.
    pub notice: Option<String>,
    pub emoji_picker: Option<Vec<String>>,
}

impl ViewState {
    #[must_use]
    pub fn connect_enabled(&self) -> bool {
        self.status == ConnectionStatus::Disconnected
    }

    /// Disconnect also cancels an attempt that is still in flight.
    #[must_use]
    pub fn disconnect_enabled(&self) -> bool {
        self.status != ConnectionStatus::Disconnected
    }

    #[must_use]
    pub fn chat_area_visible(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    /// Most recent notice, if any.
    #[must_use]
    pub fn last_notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

impl View for ViewState {
    fn username_input(&self) -> String {
        self.username.clone()
    }

    fn message_input(&self) -> String {
        self.message.clone()
    }

    fn private_receiver_input(&self) -> String {
        self.private_receiver.clone()
    }

    fn private_message_input(&self) -> String {
        self.private_message.clone()
    }

    fn set_message_input(&mut self, value: String) {
        self.message = value;
    }

    fn clear_private_message_input(&mut self) {
        self.private_message.clear();
    }

    fn append_message(&mut self, message: RenderedMessage) {
        self.messages.push(message);
    }

    fn clear_messages(&mut self) {
        self.messages.clear();
    }

    fn set_connection_status(&mut self, status: ConnectionStatus) {
        self.status = status;
    }

    fn show_error(&mut self, message: &str) {
        self.notice = Some(message.to_owned());
    }

    fn set_emoji_picker(&mut self, glyphs: Option<Vec<String>>) {
        self.emoji_picker = glyphs;
    }
}

/// Rendered messages of `view`; downstream readers rerun only when the
/// list itself changes, not on input edits.
#[cfg(feature = "csr")]
#[must_use]
pub fn message_list(view: leptos::prelude::RwSignal<ViewState>) -> leptos::prelude::Memo<Vec<RenderedMessage>> {
    use leptos::prelude::With;
    leptos::prelude::Memo::new(move |_| view.with(|v| v.messages.clone()))
}

/// Number of rendered messages in `view`.
#[cfg(feature = "csr")]
#[must_use]
pub fn message_count(view: leptos::prelude::RwSignal<ViewState>) -> leptos::prelude::Memo<usize> {
    use leptos::prelude::With;
    leptos::prelude::Memo::new(move |_| view.with(|v| v.messages.len()))
}

/// Browser view: a `ViewState` signal read by the chat panel, plus a
/// `window.alert` for notices.
#[cfg(feature = "csr")]
impl View for leptos::prelude::RwSignal<ViewState> {
    fn username_input(&self) -> String {
        use leptos::prelude::WithUntracked;
        self.with_untracked(|v| v.username.clone())
    }

    fn message_input(&self) -> String {
        use leptos::prelude::WithUntracked;
        self.with_untracked(|v| v.message.clone())
    }

    fn private_receiver_input(&self) -> String {
        use leptos::prelude::WithUntracked;
        self.with_untracked(|v| v.private_receiver.clone())
    }

    fn private_message_input(&self) -> String {
        use leptos::prelude::WithUntracked;
        self.with_untracked(|v| v.private_message.clone())
    }

    fn set_message_input(&mut self, value: String) {
        use leptos::prelude::Update;
        self.update(|v| v.set_message_input(value));
    }

    fn clear_private_message_input(&mut self) {
        use leptos::prelude::Update;
        self.update(ViewState::clear_private_message_input);
    }

    fn append_message(&mut self, message: RenderedMessage) {
        use leptos::prelude::Update;
        self.update(|v| v.append_message(message));
    }

    fn clear_messages(&mut self) {
        use leptos::prelude::Update;
        self.update(ViewState::clear_messages);
    }

    fn set_connection_status(&mut self, status: ConnectionStatus) {
        use leptos::prelude::Update;
        self.update(|v| v.set_connection_status(status));
    }

    fn show_error(&mut self, message: &str) {
        use leptos::prelude::Update;
        self.update(|v| v.show_error(message));
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.alert_with_message(message) {
                log::warn!("alert failed: {err:?}");
            }
        }
    }

    fn set_emoji_picker(&mut self, glyphs: Option<Vec<String>>) {
        use leptos::prelude::Update;
        self.update(|v| v.set_emoji_picker(glyphs));
    }
}
