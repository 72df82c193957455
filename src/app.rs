//! Root component: builds the session and pumps channel events into it.

use leptos::prelude::*;

use crate::components::chat_panel::ChatPanel;
use crate::config::ChatConfig;
use crate::error::ChatError;
use crate::net::channel::ChannelEvent;
use crate::net::session::ChatSession;
use crate::net::stomp_channel::StompChannel;
use crate::state::view::ViewState;

/// The session as wired in the browser.
pub type BrowserSession = ChatSession<StompChannel, RwSignal<ViewState>>;

/// Copyable handle to the page's single session, provided as context.
#[derive(Clone, Copy)]
pub struct SessionHandle(StoredValue<BrowserSession, LocalStorage>);

impl SessionHandle {
    /// Run a fallible session operation. Errors were already shown to the
    /// user where that applies; here they are only logged.
    pub fn run(self, op: impl FnOnce(&mut BrowserSession) -> Result<(), ChatError>) {
        self.0.update_value(|session| {
            if let Err(err) = op(session) {
                log::debug!("session operation failed: {err}");
            }
        });
    }

    pub fn update(self, op: impl FnOnce(&mut BrowserSession)) {
        self.0.update_value(op);
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    let config = ChatConfig::from_document();
    let view_state = RwSignal::new(ViewState::default());

    let (events_tx, mut events_rx) = futures::channel::mpsc::unbounded::<ChannelEvent>();
    let channel = StompChannel::new(config.endpoint.clone(), events_tx);
    let session = SessionHandle(StoredValue::new_local(ChatSession::new(config, channel, view_state)));

    // Completions arrive here in order; stale ones are dropped by the session.
    leptos::task::spawn_local(async move {
        use futures::StreamExt;
        while let Some(event) = events_rx.next().await {
            session.run(|s| s.handle_channel_event(event));
        }
    });

    provide_context(view_state);
    provide_context(session);

    view! { <ChatPanel/> }
}
