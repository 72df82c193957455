//! Chat session: connection lifecycle, outbound publishing, UI bindings.
//!
//! The `ChatSession` mediates between user input (through a `View`) and the
//! broker (through a `Channel`). It is constructed once per page with both
//! collaborators injected, and is driven from two directions: UI handlers
//! call the methods here, and the transport feeds `ChannelEvent`s into
//! `handle_channel_event` (see `session_inbound`).
//!
//! LIFECYCLE
//! =========
//! `Disconnected --connect--> Connecting --Connected--> Connected`
//! `Connecting --ConnectFailed / disconnect--> Disconnected`
//! `Connected --disconnect / Closed--> Disconnected`
//!
//! Each connect mints a fresh `ConnectAttempt`; completions for any other
//! attempt, or for a cancelled one, are ignored.

#[path = "session_inbound.rs"]
mod session_inbound;

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::config::ChatConfig;
use crate::error::ChatError;
use crate::net::channel::{AttemptId, Channel, ConnectAttempt, Headers};
use crate::net::types::{ChatMessage, encode_message};
use crate::state::chat::{ConnectionStatus, MessageHistory, SessionState};
use crate::state::view::View;
use crate::util::html::escape_html;

pub const EMPTY_USERNAME_MESSAGE: &str = "Username cannot be empty";
pub const MISSING_PRIVATE_FIELDS_MESSAGE: &str = "Enter a receiver and a message";
pub const CONNECTION_LOST_MESSAGE: &str = "connection lost";
/// Sender of notices the client publishes on its own behalf.
pub const SYSTEM_SENDER: &str = "SYSTEM";
pub const JOIN_CONTENT: &str = "joined the chat";

/// Which configured destination an outbound message goes to.
#[derive(Clone, Copy, Debug)]
enum Outbound {
    AddUser,
    SendMessage,
    Private,
}

/// One user's chat session.
pub struct ChatSession<C, V> {
    config: ChatConfig,
    channel: C,
    view: V,
    state: SessionState,
    /// Attempt that is in flight or that produced the live connection.
    attempt: Option<ConnectAttempt>,
    /// Username waiting for its connect attempt to complete.
    pending_username: Option<String>,
    next_attempt: u64,
}

impl<C: Channel, V: View> ChatSession<C, V> {
    pub fn new(config: ChatConfig, channel: C, mut view: V) -> Self {
        view.set_connection_status(ConnectionStatus::Disconnected);
        let state = SessionState::new(config.history_capacity);
        Self { config, channel, view, state, attempt: None, pending_username: None, next_attempt: 0 }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> ConnectionStatus {
        self.state.status
    }

    /// Active username; set only while connected.
    pub fn username(&self) -> Option<&str> {
        self.state.username.as_deref()
    }

    pub fn history(&self) -> &MessageHistory {
        &self.state.history
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Id of the attempt that is in flight or connected.
    pub fn current_attempt(&self) -> Option<AttemptId> {
        self.attempt.as_ref().map(ConnectAttempt::id)
    }

    /// Start connecting as `username_input` (trimmed).
    ///
    /// The session moves to `Connecting`; it becomes `Connected` when the
    /// channel reports the attempt ready. Ignored while already connecting
    /// or connected.
    ///
    /// # Errors
    ///
    /// [`ChatError::Validation`] when the trimmed username is empty; the
    /// error is also shown to the user and no state changes.
    pub fn connect(&mut self, username_input: &str) -> Result<(), ChatError> {
        let username = username_input.trim();
        if username.is_empty() {
            return Err(self.surface(ChatError::Validation(EMPTY_USERNAME_MESSAGE.to_owned())));
        }
        if self.state.status != ConnectionStatus::Disconnected {
            log::debug!("connect ignored while {:?}", self.state.status);
            return Ok(());
        }

        let attempt = ConnectAttempt::new(AttemptId(self.next_attempt));
        self.next_attempt += 1;
        log::info!("connecting as {username} (attempt {})", attempt.id().0);

        self.pending_username = Some(username.to_owned());
        self.attempt = Some(attempt.clone());
        self.set_status(ConnectionStatus::Connecting);
        self.channel.open(attempt, &self.config.connect_headers);
        Ok(())
    }

    /// Leave the chat.
    ///
    /// Connected: publishes a LEAVE notice, closes the channel, clears history
    /// and rendered messages. Connecting: cancels the attempt and closes the
    /// channel without publishing. Disconnected: no-op.
    pub fn disconnect(&mut self) {
        match self.state.status {
            ConnectionStatus::Disconnected => {}
            ConnectionStatus::Connecting => {
                log::info!("cancelling connect attempt {:?}", self.current_attempt());
                self.cancel_attempt();
                self.channel.close();
                self.set_status(ConnectionStatus::Disconnected);
            }
            ConnectionStatus::Connected => {
                if let Some(username) = self.state.username.clone() {
                    log::info!("{username} leaving");
                    let leave = ChatMessage::leave(SYSTEM_SENDER, format!("{username} left the chat"));
                    self.publish(Outbound::SendMessage, &leave);
                }
                self.channel.close();
                self.teardown();
            }
        }
    }

    /// Publish a public CHAT line.
    ///
    /// No-op when the trimmed content is empty or nobody is connected. The
    /// content is HTML-escaped and the message input cleared without waiting
    /// for delivery.
    pub fn send_message(&mut self, raw_content: &str) {
        let content = raw_content.trim();
        if content.is_empty() {
            return;
        }
        let Some(username) = self.state.username.clone() else {
            log::debug!("send ignored: not connected");
            return;
        };
        let message = ChatMessage::chat(username, escape_html(content));
        self.publish(Outbound::SendMessage, &message);
        self.view.clear_message_input();
    }

    /// Publish a PRIVATE message to `raw_receiver`.
    ///
    /// Clears the private message input but keeps the receiver.
    ///
    /// # Errors
    ///
    /// [`ChatError::Validation`] when either trimmed field is empty; the
    /// error is also shown to the user and nothing is published.
    pub fn send_private_message(&mut self, raw_receiver: &str, raw_content: &str) -> Result<(), ChatError> {
        let receiver = raw_receiver.trim();
        let content = raw_content.trim();
        if receiver.is_empty() || content.is_empty() {
            return Err(self.surface(ChatError::Validation(MISSING_PRIVATE_FIELDS_MESSAGE.to_owned())));
        }
        let Some(username) = self.state.username.clone() else {
            log::debug!("private send ignored: not connected");
            return Ok(());
        };
        let message = ChatMessage::private(username, receiver, escape_html(content))
            .map_err(|err| self.surface(ChatError::Validation(err.to_string())))?;
        self.publish(Outbound::Private, &message);
        self.view.clear_private_message_input();
        Ok(())
    }

    /// Connect button: connect with the username field.
    ///
    /// # Errors
    ///
    /// See [`ChatSession::connect`].
    pub fn on_connect_clicked(&mut self) -> Result<(), ChatError> {
        let input = self.view.username_input();
        self.connect(&input)
    }

    /// Send button (or Enter) in the message input.
    pub fn on_send_clicked(&mut self) {
        let input = self.view.message_input();
        self.send_message(&input);
    }

    /// Send button (or Enter) in the private message input.
    ///
    /// # Errors
    ///
    /// See [`ChatSession::send_private_message`].
    pub fn on_send_private_clicked(&mut self) -> Result<(), ChatError> {
        let receiver = self.view.private_receiver_input();
        let content = self.view.private_message_input();
        self.send_private_message(&receiver, &content)
    }

    pub fn on_emoji_picker_clicked(&mut self) {
        self.view.set_emoji_picker(Some(self.config.emoji.clone()));
    }

    /// Append `glyph` to the message input and close the picker.
    pub fn on_emoji_selected(&mut self, glyph: &str) {
        let mut text = self.view.message_input();
        text.push_str(glyph);
        self.view.set_message_input(text);
        self.view.set_emoji_picker(None);
    }

    fn publish(&mut self, outbound: Outbound, message: &ChatMessage) {
        let destination = match outbound {
            Outbound::AddUser => &self.config.destinations.add_user,
            Outbound::SendMessage => &self.config.destinations.send_message,
            Outbound::Private => &self.config.destinations.private,
        };
        let body = encode_message(message);
        log::debug!("publish {:?} to {destination}", message.kind());
        self.channel.send(destination, &Headers::new(), &body);
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        self.state.status = status;
        self.view.set_connection_status(status);
    }

    fn cancel_attempt(&mut self) {
        if let Some(attempt) = self.attempt.take() {
            attempt.cancel();
        }
        self.pending_username = None;
    }

    /// Back to a fresh disconnected state; history is session-scoped.
    fn teardown(&mut self) {
        self.cancel_attempt();
        self.state.reset();
        self.view.clear_messages();
        self.view.set_connection_status(ConnectionStatus::Disconnected);
    }

    /// Show `err` to the user and hand it back for returning.
    fn surface(&mut self, err: ChatError) -> ChatError {
        self.view.show_error(&err.to_string());
        err
    }
}
