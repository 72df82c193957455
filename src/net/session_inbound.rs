//! Channel event handling extracted from `session`.
//!
//! Inbound payloads are routed by subscription id: the broadcast topic and
//! the private queue render into the message list and history, the error
//! queue surfaces a notice. Malformed payloads are logged and returned as
//! `ProtocolError`; they never reach history or the view.

use super::ChatSession;
use crate::error::ChatError;
use crate::net::channel::{AttemptId, Channel, ChannelEvent, SubscriptionId};
use crate::net::types::{ChatMessage, decode_error_payload, decode_message};
use crate::state::chat::{ConnectionStatus, Route, Subscription};
use crate::state::view::View;
use crate::util::render::{RenderedMessage, render_private, render_public};

impl<C: Channel, V: View> ChatSession<C, V> {
    /// Apply a completion reported by the channel.
    ///
    /// # Errors
    ///
    /// [`ChatError::Connection`] when the live attempt fails or its
    /// connection drops, [`ChatError::Server`] for error-queue payloads, and
    /// [`ChatError::Protocol`] for malformed payloads. Stale events are
    /// ignored and return `Ok`.
    pub fn handle_channel_event(&mut self, event: ChannelEvent) -> Result<(), ChatError> {
        match event {
            ChannelEvent::Connected { attempt } => {
                self.on_channel_ready(attempt);
                Ok(())
            }
            ChannelEvent::ConnectFailed { attempt, reason } => self.on_connect_failed(attempt, reason),
            ChannelEvent::Message { subscription, body } => self.on_subscription_message(subscription, &body),
            ChannelEvent::Closed { attempt, reason } => self.on_closed(attempt, reason),
        }
    }

    /// Payload from the broadcast topic.
    ///
    /// # Errors
    ///
    /// [`ChatError::Protocol`] when `raw` is not a valid chat message.
    pub fn on_public_message(&mut self, raw: &str) -> Result<(), ChatError> {
        let message = decode_inbound(raw)?;
        let node = render_public(&message);
        self.record(message, node);
        Ok(())
    }

    /// Payload from the private queue; our own sends come back here too.
    ///
    /// # Errors
    ///
    /// [`ChatError::Protocol`] when `raw` is not a valid chat message.
    pub fn on_private_message(&mut self, raw: &str) -> Result<(), ChatError> {
        let message = decode_inbound(raw)?;
        let node = render_private(&message, self.state.username.as_deref());
        self.record(message, node);
        Ok(())
    }

    /// Payload from the error queue: shown to the user, state untouched.
    ///
    /// # Errors
    ///
    /// [`ChatError::Server`] carrying the payload content, or
    /// [`ChatError::Protocol`] when the payload has no content.
    pub fn on_error_message(&mut self, raw: &str) -> Result<(), ChatError> {
        let payload = decode_error_payload(raw).map_err(|err| {
            log::warn!("dropping malformed error payload: {err}");
            ChatError::from(err)
        })?;
        log::warn!("server error: {}", payload.content);
        Err(self.surface(ChatError::Server(payload.content)))
    }

    fn is_live(&self, attempt: AttemptId) -> bool {
        self.attempt
            .as_ref()
            .is_some_and(|live| live.id() == attempt && !live.is_cancelled())
    }

    fn on_channel_ready(&mut self, attempt: AttemptId) {
        if self.state.status != ConnectionStatus::Connecting || !self.is_live(attempt) {
            log::info!("ignoring stale connect completion for attempt {}", attempt.0);
            return;
        }
        let Some(username) = self.pending_username.take() else {
            log::warn!("connect completed without a pending username");
            return;
        };

        let topics = [
            (Route::Public, self.config.topics.public.clone()),
            (Route::Private, self.config.topics.private.clone()),
            (Route::Errors, self.config.topics.errors.clone()),
        ];
        let mut subscriptions = Vec::with_capacity(topics.len());
        for (route, topic) in topics {
            let id = self.channel.subscribe(&topic);
            log::debug!("subscribed {id} to {topic}");
            subscriptions.push(Subscription { id, route });
        }
        self.state.subscriptions = subscriptions;
        self.state.username = Some(username.clone());
        self.set_status(ConnectionStatus::Connected);
        log::info!("connected as {username}");

        let join = ChatMessage::join(username, super::JOIN_CONTENT);
        self.publish(super::Outbound::AddUser, &join);
    }

    fn on_connect_failed(&mut self, attempt: AttemptId, reason: String) -> Result<(), ChatError> {
        if self.state.status != ConnectionStatus::Connecting || !self.is_live(attempt) {
            log::debug!("ignoring stale connect failure for attempt {}: {reason}", attempt.0);
            return Ok(());
        }
        log::warn!("connect failed: {reason}");
        self.cancel_attempt();
        self.set_status(ConnectionStatus::Disconnected);
        Err(self.surface(ChatError::Connection(reason)))
    }

    fn on_closed(&mut self, attempt: AttemptId, reason: Option<String>) -> Result<(), ChatError> {
        if !self.is_live(attempt) {
            return Ok(());
        }
        let reason = reason.unwrap_or_else(|| super::CONNECTION_LOST_MESSAGE.to_owned());
        match self.state.status {
            ConnectionStatus::Disconnected => Ok(()),
            ConnectionStatus::Connecting => self.on_connect_failed(attempt, reason),
            ConnectionStatus::Connected => {
                log::warn!("connection dropped: {reason}");
                self.channel.close();
                self.teardown();
                Err(self.surface(ChatError::Connection(reason)))
            }
        }
    }

    fn on_subscription_message(&mut self, subscription: SubscriptionId, body: &str) -> Result<(), ChatError> {
        match self.state.route_for(subscription) {
            Some(Route::Public) => self.on_public_message(body),
            Some(Route::Private) => self.on_private_message(body),
            Some(Route::Errors) => self.on_error_message(body),
            None => {
                log::debug!("dropping message for unknown subscription {subscription}");
                Ok(())
            }
        }
    }

    fn record(&mut self, message: ChatMessage, node: RenderedMessage) {
        self.state.history.push(message);
        self.view.append_message(node);
    }
}

fn decode_inbound(raw: &str) -> Result<ChatMessage, ChatError> {
    decode_message(raw).map_err(|err| {
        log::warn!("dropping malformed chat payload: {err}");
        ChatError::from(err)
    })
}
