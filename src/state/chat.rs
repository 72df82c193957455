//! Chat session state: connection status, live subscriptions, bounded history.
//!
//! DESIGN
//! ======
//! History is session-scoped and bounded so a long-running page cannot grow
//! without limit; the oldest message is evicted first.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use std::collections::VecDeque;

use crate::net::channel::SubscriptionId;
use crate::net::types::ChatMessage;

/// Default number of messages retained in [`MessageHistory`].
pub const HISTORY_CAPACITY: usize = 100;

/// Connection lifecycle as seen by the user.
///
/// `Connecting` is the in-flight part of the disconnected state: the user has
/// asked to connect and the channel has not reported back yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Which inbound handler a subscription feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Broadcast topic.
    Public,
    /// Per-user private queue.
    Private,
    /// Per-user error queue.
    Errors,
}

/// A live channel subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub route: Route,
}

/// FIFO message buffer that never holds more than its capacity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageHistory {
    entries: VecDeque<ChatMessage>,
    capacity: usize,
}

impl Default for MessageHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl MessageHistory {
    /// Empty history holding at most `capacity` messages (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    /// Append a message, returning the evicted oldest one when full.
    pub fn push(&mut self, message: ChatMessage) -> Option<ChatMessage> {
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(message);
        evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Messages oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.entries.iter()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&ChatMessage> {
        self.entries.back()
    }
}

/// Mutable state owned by one chat session.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    /// Set only while connected.
    pub username: Option<String>,
    pub status: ConnectionStatus,
    pub subscriptions: Vec<Subscription>,
    pub history: MessageHistory,
}

impl SessionState {
    /// Fresh disconnected state with the given history capacity.
    #[must_use]
    pub fn new(history_capacity: usize) -> Self {
        Self { history: MessageHistory::with_capacity(history_capacity), ..Self::default() }
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    /// Route for an inbound subscription id, if it belongs to this session.
    #[must_use]
    pub fn route_for(&self, id: SubscriptionId) -> Option<Route> {
        self.subscriptions
            .iter()
            .find(|sub| sub.id == id)
            .map(|sub| sub.route)
    }

    /// Connected implies a non-empty username and a live subscription for
    /// every route; disconnected implies neither.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if self.history.len() > self.history.capacity() {
            return false;
        }
        if !self.is_connected() {
            return self.username.is_none() && self.subscriptions.is_empty();
        }
        let named = self.username.as_deref().is_some_and(|name| !name.trim().is_empty());
        let routed = [Route::Public, Route::Private, Route::Errors]
            .iter()
            .all(|route| self.subscriptions.iter().any(|sub| sub.route == *route));
        named && routed
    }

    /// Drop everything tied to the current connection.
    pub fn reset(&mut self) {
        self.username = None;
        self.status = ConnectionStatus::Disconnected;
        self.subscriptions.clear();
        self.history.clear();
    }
}
