//! The channel collaborator: a publish/subscribe transport to the broker.
//!
//! SYSTEM CONTEXT
//! ==============
//! A `Channel` starts work and reports completion later. Every completion is
//! a `ChannelEvent` handed back to the session, tagged with the connect
//! attempt or subscription it belongs to, so completions from a connection
//! the user has already abandoned can be recognized and dropped.

#[cfg(test)]
#[path = "channel_test.rs"]
mod channel_test;

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Extra headers sent with CONNECT or SEND frames.
pub type Headers = BTreeMap<String, String>;

/// Identifies one connect attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AttemptId(pub u64);

/// Identifies one subscription on the channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

impl SubscriptionId {
    /// Parse the `sub-<n>` form produced by `Display`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.strip_prefix("sub-")?.parse() {
            Ok(n) => Some(Self(n)),
            Err(_) => None,
        }
    }
}

/// Cancellation token for an in-flight connect.
///
/// Clones share the flag: the session keeps one, the channel another.
#[derive(Clone, Debug)]
pub struct ConnectAttempt {
    id: AttemptId,
    cancelled: Rc<Cell<bool>>,
}

impl ConnectAttempt {
    #[must_use]
    pub fn new(id: AttemptId) -> Self {
        Self { id, cancelled: Rc::new(Cell::new(false)) }
    }

    #[must_use]
    pub fn id(&self) -> AttemptId {
        self.id
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Asynchronous completion reported by a channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChannelEvent {
    /// The broker accepted the connection.
    Connected { attempt: AttemptId },
    /// The connection could not be established.
    ConnectFailed { attempt: AttemptId, reason: String },
    /// A payload arrived on a subscription.
    Message { subscription: SubscriptionId, body: String },
    /// An established connection went away.
    Closed { attempt: AttemptId, reason: Option<String> },
}

/// Publish/subscribe transport.
///
/// Calls never block; outcomes come back as [`ChannelEvent`]s.
pub trait Channel {
    /// Start connecting. Completion is reported as `Connected` or
    /// `ConnectFailed` for `attempt.id()`.
    fn open(&mut self, attempt: ConnectAttempt, headers: &Headers);

    /// Close the current connection, if any.
    fn close(&mut self);

    /// Subscribe to `topic`; its payloads arrive as `Message` events.
    fn subscribe(&mut self, topic: &str) -> SubscriptionId;

    /// Publish `body` to `destination`. Fire-and-forget.
    fn send(&mut self, destination: &str, headers: &Headers, body: &str);
}

impl<C: Channel + ?Sized> Channel for Box<C> {
    fn open(&mut self, attempt: ConnectAttempt, headers: &Headers) {
        (**self).open(attempt, headers);
    }

    fn close(&mut self) {
        (**self).close();
    }

    fn subscribe(&mut self, topic: &str) -> SubscriptionId {
        (**self).subscribe(topic)
    }

    fn send(&mut self, destination: &str, headers: &Headers, body: &str) {
        (**self).send(destination, headers, body);
    }
}
