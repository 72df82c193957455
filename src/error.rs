//! Error types surfaced by the chat session.
//!
//! ERROR HANDLING
//! ==============
//! `Validation`, `Connection` and `Server` errors are shown to the user and
//! returned to the caller; they never change session state on their own.
//! `Protocol` errors come from malformed inbound payloads and are only logged.

/// Failure of a chat session operation.
///
/// `Display` yields the text shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// Empty username, receiver or message content.
    #[error("{0}")]
    Validation(String),
    /// The channel could not be opened, or dropped while connected.
    #[error("Connection error: {0}")]
    Connection(String),
    /// Error payload pushed by the broker on the error queue.
    #[error("{0}")]
    Server(String),
    /// Inbound payload did not match the message schema.
    #[error("malformed payload: {0}")]
    Protocol(#[from] ProtocolError),
}

impl ChatError {
    /// Whether this error is meant to be shown to the user.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::Protocol(_))
    }
}

/// Inbound payload decode failure.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Not JSON, or JSON not shaped like a chat message.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}
