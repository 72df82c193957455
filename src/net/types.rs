//! Chat wire schema shared with the broker.
//!
//! DESIGN
//! ======
//! Payloads are decoded through a raw wire struct and validated on the way in,
//! so a `ChatMessage` value always satisfies "receiver iff PRIVATE". Anything
//! else becomes a `ProtocolError` instead of a half-built message.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Kind of chat message, serialized in upper case (`"CHAT"`, `"JOIN"`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageType {
    /// Ordinary public chat line.
    Chat,
    /// A user joined.
    Join,
    /// A user left.
    Leave,
    /// Direct message between two users.
    Private,
    /// Notice generated by the system.
    System,
    /// `/me`-style action line.
    Action,
    /// Error notice from the broker (`sender` is `"SERVER"`).
    Error,
}

/// Shape violation found while building or decoding a [`ChatMessage`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("PRIVATE message requires a receiver")]
    MissingReceiver,
    #[error("{0:?} message must not carry a receiver")]
    UnexpectedReceiver(MessageType),
}

/// An immutable chat message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireMessage", into = "WireMessage")]
pub struct ChatMessage {
    sender: String,
    content: String,
    kind: MessageType,
    receiver: Option<String>,
}

impl ChatMessage {
    /// Build a message, enforcing that `receiver` is present iff `kind` is
    /// [`MessageType::Private`].
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError`] when the receiver does not match the kind.
    pub fn new(
        kind: MessageType,
        sender: impl Into<String>,
        content: impl Into<String>,
        receiver: Option<String>,
    ) -> Result<Self, ShapeError> {
        let receiver = receiver.filter(|r| !r.trim().is_empty());
        match (kind, &receiver) {
            (MessageType::Private, None) => return Err(ShapeError::MissingReceiver),
            (MessageType::Private, Some(_)) | (_, None) => {}
            (other, Some(_)) => return Err(ShapeError::UnexpectedReceiver(other)),
        }
        Ok(Self { sender: sender.into(), content: content.into(), kind, receiver })
    }

    /// Public CHAT line.
    #[must_use]
    pub fn chat(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self { sender: sender.into(), content: content.into(), kind: MessageType::Chat, receiver: None }
    }

    /// JOIN announcement for `sender`.
    #[must_use]
    pub fn join(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self { sender: sender.into(), content: content.into(), kind: MessageType::Join, receiver: None }
    }

    /// LEAVE notice.
    #[must_use]
    pub fn leave(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self { sender: sender.into(), content: content.into(), kind: MessageType::Leave, receiver: None }
    }

    /// PRIVATE message from `sender` to `receiver`.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::MissingReceiver`] when `receiver` is blank.
    pub fn private(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, ShapeError> {
        Self::new(MessageType::Private, sender, content, Some(receiver.into()))
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn kind(&self) -> MessageType {
        self.kind
    }

    /// Addressee; only set on PRIVATE messages.
    pub fn receiver(&self) -> Option<&str> {
        self.receiver.as_deref()
    }
}

/// Error payload pushed on the per-user error queue.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub sender: Option<String>,
    pub content: String,
}

/// Decode an inbound chat message body.
///
/// # Errors
///
/// Returns [`ProtocolError::Decode`] for invalid JSON, missing fields, an
/// unknown `type`, or a receiver that does not match the type.
pub fn decode_message(raw: &str) -> Result<ChatMessage, ProtocolError> {
    Ok(serde_json::from_str(raw)?)
}

/// Decode an inbound error-queue body.
///
/// # Errors
///
/// Returns [`ProtocolError::Decode`] when the body is not JSON or lacks `content`.
pub fn decode_error_payload(raw: &str) -> Result<ErrorPayload, ProtocolError> {
    Ok(serde_json::from_str(raw)?)
}

/// Encode a message as its JSON wire body.
#[must_use]
pub fn encode_message(message: &ChatMessage) -> String {
    match serde_json::to_string(message) {
        Ok(body) => body,
        Err(err) => {
            log::warn!("failed to encode {:?} message: {err}", message.kind);
            String::new()
        }
    }
}

#[derive(Serialize, Deserialize)]
struct WireMessage {
    sender: String,
    content: String,
    #[serde(rename = "type")]
    kind: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    receiver: Option<String>,
}

impl TryFrom<WireMessage> for ChatMessage {
    type Error = ShapeError;

    fn try_from(wire: WireMessage) -> Result<Self, Self::Error> {
        ChatMessage::new(wire.kind, wire.sender, wire.content, wire.receiver)
    }
}

impl From<ChatMessage> for WireMessage {
    fn from(message: ChatMessage) -> Self {
        Self {
            sender: message.sender,
            content: message.content,
            kind: message.kind,
            receiver: message.receiver,
        }
    }
}
