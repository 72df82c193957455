//! Message rendering: style selection and display labels.
//!
//! DESIGN
//! ======
//! Style selection is an exhaustive `match` over `MessageType`, so adding a
//! message kind fails to compile until it is given a style. Rendered text is
//! plain text; views insert it as text nodes, never as markup.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::net::types::{ChatMessage, MessageType};

/// Visual treatment of a rendered message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageStyle {
    Chat,
    Join,
    Leave,
    System,
    Action,
    Error,
    /// Private message addressed to the current user.
    IncomingPrivate,
    /// Private message sent by the current user.
    OutgoingPrivate,
}

impl MessageStyle {
    /// CSS class applied to the message node.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Chat => "chat-message",
            Self::Join => "join-message",
            Self::Leave => "leave-message",
            Self::System => "system-message",
            Self::Action => "action-message",
            Self::Error => "error-message",
            Self::IncomingPrivate => "incoming-private",
            Self::OutgoingPrivate => "outgoing-private",
        }
    }
}

/// A message node ready for the view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedMessage {
    pub style: MessageStyle,
    /// Bold prefix: the sender, or a private-direction label.
    pub label: String,
    pub content: String,
}

/// Style for a message delivered on the public topic.
#[must_use]
pub fn public_style(kind: MessageType) -> MessageStyle {
    match kind {
        MessageType::Join => MessageStyle::Join,
        MessageType::Leave => MessageStyle::Leave,
        MessageType::System => MessageStyle::System,
        MessageType::Action => MessageStyle::Action,
        MessageType::Error => MessageStyle::Error,
        // A PRIVATE kind never belongs on the broadcast topic; show it as plain chat.
        MessageType::Chat | MessageType::Private => MessageStyle::Chat,
    }
}

/// Render a message received on the public topic.
#[must_use]
pub fn render_public(message: &ChatMessage) -> RenderedMessage {
    RenderedMessage {
        style: public_style(message.kind()),
        label: message.sender().to_owned(),
        content: message.content().to_owned(),
    }
}

/// Render a message received on the private queue.
///
/// Messages whose sender is `username` are the broker's echo of our own
/// sends and render as outgoing.
#[must_use]
pub fn render_private(message: &ChatMessage, username: Option<&str>) -> RenderedMessage {
    let outgoing = username.is_some_and(|name| name == message.sender());
    let (style, label) = if outgoing {
        let label = match message.receiver() {
            Some(receiver) => format!("You → {receiver}"),
            None => "You".to_owned(),
        };
        (MessageStyle::OutgoingPrivate, label)
    } else {
        (MessageStyle::IncomingPrivate, format!("Private from {}", message.sender()))
    };
    RenderedMessage { style, label, content: message.content().to_owned() }
}
