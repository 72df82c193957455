//! Leptos UI components.

pub mod chat_panel;
pub mod emoji_picker;
