//! Pure helpers shared by the session and the UI components.

pub mod html;
pub mod render;
