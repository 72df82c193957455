//! Client-side state modules.
//!
//! DESIGN
//! ======
//! `chat` holds what the session owns; `view` holds what the user sees. The
//! two are kept apart so the session logic runs without a browser.

pub mod chat;
pub mod view;
