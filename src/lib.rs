//! # webchat
//!
//! Browser chat widget speaking STOMP to a message broker.
//!
//! The `ChatSession` in [`net::session`] holds all behavior: connection
//! lifecycle, validation, publishing, inbound routing and the bounded
//! history. It talks to the outside world only through the [`net::channel::Channel`]
//! and [`state::view::View`] traits, so it runs natively under test. The
//! `csr` feature adds the WebSocket channel and the Leptos UI that mount it
//! in a page.

pub mod config;
pub mod error;
pub mod net;
pub mod state;
pub mod util;

#[cfg(feature = "csr")]
pub mod app;
#[cfg(feature = "csr")]
pub mod components;

/// WASM entry point: install panic and log hooks, then mount the widget.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("logger already installed: {err}");
    }
    leptos::mount::mount_to_body(app::App);
}
