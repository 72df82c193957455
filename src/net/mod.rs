//! Networking: wire schema, the channel abstraction, the session that drives
//! it, and the STOMP-over-WebSocket channel used in the browser.

pub mod channel;
pub mod session;
pub mod stomp_channel;
pub mod types;
