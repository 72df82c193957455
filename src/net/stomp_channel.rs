//! STOMP-over-WebSocket implementation of [`Channel`].
//!
//! Each `open` spawns one connection task. Outbound frames go through an
//! unbounded queue to the task's write half; inbound frames are translated
//! into [`ChannelEvent`]s and pushed to the session's event queue. A task
//! whose attempt was cancelled stops reporting.
//!
//! Socket plumbing is gated behind `#[cfg(feature = "csr")]`; frame
//! translation and URL building are plain functions so they test natively.

#[cfg(test)]
#[path = "stomp_channel_test.rs"]
mod stomp_channel_test;

use stomp::{CodecError, Command, Frame, decode_frame, is_heartbeat};

use crate::net::channel::{AttemptId, ChannelEvent, ConnectAttempt, SubscriptionId};
#[cfg(feature = "csr")]
use crate::net::channel::{Channel, Headers};

const JSON_CONTENT_TYPE: &str = "application/json";
const BROKER_ERROR: &str = "broker error";
const SOCKET_CLOSED: &str = "connection closed";

/// Absolute WebSocket URL for `endpoint` as seen from a page served over
/// `protocol` (`"http:"` or `"https:"`) from `host`.
///
/// Absolute `ws://`/`wss://` endpoints pass through; `http(s)://` ones are
/// switched to the matching WebSocket scheme.
#[must_use]
pub fn websocket_url(protocol: &str, host: &str, endpoint: &str) -> String {
    if endpoint.starts_with("ws://") || endpoint.starts_with("wss://") {
        return endpoint.to_owned();
    }
    if let Some(rest) = endpoint.strip_prefix("https://") {
        return format!("wss://{rest}");
    }
    if let Some(rest) = endpoint.strip_prefix("http://") {
        return format!("ws://{rest}");
    }
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    if endpoint.starts_with('/') {
        format!("{scheme}://{host}{endpoint}")
    } else {
        format!("{scheme}://{host}/{endpoint}")
    }
}

/// SEND frame for a JSON chat payload, with caller headers appended.
#[must_use]
pub fn send_frame<'a>(
    destination: &str,
    headers: impl IntoIterator<Item = (&'a String, &'a String)>,
    body: &str,
) -> Frame {
    let mut frame = Frame::send(destination, body).with_header("content-type", JSON_CONTENT_TYPE);
    for (name, value) in headers {
        frame = frame.with_header(name.clone(), value.clone());
    }
    frame
}

/// Translate one inbound text message into a channel event.
///
/// `connected` tracks whether CONNECTED has been seen for this attempt; an
/// ERROR frame fails the attempt before that and closes it after.
///
/// # Errors
///
/// Returns the [`CodecError`] for text that is not a STOMP frame.
pub fn inbound_event(raw: &str, attempt: AttemptId, connected: &mut bool) -> Result<Option<ChannelEvent>, CodecError> {
    if is_heartbeat(raw) {
        return Ok(None);
    }
    let frame = decode_frame(raw)?;
    let event = match frame.command {
        Command::Connected if !*connected => {
            *connected = true;
            Some(ChannelEvent::Connected { attempt })
        }
        Command::Message => {
            let subscription = frame.header("subscription").and_then(SubscriptionId::parse);
            match subscription {
                Some(subscription) => Some(ChannelEvent::Message { subscription, body: frame.body }),
                None => {
                    log::warn!("MESSAGE without a known subscription header");
                    None
                }
            }
        }
        Command::Error => {
            let reason = error_reason(&frame);
            if *connected {
                Some(ChannelEvent::Closed { attempt, reason: Some(reason) })
            } else {
                Some(ChannelEvent::ConnectFailed { attempt, reason })
            }
        }
        Command::Connected
        | Command::Receipt
        | Command::Connect
        | Command::Stomp
        | Command::Send
        | Command::Subscribe
        | Command::Unsubscribe
        | Command::Disconnect => None,
    };
    Ok(event)
}

fn error_reason(frame: &Frame) -> String {
    if let Some(message) = frame.header("message").filter(|m| !m.is_empty()) {
        return message.to_owned();
    }
    let body = frame.body.trim();
    if body.is_empty() { BROKER_ERROR.to_owned() } else { body.to_owned() }
}

/// `true` for events after which the connection is finished.
#[must_use]
pub fn is_terminal(event: &ChannelEvent) -> bool {
    matches!(event, ChannelEvent::ConnectFailed { .. } | ChannelEvent::Closed { .. })
}

/// Event reported when the socket ends without a terminal frame.
///
/// Before CONNECTED the attempt failed; after it the connection closed,
/// carrying the transport error if there was one.
#[must_use]
pub fn socket_end_event(attempt: AttemptId, connected: bool, failure: Option<String>) -> ChannelEvent {
    if connected {
        ChannelEvent::Closed { attempt, reason: failure }
    } else {
        let reason = failure.unwrap_or_else(|| SOCKET_CLOSED.to_owned());
        ChannelEvent::ConnectFailed { attempt, reason }
    }
}

/// `event` if `attempt` is still live; cancelled attempts report nothing.
#[must_use]
pub fn deliverable(attempt: &ConnectAttempt, event: ChannelEvent) -> Option<ChannelEvent> {
    if attempt.is_cancelled() {
        log::debug!("suppressing event for cancelled attempt {}", attempt.id().0);
        return None;
    }
    Some(event)
}

/// Browser channel speaking STOMP 1.2 over a WebSocket.
#[cfg(feature = "csr")]
pub struct StompChannel {
    endpoint: String,
    events: futures::channel::mpsc::UnboundedSender<ChannelEvent>,
    outbound: Option<futures::channel::mpsc::UnboundedSender<String>>,
    next_subscription: u64,
}

#[cfg(feature = "csr")]
impl StompChannel {
    /// Channel connecting to `endpoint`; events are pushed to `events`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, events: futures::channel::mpsc::UnboundedSender<ChannelEvent>) -> Self {
        Self { endpoint: endpoint.into(), events, outbound: None, next_subscription: 0 }
    }

    fn enqueue(&self, frame: &Frame) {
        let Some(tx) = &self.outbound else {
            log::debug!("dropping {} frame: no connection", frame.command.as_str());
            return;
        };
        if tx.unbounded_send(stomp::encode_frame(frame)).is_err() {
            log::debug!("dropping {} frame: connection task ended", frame.command.as_str());
        }
    }
}

#[cfg(feature = "csr")]
impl Channel for StompChannel {
    fn open(&mut self, attempt: ConnectAttempt, headers: &Headers) {
        let (protocol, host, hostname) = page_location();
        let url = websocket_url(&protocol, &host, &self.endpoint);

        let (tx, rx) = futures::channel::mpsc::unbounded::<String>();
        self.outbound = Some(tx);
        self.next_subscription = 0;

        let mut connect = Frame::connect(&hostname);
        for (name, value) in headers {
            connect = connect.with_header(name.clone(), value.clone());
        }
        self.enqueue(&connect);

        log::info!("opening {url} (attempt {})", attempt.id().0);
        wasm_bindgen_futures::spawn_local(run_connection(url, attempt, rx, self.events.clone()));
    }

    fn close(&mut self) {
        if self.outbound.is_none() {
            return;
        }
        self.enqueue(&Frame::disconnect());
        // Dropping the sender lets the write half flush DISCONNECT and close.
        self.outbound = None;
    }

    fn subscribe(&mut self, topic: &str) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.enqueue(&Frame::subscribe(&id.to_string(), topic));
        id
    }

    fn send(&mut self, destination: &str, headers: &Headers, body: &str) {
        self.enqueue(&send_frame(destination, headers, body));
    }
}

/// `(protocol, host, hostname)` of the current page.
#[cfg(feature = "csr")]
fn page_location() -> (String, String, String) {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return ("http:".to_owned(), "localhost:8080".to_owned(), "localhost".to_owned());
    };
    let read = |field: Result<String, wasm_bindgen::JsValue>, fallback: &str| match field {
        Ok(value) => value,
        Err(err) => {
            log::warn!("page location unavailable: {err:?}");
            fallback.to_owned()
        }
    };
    (
        read(location.protocol(), "http:"),
        read(location.host(), "localhost:8080"),
        read(location.hostname(), "localhost"),
    )
}

/// One connection: write queued frames, translate inbound frames, and report
/// how the socket ended unless the attempt was cancelled first.
#[cfg(feature = "csr")]
async fn run_connection(
    url: String,
    attempt: ConnectAttempt,
    mut outbound: futures::channel::mpsc::UnboundedReceiver<String>,
    events: futures::channel::mpsc::UnboundedSender<ChannelEvent>,
) {
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let emit = |event: ChannelEvent| {
        let Some(event) = deliverable(&attempt, event) else {
            return;
        };
        if events.unbounded_send(event).is_err() {
            log::debug!("event queue closed");
        }
    };

    let ws = match WebSocket::open(&url) {
        Ok(ws) => ws,
        Err(err) => {
            log::warn!("websocket open failed: {err}");
            emit(ChannelEvent::ConnectFailed { attempt: attempt.id(), reason: err.to_string() });
            return;
        }
    };
    let (mut ws_write, mut ws_read) = ws.split();

    let mut connected = false;
    let mut finished = false;
    let mut failure: Option<String> = None;

    let send_task = async {
        while let Some(text) = outbound.next().await {
            if let Err(err) = ws_write.send(Message::Text(text)).await {
                log::warn!("websocket send failed: {err}");
                break;
            }
        }
        if let Err(err) = ws_write.close().await {
            log::debug!("websocket close: {err}");
        }
    };

    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            match msg {
                Ok(Message::Text(text)) => match inbound_event(&text, attempt.id(), &mut connected) {
                    Ok(Some(event)) => {
                        let terminal = is_terminal(&event);
                        emit(event);
                        if terminal {
                            finished = true;
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(err) => log::warn!("dropping undecodable frame: {err}"),
                },
                Ok(Message::Bytes(_)) => {}
                Err(err) => {
                    failure = Some(err.to_string());
                    break;
                }
            }
        }
    };

    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;

    if finished {
        return;
    }
    emit(socket_end_event(attempt.id(), connected, failure));
}
