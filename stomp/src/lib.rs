//! STOMP 1.2 frame model and text codec for the browser chat transport.
//!
//! This crate owns the wire representation spoken over the chat WebSocket.
//! Frames are plain text: a command line, `name:value` header lines, a blank
//! line, the body, and a terminating NUL octet.

/// Error returned by [`decode_frame`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CodecError {
    /// The input held no frame (only end-of-line heart-beats).
    #[error("empty frame")]
    Empty,
    /// The command line names no known STOMP command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// The frame ended before the header block was closed.
    #[error("truncated frame")]
    Truncated,
    /// A header line had no `:` separator.
    #[error("malformed header line: {0}")]
    MalformedHeader(String),
    /// A header used an escape sequence outside `\\`, `\n`, `\r`, `\c`.
    #[error("invalid escape in header: {0}")]
    InvalidEscape(String),
    /// The `content-length` header was not a byte count that fits the body.
    #[error("invalid content-length: {0}")]
    InvalidContentLength(String),
    /// The body was not followed by a NUL octet.
    #[error("missing NUL terminator")]
    MissingTerminator,
}

/// Frame command, client and server side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Connect,
    Stomp,
    Connected,
    Send,
    Subscribe,
    Unsubscribe,
    Disconnect,
    Message,
    Receipt,
    Error,
}

impl Command {
    /// Command as written on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "CONNECT",
            Self::Stomp => "STOMP",
            Self::Connected => "CONNECTED",
            Self::Send => "SEND",
            Self::Subscribe => "SUBSCRIBE",
            Self::Unsubscribe => "UNSUBSCRIBE",
            Self::Disconnect => "DISCONNECT",
            Self::Message => "MESSAGE",
            Self::Receipt => "RECEIPT",
            Self::Error => "ERROR",
        }
    }

    fn parse(raw: &str) -> Result<Self, CodecError> {
        match raw {
            "CONNECT" => Ok(Self::Connect),
            "STOMP" => Ok(Self::Stomp),
            "CONNECTED" => Ok(Self::Connected),
            "SEND" => Ok(Self::Send),
            "SUBSCRIBE" => Ok(Self::Subscribe),
            "UNSUBSCRIBE" => Ok(Self::Unsubscribe),
            "DISCONNECT" => Ok(Self::Disconnect),
            "MESSAGE" => Ok(Self::Message),
            "RECEIPT" => Ok(Self::Receipt),
            "ERROR" => Ok(Self::Error),
            other => Err(CodecError::UnknownCommand(other.to_owned())),
        }
    }

    /// CONNECT and CONNECTED frames carry their headers unescaped.
    fn escapes_headers(self) -> bool {
        !matches!(self, Self::Connect | Self::Connected)
    }
}

/// A single STOMP frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Frame command.
    pub command: Command,
    /// Headers in wire order. Repeated names are kept; the first one wins on lookup.
    pub headers: Vec<(String, String)>,
    /// Frame body (JSON text for chat payloads).
    pub body: String,
}

impl Frame {
    /// Frame with no headers and an empty body.
    #[must_use]
    pub fn new(command: Command) -> Self {
        Self { command, headers: Vec::new(), body: String::new() }
    }

    /// Append a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replace the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// First value of header `name`, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        header_value(&self.headers, name)
    }

    /// CONNECT frame for virtual host `host` with heart-beating disabled.
    #[must_use]
    pub fn connect(host: &str) -> Self {
        Self::new(Command::Connect)
            .with_header("accept-version", "1.2,1.1,1.0")
            .with_header("host", host)
            .with_header("heart-beat", "0,0")
    }

    /// SUBSCRIBE frame binding subscription `id` to `destination`.
    #[must_use]
    pub fn subscribe(id: &str, destination: &str) -> Self {
        Self::new(Command::Subscribe)
            .with_header("id", id)
            .with_header("destination", destination)
    }

    /// SEND frame carrying `body` to `destination`, with its `content-length`.
    #[must_use]
    pub fn send(destination: &str, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::new(Command::Send)
            .with_header("destination", destination)
            .with_header("content-length", body.len().to_string())
            .with_body(body)
    }

    /// DISCONNECT frame.
    #[must_use]
    pub fn disconnect() -> Self {
        Self::new(Command::Disconnect)
    }
}

/// `true` when `raw` holds only end-of-line heart-beats (or nothing).
#[must_use]
pub fn is_heartbeat(raw: &str) -> bool {
    raw.chars().all(|c| c == '\n' || c == '\r')
}

/// Encode a frame as STOMP text, NUL-terminated.
#[must_use]
pub fn encode_frame(frame: &Frame) -> String {
    let escape = frame.command.escapes_headers();
    let mut out = String::with_capacity(frame.body.len() + 64);
    out.push_str(frame.command.as_str());
    out.push('\n');
    for (name, value) in &frame.headers {
        if escape {
            escape_header(name, &mut out);
            out.push(':');
            escape_header(value, &mut out);
        } else {
            out.push_str(name);
            out.push(':');
            out.push_str(value);
        }
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&frame.body);
    out.push('\0');
    out
}

/// Decode one frame from STOMP text.
///
/// Leading end-of-line heart-beats are skipped. Bytes after the NUL
/// terminator are ignored.
///
/// # Errors
///
/// Returns [`CodecError::Empty`] for heart-beat-only input and the other
/// [`CodecError`] variants for malformed frames.
pub fn decode_frame(raw: &str) -> Result<Frame, CodecError> {
    let raw = raw.trim_start_matches(['\r', '\n']);
    if raw.is_empty() {
        return Err(CodecError::Empty);
    }

    let (command_line, mut rest) = split_line(raw).ok_or(CodecError::Truncated)?;
    let command = Command::parse(command_line)?;
    let escaped = command.escapes_headers();

    let mut headers = Vec::new();
    loop {
        let (line, next) = split_line(rest).ok_or(CodecError::Truncated)?;
        rest = next;
        if line.is_empty() {
            break;
        }
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| CodecError::MalformedHeader(line.to_owned()))?;
        if escaped {
            headers.push((unescape_header(name)?, unescape_header(value)?));
        } else {
            headers.push((name.to_owned(), value.to_owned()));
        }
    }

    let body = match header_value(&headers, "content-length") {
        Some(raw_len) => {
            let len = raw_len
                .trim()
                .parse::<usize>()
                .map_err(|_| CodecError::InvalidContentLength(raw_len.to_owned()))?;
            let (body, tail) = rest
                .split_at_checked(len)
                .ok_or_else(|| CodecError::InvalidContentLength(raw_len.to_owned()))?;
            if !tail.starts_with('\0') {
                return Err(CodecError::MissingTerminator);
            }
            body.to_owned()
        }
        None => {
            let (body, _) = rest.split_once('\0').ok_or(CodecError::MissingTerminator)?;
            body.to_owned()
        }
    };

    Ok(Frame { command, headers, body })
}

fn header_value<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn split_line(input: &str) -> Option<(&str, &str)> {
    let (line, rest) = input.split_once('\n')?;
    Some((line.strip_suffix('\r').unwrap_or(line), rest))
}

fn escape_header(raw: &str, out: &mut String) {
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ':' => out.push_str("\\c"),
            other => out.push(other),
        }
    }
}

fn unescape_header(raw: &str) -> Result<String, CodecError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('c') => out.push(':'),
            _ => return Err(CodecError::InvalidEscape(raw.to_owned())),
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
