use super::*;

#[test]
fn command_wire_names_parse_back() {
    for command in [
        Command::Connect,
        Command::Stomp,
        Command::Connected,
        Command::Send,
        Command::Subscribe,
        Command::Unsubscribe,
        Command::Disconnect,
        Command::Message,
        Command::Receipt,
        Command::Error,
    ] {
        assert_eq!(Command::parse(command.as_str()).expect("command"), command);
    }
}

#[test]
fn command_parse_rejects_unknown_and_lowercase() {
    assert_eq!(Command::parse("PUBLISH"), Err(CodecError::UnknownCommand("PUBLISH".to_owned())));
    assert!(Command::parse("send").is_err());
}

#[test]
fn encode_send_frame_layout() {
    let frame = Frame::send("/app/chat.sendMessage", "{}").with_header("content-type", "application/json");
    assert_eq!(
        encode_frame(&frame),
        "SEND\ndestination:/app/chat.sendMessage\ncontent-length:2\ncontent-type:application/json\n\n{}\0"
    );
}

#[test]
fn encode_escapes_headers_except_on_connect() {
    let send = Frame::new(Command::Send).with_header("note", "a:b\nc\\d");
    assert_eq!(encode_frame(&send), "SEND\nnote:a\\cb\\nc\\\\d\n\n\0");

    let connect = Frame::new(Command::Connect).with_header("host", "localhost:8080");
    assert_eq!(encode_frame(&connect), "CONNECT\nhost:localhost:8080\n\n\0");
}

#[test]
fn connect_builder_disables_heartbeats() {
    let frame = Frame::connect("chat.local");
    assert_eq!(frame.command, Command::Connect);
    assert_eq!(frame.header("host"), Some("chat.local"));
    assert_eq!(frame.header("heart-beat"), Some("0,0"));
    assert_eq!(frame.header("accept-version"), Some("1.2,1.1,1.0"));
}

#[test]
fn decode_message_frame_without_content_length() {
    let raw = "MESSAGE\ndestination:/topic/public\nsubscription:sub-0\nmessage-id:7\n\n{\"a\":1}\0";
    let frame = decode_frame(raw).expect("decode");
    assert_eq!(frame.command, Command::Message);
    assert_eq!(frame.header("subscription"), Some("sub-0"));
    assert_eq!(frame.header("destination"), Some("/topic/public"));
    assert_eq!(frame.body, "{\"a\":1}");
}

#[test]
fn decode_honors_content_length_and_ignores_trailing_bytes() {
    let raw = "MESSAGE\ncontent-length:5\n\nhello\0\n\n";
    let frame = decode_frame(raw).expect("decode");
    assert_eq!(frame.body, "hello");
}

#[test]
fn decode_content_length_counts_bytes_not_chars() {
    let body = "héllo";
    let raw = format!("MESSAGE\ncontent-length:{}\n\n{body}\0", body.len());
    let frame = decode_frame(&raw).expect("decode");
    assert_eq!(frame.body, body);
}

#[test]
fn decode_skips_leading_heartbeats_and_crlf() {
    let raw = "\n\r\nCONNECTED\r\nversion:1.2\r\n\r\n\0";
    let frame = decode_frame(raw).expect("decode");
    assert_eq!(frame.command, Command::Connected);
    assert_eq!(frame.header("version"), Some("1.2"));
    assert!(frame.body.is_empty());
}

#[test]
fn decode_unescapes_headers_but_not_on_connected() {
    let raw = "ERROR\nmessage:bad\\cthing\\nhappened\n\n\0";
    let frame = decode_frame(raw).expect("decode");
    assert_eq!(frame.header("message"), Some("bad:thing\nhappened"));

    let raw = "CONNECTED\nserver:a\\cb\n\n\0";
    let frame = decode_frame(raw).expect("decode");
    assert_eq!(frame.header("server"), Some("a\\cb"));
}

#[test]
fn decode_first_repeated_header_wins() {
    let raw = "MESSAGE\nfoo:first\nfoo:second\n\n\0";
    let frame = decode_frame(raw).expect("decode");
    assert_eq!(frame.header("foo"), Some("first"));
    assert_eq!(frame.headers.len(), 2);
}

#[test]
fn decode_rejects_heartbeat_only_input() {
    assert_eq!(decode_frame("\n\n"), Err(CodecError::Empty));
    assert_eq!(decode_frame(""), Err(CodecError::Empty));
}

#[test]
fn decode_rejects_malformed_frames() {
    assert_eq!(decode_frame("MESSAGE"), Err(CodecError::Truncated));
    assert_eq!(decode_frame("MESSAGE\nnocolon\n\n\0"), Err(CodecError::MalformedHeader("nocolon".to_owned())));
    assert_eq!(decode_frame("MESSAGE\n\nbody"), Err(CodecError::MissingTerminator));
    assert!(matches!(decode_frame("MESSAGE\nx:\\t\n\n\0"), Err(CodecError::InvalidEscape(_))));
    assert!(matches!(
        decode_frame("MESSAGE\ncontent-length:abc\n\n\0"),
        Err(CodecError::InvalidContentLength(_))
    ));
    assert!(matches!(
        decode_frame("MESSAGE\ncontent-length:99\n\nshort\0"),
        Err(CodecError::InvalidContentLength(_))
    ));
    assert_eq!(decode_frame("MESSAGE\ncontent-length:2\n\nabc\0"), Err(CodecError::MissingTerminator));
}

#[test]
fn encoded_subscribe_decodes_to_same_frame() {
    let frame = Frame::subscribe("sub-3", "/user/queue/errors");
    let decoded = decode_frame(&encode_frame(&frame)).expect("decode");
    assert_eq!(decoded, frame);
}

#[test]
fn is_heartbeat_detects_eol_only_payloads() {
    assert!(is_heartbeat("\n"));
    assert!(is_heartbeat("\r\n"));
    assert!(is_heartbeat(""));
    assert!(!is_heartbeat("MESSAGE\n"));
}
