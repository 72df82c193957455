use super::*;
use serde_json::json;

// =============================================================
// MessageType serde
// =============================================================

#[test]
fn message_type_serializes_upper_case() {
    assert_eq!(serde_json::to_value(MessageType::Chat).unwrap(), json!("CHAT"));
    assert_eq!(serde_json::to_value(MessageType::Private).unwrap(), json!("PRIVATE"));
    assert_eq!(serde_json::to_value(MessageType::Error).unwrap(), json!("ERROR"));
}

#[test]
fn message_type_rejects_unknown_tag() {
    assert!(serde_json::from_value::<MessageType>(json!("SHOUT")).is_err());
    assert!(serde_json::from_value::<MessageType>(json!("chat")).is_err());
}

// =============================================================
// ChatMessage construction
// =============================================================

#[test]
fn new_requires_receiver_for_private() {
    let err = ChatMessage::new(MessageType::Private, "alice", "hi", None).unwrap_err();
    assert_eq!(err, ShapeError::MissingReceiver);

    let err = ChatMessage::new(MessageType::Private, "alice", "hi", Some("  ".to_owned())).unwrap_err();
    assert_eq!(err, ShapeError::MissingReceiver);
}

#[test]
fn new_rejects_receiver_on_public_kinds() {
    let err = ChatMessage::new(MessageType::Chat, "alice", "hi", Some("bob".to_owned())).unwrap_err();
    assert_eq!(err, ShapeError::UnexpectedReceiver(MessageType::Chat));
}

#[test]
fn new_accepts_matching_shapes() {
    let msg = ChatMessage::new(MessageType::Private, "alice", "hi", Some("bob".to_owned())).unwrap();
    assert_eq!(msg.receiver(), Some("bob"));
    assert_eq!(msg.kind(), MessageType::Private);

    let msg = ChatMessage::new(MessageType::Join, "SERVER", "bob joined", None).unwrap();
    assert_eq!(msg.receiver(), None);
    assert_eq!(msg.sender(), "SERVER");
    assert_eq!(msg.content(), "bob joined");
}

#[test]
fn private_rejects_blank_receiver() {
    let err = ChatMessage::private("alice", "  ", "hi").unwrap_err();
    assert_eq!(err, ShapeError::MissingReceiver);

    let msg = ChatMessage::private("alice", "bob", "hi").unwrap();
    assert_eq!(msg.kind(), MessageType::Private);
    assert_eq!(msg.receiver(), Some("bob"));
}

// =============================================================
// decode_message
// =============================================================

#[test]
fn decode_chat_message() {
    let msg = decode_message(r#"{"sender":"Alice","content":"hello","type":"CHAT"}"#).unwrap();
    assert_eq!(msg, ChatMessage::chat("Alice", "hello"));
}

#[test]
fn decode_treats_null_receiver_as_absent() {
    let raw = json!({"sender": "SERVER", "content": "Bob joined", "type": "JOIN", "receiver": null});
    let msg = decode_message(&raw.to_string()).unwrap();
    assert_eq!(msg.kind(), MessageType::Join);
    assert!(msg.receiver().is_none());
}

#[test]
fn decode_private_message_keeps_receiver() {
    let raw = json!({"sender": "Alice", "receiver": "Bob", "content": "psst", "type": "PRIVATE"});
    let msg = decode_message(&raw.to_string()).unwrap();
    assert_eq!(msg, ChatMessage::private("Alice", "Bob", "psst").unwrap());
}

#[test]
fn decode_rejects_private_without_receiver() {
    let raw = json!({"sender": "Alice", "content": "psst", "type": "PRIVATE"});
    let err = decode_message(&raw.to_string()).unwrap_err();
    assert!(err.to_string().contains("requires a receiver"));
}

#[test]
fn decode_rejects_malformed_payloads() {
    assert!(decode_message("not json").is_err());
    assert!(decode_message(r#"{"sender":"a","type":"CHAT"}"#).is_err());
    assert!(decode_message(r#"{"sender":"a","content":"b","type":"WHISPER"}"#).is_err());
    assert!(decode_message(r#"{"sender":"a","content":"b"}"#).is_err());
}

// =============================================================
// encode_message
// =============================================================

#[test]
fn encode_chat_omits_receiver() {
    let body = encode_message(&ChatMessage::chat("Alice", "hello"));
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value, json!({"sender": "Alice", "content": "hello", "type": "CHAT"}));
}

#[test]
fn encode_private_includes_receiver() {
    let body = encode_message(&ChatMessage::private("Alice", "Bob", "psst").unwrap());
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value, json!({"sender": "Alice", "receiver": "Bob", "content": "psst", "type": "PRIVATE"}));
}

// =============================================================
// decode_error_payload
// =============================================================

#[test]
fn decode_error_payload_reads_content() {
    let raw = json!({"sender": "SERVER", "content": "Receiver not found", "type": "ERROR", "receiver": null});
    let payload = decode_error_payload(&raw.to_string()).unwrap();
    assert_eq!(payload.content, "Receiver not found");
    assert_eq!(payload.sender.as_deref(), Some("SERVER"));
}

#[test]
fn decode_error_payload_requires_content() {
    assert!(decode_error_payload(r#"{"sender":"SERVER"}"#).is_err());
}
