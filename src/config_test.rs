use super::*;

#[test]
fn default_config_matches_stock_broker() {
    let cfg = ChatConfig::default();
    assert_eq!(cfg.endpoint, "/ws/websocket");
    assert_eq!(cfg.topics.public, "/topic/public");
    assert_eq!(cfg.topics.private, "/user/queue/private");
    assert_eq!(cfg.topics.errors, "/user/queue/errors");
    assert_eq!(cfg.destinations.add_user, "/app/chat.addUser");
    assert_eq!(cfg.destinations.send_message, "/app/chat.sendMessage");
    assert_eq!(cfg.destinations.private, "/app/chat.private");
    assert_eq!(cfg.history_capacity, 100);
    assert_eq!(cfg.emoji.len(), 8);
    assert!(cfg.connect_headers.is_empty());
    assert!(cfg.validate().is_ok());
}

#[test]
fn from_json_empty_object_is_default() {
    let cfg = ChatConfig::from_json("{}").unwrap();
    assert_eq!(cfg, ChatConfig::default());
}

#[test]
fn from_json_merges_partial_overrides() {
    let raw = r#"{
        "endpoint": "wss://chat.example.test/ws/websocket",
        "topics": {"public": "/topic/lobby"},
        "history_capacity": 25,
        "connect_headers": {"login": "guest"}
    }"#;
    let cfg = ChatConfig::from_json(raw).unwrap();
    assert_eq!(cfg.endpoint, "wss://chat.example.test/ws/websocket");
    assert_eq!(cfg.topics.public, "/topic/lobby");
    assert_eq!(cfg.topics.private, DEFAULT_PRIVATE_TOPIC);
    assert_eq!(cfg.history_capacity, 25);
    assert_eq!(cfg.connect_headers.get("login").map(String::as_str), Some("guest"));
    assert_eq!(cfg.destinations, Destinations::default());
}

#[test]
fn from_json_rejects_zero_history() {
    let err = ChatConfig::from_json(r#"{"history_capacity": 0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("history_capacity"));
}

#[test]
fn from_json_rejects_blank_topic() {
    let err = ChatConfig::from_json(r#"{"topics": {"errors": "  "}}"#).unwrap_err();
    assert!(err.to_string().contains("topics.errors"));
}

#[test]
fn from_json_rejects_bad_json() {
    let err = ChatConfig::from_json("{").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    let err = ChatConfig::from_json(r#"{"history_capacity": "lots"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
