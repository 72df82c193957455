//! Widget configuration: broker endpoint, topic names, history size, emoji.
//!
//! Every field has a default matching the stock broker setup, so an empty
//! JSON object is a valid configuration. The browser build reads overrides
//! from an inline `<script type="application/json" id="webchat-config">`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::net::channel::Headers;
use crate::state::chat::HISTORY_CAPACITY;

pub const DEFAULT_ENDPOINT: &str = "/ws/websocket";
pub const DEFAULT_PUBLIC_TOPIC: &str = "/topic/public";
pub const DEFAULT_PRIVATE_TOPIC: &str = "/user/queue/private";
pub const DEFAULT_ERRORS_TOPIC: &str = "/user/queue/errors";
pub const DEFAULT_ADD_USER_DESTINATION: &str = "/app/chat.addUser";
pub const DEFAULT_SEND_MESSAGE_DESTINATION: &str = "/app/chat.sendMessage";
pub const DEFAULT_PRIVATE_DESTINATION: &str = "/app/chat.private";
pub const DEFAULT_EMOJI: [&str; 8] = ["😀", "😂", "😍", "👍", "👋", "❤️", "🎉", "🤔"];
pub const CONFIG_ELEMENT_ID: &str = "webchat-config";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Subscription topics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Topics {
    pub public: String,
    pub private: String,
    pub errors: String,
}

impl Default for Topics {
    fn default() -> Self {
        Self {
            public: DEFAULT_PUBLIC_TOPIC.to_owned(),
            private: DEFAULT_PRIVATE_TOPIC.to_owned(),
            errors: DEFAULT_ERRORS_TOPIC.to_owned(),
        }
    }
}

/// Publish destinations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Destinations {
    pub add_user: String,
    pub send_message: String,
    pub private: String,
}

impl Default for Destinations {
    fn default() -> Self {
        Self {
            add_user: DEFAULT_ADD_USER_DESTINATION.to_owned(),
            send_message: DEFAULT_SEND_MESSAGE_DESTINATION.to_owned(),
            private: DEFAULT_PRIVATE_DESTINATION.to_owned(),
        }
    }
}

/// Chat widget configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// WebSocket path (or absolute `ws://`/`wss://` URL) of the broker.
    pub endpoint: String,
    /// Extra CONNECT headers.
    pub connect_headers: Headers,
    pub topics: Topics,
    pub destinations: Destinations,
    /// Messages kept in the session history; at least 1.
    pub history_capacity: usize,
    /// Glyphs offered by the emoji picker.
    pub emoji: Vec<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            connect_headers: Headers::new(),
            topics: Topics::default(),
            destinations: Destinations::default(),
            history_capacity: HISTORY_CAPACITY,
            emoji: DEFAULT_EMOJI.iter().map(|e| (*e).to_owned()).collect(),
        }
    }
}

impl ChatConfig {
    /// Parse and validate a JSON config; absent fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for bad JSON and
    /// [`ConfigError::Invalid`] when [`ChatConfig::validate`] fails.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every address is non-empty and the history can hold a message.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid("history_capacity must be at least 1".to_owned()));
        }
        let addresses = [
            ("endpoint", &self.endpoint),
            ("topics.public", &self.topics.public),
            ("topics.private", &self.topics.private),
            ("topics.errors", &self.topics.errors),
            ("destinations.add_user", &self.destinations.add_user),
            ("destinations.send_message", &self.destinations.send_message),
            ("destinations.private", &self.destinations.private),
        ];
        for (name, value) in addresses {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    /// Load the inline page config, falling back to defaults when the element
    /// is missing or invalid.
    #[cfg(feature = "csr")]
    #[must_use]
    pub fn from_document() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        let Some(raw) = raw else {
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
                Self::default()
            }
        }
    }
}
