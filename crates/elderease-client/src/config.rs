//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where the API lives and how often feeds refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root, e.g. `http://localhost:3000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_notification_poll")]
    pub notification_poll_seconds: u64,
    #[serde(default = "default_message_poll")]
    pub message_poll_seconds: u64,
}

impl ClientConfig {
    /// Config pointing at `base_url` with default intervals.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn notification_interval(&self) -> Duration {
        Duration::from_secs(self.notification_poll_seconds)
    }

    pub fn message_interval(&self) -> Duration {
        Duration::from_secs(self.message_poll_seconds)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            notification_poll_seconds: default_notification_poll(),
            message_poll_seconds: default_message_poll(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_notification_poll() -> u64 {
    30
}

fn default_message_poll() -> u64 {
    5
}
