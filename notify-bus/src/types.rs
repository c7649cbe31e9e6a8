//! Type definitions for notification delivery

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Telegram chat identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(i64);

impl ChatId {
    /// Create from a raw chat id
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw chat id
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Notification envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Notification ID (UUIDv7 for ordering)
    pub id: Uuid,

    /// Rendered message body
    pub text: String,

    /// Actionable link to the external transaction viewer
    pub link_url: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create a new notification
    pub fn new(text: impl Into<String>, link_url: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: text.into(),
            link_url: link_url.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_creation() {
        let notification = Notification::new("body", "https://viewer/abc");
        assert_eq!(notification.text, "body");
        assert_eq!(notification.link_url, "https://viewer/abc");
    }

    #[test]
    fn test_chat_id_display() {
        assert_eq!(ChatId::new(558161625).to_string(), "558161625");
        assert_eq!(ChatId::from(-100).value(), -100);
    }
}
