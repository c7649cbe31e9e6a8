//! Telegram Bot API transport

use crate::error::{Error, Result};
use crate::transport::NotificationTransport;
use crate::types::{ChatId, Notification};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Telegram transport configuration
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token
    pub token: String,

    /// API base URL
    pub api_base: String,

    /// Request timeout
    pub timeout: Duration,
}

impl TelegramConfig {
    /// Configuration with defaults for everything but the token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: "https://api.telegram.org".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Telegram Bot API client
pub struct TelegramClient {
    http: Client,
    config: TelegramConfig,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'static str,
    disable_web_page_preview: bool,
    reply_markup: InlineKeyboardMarkup<'a>,
}

#[derive(Debug, Serialize)]
struct InlineKeyboardMarkup<'a> {
    inline_keyboard: Vec<Vec<InlineKeyboardButton<'a>>>,
}

#[derive(Debug, Serialize)]
struct InlineKeyboardButton<'a> {
    text: &'static str,
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramClient {
    /// Create a new client
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_base, self.config.token, method
        )
    }

    fn build_request<'a>(recipient: ChatId, notification: &'a Notification) -> SendMessageRequest<'a> {
        SendMessageRequest {
            chat_id: recipient.value(),
            text: &notification.text,
            parse_mode: "MarkdownV2",
            disable_web_page_preview: true,
            reply_markup: InlineKeyboardMarkup {
                inline_keyboard: vec![vec![InlineKeyboardButton {
                    text: "VIEW TX",
                    url: &notification.link_url,
                }]],
            },
        }
    }
}

#[async_trait]
impl NotificationTransport for TelegramClient {
    async fn send(&self, recipient: ChatId, notification: &Notification) -> Result<()> {
        let request = Self::build_request(recipient, notification);
        let response = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&request)
            .send()
            .await?;

        let body: ApiResponse = response.json().await?;
        if !body.ok {
            return Err(Error::Api(
                body.description
                    .unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        debug!(recipient = %recipient, notification = %notification.id, "message sent");
        Ok(())
    }
}
