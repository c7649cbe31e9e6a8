//! Configuration for the tonwatch daemon

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Daemon configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Telegram bot token
    pub telegram_token: String,

    /// Recipient chat ids, insertion order preserved
    pub chat_ids: Vec<i64>,

    /// Watched account address in user-friendly form
    pub account: String,

    /// Toncenter API base URL
    #[serde(default = "default_toncenter_url")]
    pub toncenter_url: String,

    /// Optional toncenter API key
    #[serde(default)]
    pub toncenter_api_key: Option<String>,

    /// History page size
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Re-notify subscribers in history mode
    #[serde(default)]
    pub notify_on_history: bool,
}

fn default_toncenter_url() -> String {
    "https://toncenter.com/api/v2".to_string()
}

fn default_page_size() -> usize {
    observer_core::DEFAULT_PAGE_SIZE
}

impl Config {
    /// Load from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("read config {}", path.as_ref().display()))?;
        toml::from_str(&content).context("parse config")
    }

    /// Load from environment variables, honoring a `.env` file
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let telegram_token =
            env::var("TONWATCH_TELEGRAM_TOKEN").context("TONWATCH_TELEGRAM_TOKEN must be set")?;
        let chat_ids =
            parse_chat_ids(&env::var("TONWATCH_CHAT_IDS").context("TONWATCH_CHAT_IDS must be set")?)?;
        let account = env::var("TONWATCH_ACCOUNT").context("TONWATCH_ACCOUNT must be set")?;

        let toncenter_url =
            env::var("TONWATCH_TONCENTER_URL").unwrap_or_else(|_| default_toncenter_url());
        let toncenter_api_key = env::var("TONWATCH_TONCENTER_API_KEY").ok();
        let page_size = match env::var("TONWATCH_PAGE_SIZE") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("TONWATCH_PAGE_SIZE {raw:?} is not a number"))?,
            Err(_) => default_page_size(),
        };
        let notify_on_history = env::var("TONWATCH_NOTIFY_ON_HISTORY")
            .map(|raw| raw == "1" || raw.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            telegram_token,
            chat_ids,
            account,
            toncenter_url,
            toncenter_api_key,
            page_size,
            notify_on_history,
        })
    }
}

fn parse_chat_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .with_context(|| format!("invalid chat id {part:?}"))
        })
        .collect()
}
