//! TonWatch daemon: configuration and wiring for the observer binaries

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod sink;

pub use config::Config;
pub use sink::DispatchSink;

use anyhow::Context;
use notify_bus::{ChatId, Dispatcher, TelegramClient, TelegramConfig};
use std::sync::Arc;
use toncenter_client::{ToncenterClient, ToncenterConfig};

/// Initialize tracing for the daemon binaries
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();
}

/// Build the toncenter ledger client from configuration
pub fn ledger_client(config: &Config) -> anyhow::Result<ToncenterClient> {
    let toncenter = ToncenterConfig {
        base_url: config.toncenter_url.clone(),
        api_key: config.toncenter_api_key.clone(),
        ..ToncenterConfig::default()
    };
    ToncenterClient::new(toncenter).context("create toncenter client")
}

/// Build the Telegram-backed fan-out dispatcher from configuration
pub fn dispatcher(config: &Config) -> anyhow::Result<Dispatcher> {
    let telegram = TelegramClient::new(TelegramConfig::new(config.telegram_token.clone()))
        .context("create telegram client")?;
    let recipients: Vec<ChatId> = config.chat_ids.iter().copied().map(ChatId::new).collect();
    Ok(Dispatcher::new(Arc::new(telegram), recipients))
}
