//! Live tailing daemon: watches one account and notifies subscribers

use anyhow::Context;
use observer_core::{AccountAddress, LiveTailer, MarkdownV2Style};
use std::sync::Arc;
use tonwatchd::{Config, DispatchSink};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tonwatchd::init_tracing();

    info!("🔭 tonwatch tail starting");

    let config = Config::from_env()?;
    let account =
        AccountAddress::parse(&config.account).context("TONWATCH_ACCOUNT is malformed")?;

    let ledger = Arc::new(tonwatchd::ledger_client(&config)?);
    let dispatcher = Arc::new(tonwatchd::dispatcher(&config)?);
    let sink = Arc::new(DispatchSink::new(dispatcher));

    let tailer = LiveTailer::new(ledger, sink, Arc::new(MarkdownV2Style), account);

    // blocks indefinitely under normal operation; returning without an error
    // means the subscription ended, which the tailer already logged
    tailer.run().await?;
    Ok(())
}
