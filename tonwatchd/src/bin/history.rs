//! One-page history listing, newest first

use anyhow::Context;
use observer_core::{AccountAddress, HistoricalLister, MarkdownV2Style};
use std::sync::Arc;
use tonwatchd::{Config, DispatchSink};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tonwatchd::init_tracing();

    let config = Config::from_env()?;
    let account =
        AccountAddress::parse(&config.account).context("TONWATCH_ACCOUNT is malformed")?;

    let ledger = Arc::new(tonwatchd::ledger_client(&config)?);
    let mut lister = HistoricalLister::new(ledger, Arc::new(MarkdownV2Style), account)
        .with_page_size(config.page_size);
    if config.notify_on_history {
        let dispatcher = Arc::new(tonwatchd::dispatcher(&config)?);
        lister = lister.with_sink(Arc::new(DispatchSink::new(dispatcher)));
    }

    let page = lister.list_page(None).await?;

    println!("\nTransactions:");
    for entry in &page.entries {
        if !entry.notice.is_empty() {
            println!("{}", entry.notice.text);
        }
    }
    if let Some(next) = page.next {
        info!(lt = next.lt, "older transactions available from this locator");
    }
    Ok(())
}
