//! On-demand historical listing, newest first

use crate::classify::{render_notice, Notice, NoticeStyle};
use crate::error::Result;
use crate::ledger::LedgerClient;
use crate::metrics::TRANSACTIONS_TOTAL;
use crate::tailer::NoticeSink;
use crate::types::{AccountAddress, TxLocator};
use std::sync::Arc;
use tracing::info;

/// Default number of transactions fetched per history page
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// One classified entry of a history page
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Locator of the transaction this entry was rendered from
    pub locator: TxLocator,

    /// Rendered notice; empty for transactions that moved no value
    pub notice: Notice,
}

/// One page of history, sorted by descending logical time
#[derive(Debug, Clone)]
pub struct HistoryPage {
    /// Entries, newest first
    pub entries: Vec<HistoryEntry>,

    /// Locator of the oldest entry, usable as `from` for the next page
    pub next: Option<TxLocator>,
}

/// Bounded reverse-chronological reader of an account's transaction log.
///
/// A single bounded round trip per page, not a full backward walk.
/// Notification dispatch is off unless a sink is attached, so history runs
/// do not re-notify transactions already seen live.
pub struct HistoricalLister<L> {
    ledger: Arc<L>,
    sink: Option<Arc<dyn NoticeSink>>,
    style: Arc<dyn NoticeStyle>,
    account: AccountAddress,
    page_size: usize,
}

impl<L: LedgerClient> HistoricalLister<L> {
    /// Create a lister for one account with the default page size
    pub fn new(ledger: Arc<L>, style: Arc<dyn NoticeStyle>, account: AccountAddress) -> Self {
        Self {
            ledger,
            sink: None,
            style,
            account,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the page size
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Re-notify subscribers for listed transactions (off by default)
    pub fn with_sink(mut self, sink: Arc<dyn NoticeSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Fetch and classify one page ending at `from`.
    ///
    /// With `from = None` the page ends at the account's last transaction,
    /// resolved against the current chain head after confirming the head
    /// block is ready for state queries. Head, readiness and state failures
    /// are fatal and propagate.
    pub async fn list_page(&self, from: Option<TxLocator>) -> Result<HistoryPage> {
        let from = match from {
            Some(locator) => locator,
            None => {
                let head = self.ledger.chain_head().await?;
                // waiting out freshly announced blocks avoids transient
                // "not ready" errors from the collaborator
                let head = self.ledger.wait_for_block(head.seqno).await?;
                let state = self.ledger.account_state(&head, &self.account).await?;
                info!(
                    account = %self.account,
                    balance = %state.balance,
                    "account state resolved"
                );
                match state.last_tx {
                    Some(locator) => locator,
                    None => {
                        return Ok(HistoryPage {
                            entries: Vec::new(),
                            next: None,
                        })
                    }
                }
            }
        };

        let mut txs = self
            .ledger
            .list_transactions(&self.account, self.page_size, from)
            .await?;
        // the collaborator's return order is not guaranteed newest-first
        txs.sort_by(|a, b| b.lt.cmp(&a.lt));

        let mut entries = Vec::with_capacity(txs.len());
        for tx in &txs {
            let notice = render_notice(tx, self.style.as_ref());
            TRANSACTIONS_TOTAL
                .with_label_values(&["history", notice.kind.as_label()])
                .inc();
            if !notice.is_empty() {
                if let Some(sink) = &self.sink {
                    sink.deliver(&notice).await;
                }
            }
            entries.push(HistoryEntry {
                locator: tx.locator(),
                notice,
            });
        }

        let next = entries.last().map(|entry| entry.locator);
        Ok(HistoryPage { entries, next })
    }
}
