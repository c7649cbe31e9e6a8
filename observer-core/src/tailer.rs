//! Continuous live tailing of an account's transaction stream
//!
//! One logical worker per run: a single blocking receive loop over the
//! subscription channel. Classification and rendering never suspend; the
//! loop suspends only while waiting for the next transaction and while a
//! delivery attempt is in flight. The cursor advances only after delivery
//! has been attempted for a transaction, successfully or not.

use crate::classify::{render_notice, Notice, NoticeStyle};
use crate::cursor::TxCursor;
use crate::error::Result;
use crate::ledger::LedgerClient;
use crate::metrics::{CURSOR_LT, TRANSACTIONS_TOTAL};
use crate::types::{AccountAddress, TxLocator};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// Delivery seam for rendered notices.
///
/// Delivery is best-effort: implementations absorb transport failures and
/// never surface them into the receive loop.
#[async_trait]
pub trait NoticeSink: Send + Sync {
    /// Deliver a notice to all subscribers.
    async fn deliver(&self, notice: &Notice);
}

/// Continuous observer of a single account.
///
/// Holds exactly the collaborators it needs, so it runs against fakes in
/// tests.
pub struct LiveTailer<L> {
    ledger: Arc<L>,
    sink: Arc<dyn NoticeSink>,
    style: Arc<dyn NoticeStyle>,
    account: AccountAddress,
    cursor_tx: watch::Sender<Option<TxLocator>>,
}

impl<L: LedgerClient> LiveTailer<L> {
    /// Create a tailer for one account
    pub fn new(
        ledger: Arc<L>,
        sink: Arc<dyn NoticeSink>,
        style: Arc<dyn NoticeStyle>,
        account: AccountAddress,
    ) -> Self {
        let (cursor_tx, _) = watch::channel(None);
        Self {
            ledger,
            sink,
            style,
            account,
            cursor_tx,
        }
    }

    /// Watch the cursor as it advances.
    ///
    /// The embedding application can persist each observed position to
    /// resume via [`LiveTailer::run_from`] after a restart.
    pub fn cursor(&self) -> watch::Receiver<Option<TxLocator>> {
        self.cursor_tx.subscribe()
    }

    /// Tail from the account's current last transaction onward.
    ///
    /// Blocks indefinitely under normal operation. Head fetch, account state
    /// resolution and subscription open failures are fatal and propagate.
    pub async fn run(&self) -> Result<()> {
        let head = self.ledger.chain_head().await?;
        let state = self.ledger.account_state(&head, &self.account).await?;
        let seed = state.last_tx.unwrap_or_default();
        self.run_from(seed).await
    }

    /// Tail from a known locator, e.g. one restored from durable storage.
    pub async fn run_from(&self, seed: TxLocator) -> Result<()> {
        let mut cursor = TxCursor::seeded_at(seed);
        let mut stream = self
            .ledger
            .subscribe_transactions(&self.account, cursor.position())
            .await?;
        info!(
            account = %self.account,
            lt = cursor.position().lt,
            "subscribed, waiting for transfers"
        );

        while let Some(tx) = stream.recv().await {
            let notice = render_notice(&tx, self.style.as_ref());
            TRANSACTIONS_TOTAL
                .with_label_values(&["live", notice.kind.as_label()])
                .inc();
            if !notice.is_empty() {
                info!(lt = tx.lt, hash = %tx.hash, kind = ?notice.kind, "transfer observed");
                self.sink.deliver(&notice).await;
            }
            cursor.advance(&tx);
            CURSOR_LT.set(cursor.position().lt as i64);
            self.cursor_tx.send_replace(Some(cursor.position()));
        }

        // The subscription runs until the process stops; reaching this point
        // means the channel closed without an error.
        warn!(account = %self.account, "transaction subscription ended unexpectedly");
        Ok(())
    }
}
