//! Ledger collaborator surface consumed by the observer

use crate::error::Result;
use crate::types::{AccountAddress, AccountState, ChainHead, Transaction, TxLocator};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Live transaction feed.
///
/// Transactions arrive in ascending logical-time order, exclusive of the
/// seed locator. The channel is unbounded: the producer never blocks on a
/// slow consumer.
pub type TxStream = mpsc::UnboundedReceiver<Transaction>;

/// Trusted, verified view of chain state.
///
/// Implementations carry their own retry semantics; errors surfacing here
/// are treated as fatal by the callers.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Fetch the current finalized chain head.
    async fn chain_head(&self) -> Result<ChainHead>;

    /// Wait until the given masterchain block is available for state queries.
    async fn wait_for_block(&self, seqno: u32) -> Result<ChainHead>;

    /// Fetch an account's current state against a chain head.
    async fn account_state(
        &self,
        head: &ChainHead,
        account: &AccountAddress,
    ) -> Result<AccountState>;

    /// Open a live subscription delivering transactions newer than `from`.
    async fn subscribe_transactions(
        &self,
        account: &AccountAddress,
        from: TxLocator,
    ) -> Result<TxStream>;

    /// Fetch one backward page of up to `page_size` transactions ending at
    /// `from` (inclusive). Return order is unspecified.
    async fn list_transactions(
        &self,
        account: &AccountAddress,
        page_size: usize,
        from: TxLocator,
    ) -> Result<Vec<Transaction>>;
}
