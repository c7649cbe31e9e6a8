//! Resumable position in an account's transaction log

use crate::types::{Transaction, TxLocator};
use tracing::warn;

/// Cursor over an account's append-only transaction log.
///
/// Once advanced past a transaction, the same run never re-delivers that
/// transaction or an older one. The cursor lives in memory for the duration
/// of a run; the embedding application persists it across restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxCursor {
    position: TxLocator,
}

impl TxCursor {
    /// Seed the cursor at a known locator
    pub fn seeded_at(position: TxLocator) -> Self {
        Self { position }
    }

    /// Current position
    pub fn position(&self) -> TxLocator {
        self.position
    }

    /// Advance past a processed transaction.
    ///
    /// The subscription contract guarantees monotonically increasing logical
    /// time; a regression is dropped so the cursor never moves backwards.
    pub fn advance(&mut self, tx: &Transaction) {
        if tx.lt < self.position.lt {
            warn!(
                lt = tx.lt,
                cursor_lt = self.position.lt,
                "logical time regression, cursor not moved"
            );
            return;
        }
        self.position = tx.locator();
    }
}
