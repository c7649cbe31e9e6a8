//! Error types for the observer core

use thiserror::Error;

/// Result type for observer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Observer errors
#[derive(Error, Debug)]
pub enum Error {
    /// Chain head could not be fetched
    #[error("chain head unavailable: {0}")]
    ChainHead(String),

    /// Masterchain block did not become available for state queries
    #[error("block not ready: {0}")]
    BlockNotReady(String),

    /// Account state query failed
    #[error("account state unavailable: {0}")]
    AccountState(String),

    /// Live subscription could not be opened
    #[error("subscription failed: {0}")]
    Subscribe(String),

    /// Historical listing failed
    #[error("transaction listing failed: {0}")]
    Listing(String),

    /// Malformed account address
    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    /// Malformed transaction hash
    #[error("invalid transaction hash: {0}")]
    InvalidHash(String),

    /// Malformed token amount
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}
