//! Error types for notification delivery

use thiserror::Error;

/// Notification delivery error
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport failure
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The messaging API rejected the request
    #[error("api rejected message: {0}")]
    Api(String),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
