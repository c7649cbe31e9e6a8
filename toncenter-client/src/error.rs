//! Error types for the toncenter adapter

use thiserror::Error;

/// Toncenter API error
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP failure
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with `ok: false`
    #[error("api error {code}: {message}")]
    Api {
        /// API error code
        code: i64,
        /// API error message
        message: String,
    },

    /// A response field could not be decoded
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
