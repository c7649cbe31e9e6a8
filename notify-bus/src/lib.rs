//! Notification fan-out with Telegram delivery
//!
//! Provides buy/sell notice delivery with:
//! - A transport seam so the dispatcher runs against fakes in tests
//! - Per-recipient failure isolation (best-effort fan-out)
//! - Viewer links built from transaction hashes
//! - Observability via Prometheus metrics

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod telegram;
pub mod transport;
pub mod types;

pub use dispatcher::{Dispatcher, DispatcherConfig, DEFAULT_VIEWER_URL};
pub use error::{Error, Result};
pub use telegram::{TelegramClient, TelegramConfig};
pub use transport::NotificationTransport;
pub use types::{ChatId, Notification};
