//! Transport seam for outbound notifications

use crate::error::Result;
use crate::types::{ChatId, Notification};
use async_trait::async_trait;

/// Outbound messaging transport.
///
/// A failed send is non-fatal to the caller; the dispatcher isolates it per
/// recipient.
#[async_trait]
pub trait NotificationTransport: Send + Sync {
    /// Deliver one notification to one recipient.
    async fn send(&self, recipient: ChatId, notification: &Notification) -> Result<()>;
}
