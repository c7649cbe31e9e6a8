//! Glue between the observer core and the notification bus

use async_trait::async_trait;
use notify_bus::Dispatcher;
use observer_core::{Notice, NoticeSink};
use std::sync::Arc;
use tracing::debug;

/// Delivers rendered notices through the fan-out dispatcher.
///
/// Transport failures are already isolated per recipient inside the
/// dispatcher, so delivery never surfaces an error to the receive loop.
pub struct DispatchSink {
    dispatcher: Arc<Dispatcher>,
}

impl DispatchSink {
    /// Wrap a dispatcher
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl NoticeSink for DispatchSink {
    async fn deliver(&self, notice: &Notice) {
        let delivered = self
            .dispatcher
            .dispatch(&notice.text, &notice.tx_hash_hex)
            .await;
        debug!(
            delivered,
            recipients = self.dispatcher.recipients().len(),
            "notice dispatched"
        );
    }
}
