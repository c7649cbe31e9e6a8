//! Notice fan-out with per-recipient failure isolation

use crate::metrics::{NOTIFY_DELIVER_DURATION, NOTIFY_DELIVER_TOTAL};
use crate::transport::NotificationTransport;
use crate::types::{ChatId, Notification};
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

/// Default external viewer URL prefix; the transaction hash is appended
pub const DEFAULT_VIEWER_URL: &str = "https://tonviewer.com/transaction/";

/// Dispatcher configuration
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Viewer URL prefix for transaction links
    pub viewer_url: String,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            viewer_url: DEFAULT_VIEWER_URL.to_string(),
        }
    }
}

/// Fan-out dispatcher over a fixed, insertion-ordered recipient set.
///
/// The recipient set is supplied at startup and never mutated, so the
/// dispatcher is safe to share across tasks without locking.
pub struct Dispatcher {
    transport: Arc<dyn NotificationTransport>,
    recipients: Vec<ChatId>,
    config: DispatcherConfig,
}

impl Dispatcher {
    /// Create a dispatcher with the default configuration
    pub fn new(transport: Arc<dyn NotificationTransport>, recipients: Vec<ChatId>) -> Self {
        Self {
            transport,
            recipients,
            config: DispatcherConfig::default(),
        }
    }

    /// Override the configuration
    pub fn with_config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Configured recipients, in insertion order
    pub fn recipients(&self) -> &[ChatId] {
        &self.recipients
    }

    /// Deliver `text` to every recipient with a viewer link for the hash.
    ///
    /// Attempts run sequentially; a failed recipient is logged and never
    /// blocks the remaining ones or the caller. Returns the number of
    /// successful deliveries.
    pub async fn dispatch(&self, text: &str, tx_hash_hex: &str) -> usize {
        let link_url = format!("{}{}", self.config.viewer_url, tx_hash_hex);
        let notification = Notification::new(text, link_url);

        let mut delivered = 0;
        for recipient in &self.recipients {
            let started = Instant::now();
            match self.transport.send(*recipient, &notification).await {
                Ok(()) => {
                    delivered += 1;
                    NOTIFY_DELIVER_TOTAL.with_label_values(&["success"]).inc();
                }
                Err(e) => {
                    warn!(recipient = %recipient, error = %e, "notification delivery failed");
                    NOTIFY_DELIVER_TOTAL.with_label_values(&["error"]).inc();
                }
            }
            NOTIFY_DELIVER_DURATION.observe(started.elapsed().as_secs_f64());
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockTransport {
        fail_for: HashSet<i64>,
        sent: Mutex<Vec<(ChatId, Notification)>>,
    }

    #[async_trait]
    impl NotificationTransport for MockTransport {
        async fn send(&self, recipient: ChatId, notification: &Notification) -> crate::Result<()> {
            if self.fail_for.contains(&recipient.value()) {
                return Err(Error::Api("chat not found".to_string()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((recipient, notification.clone()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_dispatch_reaches_every_recipient() {
        let transport = Arc::new(MockTransport::default());
        let dispatcher = Dispatcher::new(
            transport.clone(),
            vec![ChatId::new(1), ChatId::new(2), ChatId::new(3)],
        );

        let delivered = dispatcher.dispatch("hello", "ff".repeat(32).as_str()).await;
        assert_eq!(delivered, 3);

        let sent = transport.sent.lock().unwrap();
        let recipients: Vec<i64> = sent.iter().map(|(chat, _)| chat.value()).collect();
        assert_eq!(recipients, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failed_recipient_does_not_block_the_rest() {
        let transport = Arc::new(MockTransport {
            fail_for: HashSet::from([2]),
            sent: Mutex::new(Vec::new()),
        });
        let dispatcher = Dispatcher::new(
            transport.clone(),
            vec![ChatId::new(1), ChatId::new(2), ChatId::new(3)],
        );

        let delivered = dispatcher.dispatch("hello", "abcd").await;
        assert_eq!(delivered, 2);

        let sent = transport.sent.lock().unwrap();
        let recipients: Vec<i64> = sent.iter().map(|(chat, _)| chat.value()).collect();
        assert_eq!(recipients, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_dispatch_builds_viewer_link() {
        let transport = Arc::new(MockTransport::default());
        let dispatcher = Dispatcher::new(transport.clone(), vec![ChatId::new(1)]);

        dispatcher.dispatch("text", "deadbeef").await;

        let sent = transport.sent.lock().unwrap();
        assert_eq!(
            sent[0].1.link_url,
            "https://tonviewer.com/transaction/deadbeef"
        );
    }

    #[tokio::test]
    async fn test_dispatch_honors_custom_viewer_url() {
        let transport = Arc::new(MockTransport::default());
        let dispatcher = Dispatcher::new(transport.clone(), vec![ChatId::new(1)]).with_config(
            DispatcherConfig {
                viewer_url: "https://example.com/tx/".to_string(),
            },
        );

        dispatcher.dispatch("text", "00ff").await;

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent[0].1.link_url, "https://example.com/tx/00ff");
    }
}
