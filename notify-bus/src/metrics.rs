//! Prometheus metrics for notification delivery

use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_histogram, CounterVec, Histogram};

lazy_static! {
    /// Delivery attempts, by status
    pub static ref NOTIFY_DELIVER_TOTAL: CounterVec = register_counter_vec!(
        "notify_deliver_total",
        "Notification delivery attempts",
        &["status"]
    )
    .unwrap();

    /// Delivery attempt duration
    pub static ref NOTIFY_DELIVER_DURATION: Histogram = register_histogram!(
        "notify_deliver_duration_seconds",
        "Notification delivery duration in seconds"
    )
    .unwrap();
}
