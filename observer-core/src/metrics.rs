//! Prometheus metrics for the observer core

use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_int_gauge, CounterVec, IntGauge};

lazy_static! {
    /// Transactions processed, by mode and classification outcome
    pub static ref TRANSACTIONS_TOTAL: CounterVec = register_counter_vec!(
        "observer_transactions_total",
        "Transactions processed",
        &["mode", "classification"]
    )
    .unwrap();

    /// Logical time of the cursor after the last processed transaction
    pub static ref CURSOR_LT: IntGauge = register_int_gauge!(
        "observer_cursor_lt",
        "Logical time of the cursor after the last processed transaction"
    )
    .unwrap();
}
