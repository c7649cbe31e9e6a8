//! Toncenter HTTP implementation of the ledger collaborator surface
//!
//! Talks to a toncenter-style JSON API (`getMasterchainInfo`,
//! `getAddressInformation`, `getTransactions`) and adapts it to
//! [`observer_core::LedgerClient`]. Live subscriptions are realized by a
//! polling task that preserves the subscription contract: ascending
//! logical-time delivery, exclusive of the seed locator.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod client;
pub mod config;
pub mod error;
mod subscribe;
mod wire;

pub use client::ToncenterClient;
pub use config::ToncenterConfig;
pub use error::{Error, Result};
