//! TonWatch Observer Core
//!
//! Classification and cursor-driven observation of a single TON account's
//! transaction stream.
//!
//! # Architecture
//!
//! - **Pure classification**: a transaction's inbound/outbound message set is
//!   reduced to SELL/BUY legs with exact 256-bit amounts
//! - **Single Consumer**: one receive loop per tailing run, no shared mutable
//!   state
//! - **Cursor Gating**: the cursor advances only after delivery has been
//!   attempted for a transaction
//! - **Collaborator Seams**: chain access and notice delivery sit behind
//!   traits, so the core runs against fakes in tests

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod classify;
pub mod cursor;
pub mod error;
pub mod ledger;
pub mod lister;
pub mod metrics;
pub mod tailer;
pub mod types;

// Re-exports
pub use classify::{
    classify, render_notice, BuyLeg, Classification, MarkdownV2Style, Notice, NoticeKind,
    NoticeStyle, PlainStyle, SellLeg,
};
pub use cursor::TxCursor;
pub use error::{Error, Result};
pub use ledger::{LedgerClient, TxStream};
pub use lister::{HistoricalLister, HistoryEntry, HistoryPage, DEFAULT_PAGE_SIZE};
pub use tailer::{LiveTailer, NoticeSink};
pub use types::{
    AccountAddress, AccountState, ChainHead, Coins, MessageKind, OutboundMessages, Transaction,
    TxHash, TxLocator, TxMessage,
};
