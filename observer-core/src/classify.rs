//! Transaction classification and notice rendering
//!
//! Pure with respect to the transaction: no I/O, no state, safe to call
//! concurrently for independent transactions. Markup is a strategy tied to
//! the delivery transport, not part of the classification itself.

use crate::types::{Coins, OutboundMessages, Transaction, TxHash};
use thiserror::Error;

/// Inbound transfer leg: the account received value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellLeg {
    /// Received amount in nanotons
    pub amount: Coins,

    /// Sender address
    pub source: String,
}

/// Outbound transfer leg: the account sent value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyLeg {
    /// Sum of internal outbound values in nanotons
    pub amount: Coins,

    /// Every outbound destination in original order, including those of
    /// zero-value messages
    pub destinations: Vec<String>,
}

/// Result of classifying a single transaction.
///
/// Both legs may be present for the same transaction, in which case the
/// rendered notice carries a SELL block followed by a BUY block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Inbound leg, present iff the inbound message is internal with
    /// nonzero value
    pub sell: Option<SellLeg>,

    /// Outbound leg, present iff the internal outbound values sum to nonzero
    pub buy: Option<BuyLeg>,

    /// Hash of the classified transaction
    pub tx_hash: TxHash,
}

impl Classification {
    /// True if the transaction moved value in either direction
    pub fn is_transfer(&self) -> bool {
        self.sell.is_some() || self.buy.is_some()
    }

    /// Notice kind for this classification
    pub fn kind(&self) -> NoticeKind {
        match (&self.sell, &self.buy) {
            (Some(_), Some(_)) => NoticeKind::SellBuy,
            (Some(_), None) => NoticeKind::Sell,
            (None, Some(_)) => NoticeKind::Buy,
            (None, None) => NoticeKind::Empty,
        }
    }

    /// Render this classification with the given markup style.
    ///
    /// Blocks are concatenated in SELL-then-BUY order; an empty string means
    /// the transaction produced no notice.
    pub fn render(&self, style: &dyn NoticeStyle) -> String {
        let mut text = String::new();
        if let Some(sell) = &self.sell {
            text.push_str(&style.bold("TOKEN SELL"));
            text.push_str("\nAmount: ");
            text.push_str(&style.mono(&format!("{} TON", sell.amount)));
            text.push_str("\nFrom: ");
            text.push_str(&style.mono(&sell.source));
            text.push('\n');
        }
        if let Some(buy) = &self.buy {
            text.push_str(&style.bold("TOKEN BUY"));
            text.push_str("\nAmount: ");
            text.push_str(&style.mono(&format!("{} TON", buy.amount)));
            text.push_str("\nTo: ");
            for destination in &buy.destinations {
                text.push_str(&style.mono(destination));
                text.push('\n');
            }
        }
        text
    }
}

/// Markup strategy for rendered notices
pub trait NoticeStyle: Send + Sync {
    /// Emphasized label
    fn bold(&self, text: &str) -> String;

    /// Fixed-width span (amounts, addresses)
    fn mono(&self, text: &str) -> String;
}

/// Telegram MarkdownV2 markup
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownV2Style;

impl NoticeStyle for MarkdownV2Style {
    fn bold(&self, text: &str) -> String {
        format!("*{text}*")
    }

    fn mono(&self, text: &str) -> String {
        format!("`{text}`")
    }
}

/// Markup-free style for logs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyle;

impl NoticeStyle for PlainStyle {
    fn bold(&self, text: &str) -> String {
        text.to_string()
    }

    fn mono(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Classification failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The transaction's outbound message set could not be decoded
    #[error("outbound messages not decoded: {0}")]
    MalformedOutbound(String),
}

/// Classify a transaction's I/O message set into transfer legs.
///
/// The inbound leg counts only an internal inbound message's value; the
/// outbound leg sums internal outbound values while collecting every
/// outbound destination for display.
pub fn classify(tx: &Transaction) -> Result<Classification, ClassifyError> {
    let messages = match &tx.outbound {
        OutboundMessages::Decoded(messages) => messages,
        OutboundMessages::Malformed { reason } => {
            return Err(ClassifyError::MalformedOutbound(reason.clone()))
        }
    };

    let mut destinations = Vec::with_capacity(messages.len());
    let mut out = Coins::zero();
    for message in messages {
        destinations.push(message.destination.clone());
        if message.is_internal() {
            out = out.saturating_add(message.value);
        }
    }

    let sell = match &tx.inbound {
        Some(message) if message.is_internal() && !message.value.is_zero() => Some(SellLeg {
            amount: message.value,
            source: message.source.clone(),
        }),
        _ => None,
    };

    let buy = if out.is_zero() {
        None
    } else {
        Some(BuyLeg {
            amount: out,
            destinations,
        })
    };

    Ok(Classification {
        sell,
        buy,
        tx_hash: tx.hash,
    })
}

/// Kind of a rendered notice, used for logging and metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// SELL block only
    Sell,
    /// BUY block only
    Buy,
    /// Both blocks
    SellBuy,
    /// No value moved, nothing rendered
    Empty,
    /// Outbound set could not be decoded, error text rendered
    Malformed,
}

impl NoticeKind {
    /// Metrics label value
    pub fn as_label(&self) -> &'static str {
        match self {
            NoticeKind::Sell => "sell",
            NoticeKind::Buy => "buy",
            NoticeKind::SellBuy => "sell_buy",
            NoticeKind::Empty => "none",
            NoticeKind::Malformed => "malformed",
        }
    }
}

/// A rendered, transport-ready notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Rendered body; empty when the transaction moved no value
    pub text: String,

    /// Hex-encoded transaction hash for the viewer link; empty when the
    /// outbound set was malformed
    pub tx_hash_hex: String,

    /// Notice kind
    pub kind: NoticeKind,
}

impl Notice {
    /// True when there is nothing to deliver
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Classify and render a transaction in one step.
///
/// A malformed outbound set is reported inline as the notice text with an
/// empty hash, so a single bad transaction never interrupts a run.
pub fn render_notice(tx: &Transaction, style: &dyn NoticeStyle) -> Notice {
    match classify(tx) {
        Ok(classification) => Notice {
            text: classification.render(style),
            tx_hash_hex: tx.hash.to_hex(),
            kind: classification.kind(),
        },
        Err(ClassifyError::MalformedOutbound(reason)) => Notice {
            text: format!("\nOUT MESSAGES NOT PARSED DUE TO ERR: {reason}"),
            tx_hash_hex: String::new(),
            kind: NoticeKind::Malformed,
        },
    }
}
