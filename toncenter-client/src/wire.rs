//! Toncenter wire format and conversion into core types
//!
//! Amounts arrive as decimal strings, hashes as base64, logical times as
//! decimal strings. A conversion failure inside a transaction's outbound set
//! becomes [`OutboundMessages::Malformed`] so a single bad transaction never
//! interrupts a run; failures in the transaction envelope itself surface as
//! errors.

use crate::error::{Error, Result};
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;
use chrono::DateTime;
use observer_core::{Coins, MessageKind, OutboundMessages, Transaction, TxHash, TxLocator, TxMessage};
use serde::Deserialize;

/// Response envelope shared by every API method
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub error: Option<String>,
    pub code: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MasterchainInfo {
    pub last: BlockIdExt,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BlockIdExt {
    pub seqno: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddressInformation {
    pub balance: String,
    pub last_transaction_id: TransactionId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransactionId {
    pub lt: String,
    pub hash: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTransaction {
    pub utime: i64,
    pub transaction_id: TransactionId,
    pub in_msg: Option<RawMessage>,
    #[serde(default)]
    pub out_msgs: Vec<RawMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMessage {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default = "zero_value")]
    pub value: String,
}

fn zero_value() -> String {
    "0".to_string()
}

impl TransactionId {
    /// Locator for a non-zero transaction id; `None` for fresh accounts
    pub(crate) fn to_locator(&self) -> Result<Option<TxLocator>> {
        let lt: u64 = self
            .lt
            .parse()
            .map_err(|e| Error::Decode(format!("lt {:?}: {e}", self.lt)))?;
        if lt == 0 {
            return Ok(None);
        }
        Ok(Some(TxLocator::new(lt, decode_hash(&self.hash)?)))
    }
}

pub(crate) fn decode_hash(encoded: &str) -> Result<TxHash> {
    let bytes = STANDARD
        .decode(encoded)
        .or_else(|_| URL_SAFE.decode(encoded))
        .map_err(|e| Error::Decode(format!("hash {encoded:?}: {e}")))?;
    TxHash::from_slice(&bytes).map_err(|e| Error::Decode(e.to_string()))
}

pub(crate) fn encode_hash(hash: &TxHash) -> String {
    STANDARD.encode(hash.as_bytes())
}

fn convert_message(raw: RawMessage) -> Result<TxMessage> {
    let value =
        Coins::from_dec_str(&raw.value).map_err(|e| Error::Decode(e.to_string()))?;
    // external messages carry an empty address on the off-chain side
    let kind = if !raw.source.is_empty() && !raw.destination.is_empty() {
        MessageKind::Internal
    } else if raw.source.is_empty() {
        MessageKind::ExternalIn
    } else {
        MessageKind::ExternalOut
    };
    Ok(TxMessage {
        kind,
        source: raw.source,
        destination: raw.destination,
        value,
    })
}

pub(crate) fn convert_transaction(raw: RawTransaction) -> Result<Transaction> {
    let lt: u64 = raw
        .transaction_id
        .lt
        .parse()
        .map_err(|e| Error::Decode(format!("lt {:?}: {e}", raw.transaction_id.lt)))?;
    let hash = decode_hash(&raw.transaction_id.hash)?;
    let timestamp = DateTime::from_timestamp(raw.utime, 0)
        .ok_or_else(|| Error::Decode(format!("utime {} out of range", raw.utime)))?;

    let inbound = raw.in_msg.map(convert_message).transpose()?;

    let outbound = match raw
        .out_msgs
        .into_iter()
        .map(convert_message)
        .collect::<Result<Vec<_>>>()
    {
        Ok(messages) => OutboundMessages::Decoded(messages),
        Err(e) => OutboundMessages::Malformed {
            reason: e.to_string(),
        },
    };

    Ok(Transaction {
        lt,
        hash,
        timestamp,
        inbound,
        outbound,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_hash() -> String {
        STANDARD.encode([7u8; 32])
    }

    fn raw_tx(json: serde_json::Value) -> RawTransaction {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_convert_internal_transfer() {
        let tx = convert_transaction(raw_tx(serde_json::json!({
            "utime": 1_700_000_000,
            "transaction_id": { "lt": "41537171000003", "hash": sample_hash() },
            "in_msg": {
                "source": "EQSrc",
                "destination": "EQTreasury",
                "value": "1000000000"
            },
            "out_msgs": []
        })))
        .unwrap();

        assert_eq!(tx.lt, 41_537_171_000_003);
        assert_eq!(tx.hash, TxHash::new([7; 32]));
        let inbound = tx.inbound.unwrap();
        assert_eq!(inbound.kind, MessageKind::Internal);
        assert_eq!(inbound.value, Coins::from_nano(1_000_000_000u64));
        assert!(matches!(tx.outbound, OutboundMessages::Decoded(ref m) if m.is_empty()));
    }

    #[test]
    fn test_external_in_message_has_no_value_class() {
        let tx = convert_transaction(raw_tx(serde_json::json!({
            "utime": 1_700_000_000,
            "transaction_id": { "lt": "10", "hash": sample_hash() },
            "in_msg": { "source": "", "destination": "EQTreasury", "value": "0" },
            "out_msgs": []
        })))
        .unwrap();

        assert_eq!(tx.inbound.unwrap().kind, MessageKind::ExternalIn);
    }

    #[test]
    fn test_external_out_message_keeps_empty_destination() {
        let tx = convert_transaction(raw_tx(serde_json::json!({
            "utime": 1_700_000_000,
            "transaction_id": { "lt": "10", "hash": sample_hash() },
            "in_msg": null,
            "out_msgs": [
                { "source": "EQTreasury", "destination": "", "value": "0" },
                { "source": "EQTreasury", "destination": "EQDst", "value": "250000000" }
            ]
        })))
        .unwrap();

        let OutboundMessages::Decoded(messages) = tx.outbound else {
            panic!("expected decoded outbound set");
        };
        assert_eq!(messages[0].kind, MessageKind::ExternalOut);
        assert_eq!(messages[0].destination, "");
        assert_eq!(messages[1].kind, MessageKind::Internal);
    }

    #[test]
    fn test_bad_outbound_value_marks_set_malformed() {
        let tx = convert_transaction(raw_tx(serde_json::json!({
            "utime": 1_700_000_000,
            "transaction_id": { "lt": "10", "hash": sample_hash() },
            "in_msg": null,
            "out_msgs": [
                { "source": "EQTreasury", "destination": "EQDst", "value": "not-a-number" }
            ]
        })))
        .unwrap();

        assert!(matches!(tx.outbound, OutboundMessages::Malformed { .. }));
    }

    #[test]
    fn test_bad_transaction_lt_is_an_error() {
        let result = convert_transaction(raw_tx(serde_json::json!({
            "utime": 1_700_000_000,
            "transaction_id": { "lt": "xyz", "hash": sample_hash() },
            "in_msg": null,
            "out_msgs": []
        })));
        assert!(result.is_err());
    }

    #[test]
    fn test_transaction_id_zero_lt_means_fresh_account() {
        let id = TransactionId {
            lt: "0".to_string(),
            hash: STANDARD.encode([0u8; 32]),
        };
        assert!(id.to_locator().unwrap().is_none());
    }

    #[test]
    fn test_hash_roundtrip() {
        let hash = TxHash::new([0xab; 32]);
        assert_eq!(decode_hash(&encode_hash(&hash)).unwrap(), hash);
    }
}
