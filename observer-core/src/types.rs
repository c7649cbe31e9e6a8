//! Core types for the observer
//!
//! All types are designed for:
//! - Exact arithmetic (256-bit integers for on-chain amounts)
//! - Fail-fast validation at the input boundary (account addresses)
//! - Deterministic serialization (decimal strings for amounts, hex for hashes)

use crate::error::{Error, Result};
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;
use chrono::{DateTime, Utc};
use primitive_types::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Nanotons per TON
pub const NANO_PER_TON: u64 = 1_000_000_000;

/// Byte length of a decoded user-friendly address (tag + workchain + hash + crc)
const ADDRESS_DECODED_LEN: usize = 36;

/// Character length of a user-friendly address
const ADDRESS_ENCODED_LEN: usize = 48;

/// Validated account address in the network's user-friendly form.
///
/// Message-level source/destination addresses stay opaque strings supplied by
/// the ledger collaborator; this type guards only operator-supplied input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountAddress {
    repr: String,
}

impl AccountAddress {
    /// Parse and validate a user-friendly address.
    ///
    /// Accepts both the base64url and classic base64 alphabets. The decoded
    /// form must be 36 bytes: a tag byte (bounceable 0x11 or non-bounceable
    /// 0x51, optionally with the testnet flag 0x80), a workchain byte
    /// (basechain 0x00 or masterchain 0xff), a 32-byte account hash and a
    /// big-endian CRC16/XMODEM checksum of the preceding 34 bytes.
    pub fn parse(s: &str) -> Result<Self> {
        if s.len() != ADDRESS_ENCODED_LEN {
            return Err(Error::InvalidAddress(format!(
                "expected {} characters, got {}",
                ADDRESS_ENCODED_LEN,
                s.len()
            )));
        }

        let decoded = URL_SAFE
            .decode(s)
            .or_else(|_| STANDARD.decode(s))
            .map_err(|e| Error::InvalidAddress(format!("base64 decode failed: {e}")))?;

        if decoded.len() != ADDRESS_DECODED_LEN {
            return Err(Error::InvalidAddress(format!(
                "expected {} decoded bytes, got {}",
                ADDRESS_DECODED_LEN,
                decoded.len()
            )));
        }

        let tag = decoded[0] & 0x7f; // mask the testnet-only flag
        if tag != 0x11 && tag != 0x51 {
            return Err(Error::InvalidAddress(format!(
                "unknown address tag 0x{:02x}",
                decoded[0]
            )));
        }

        let workchain = decoded[1];
        if workchain != 0x00 && workchain != 0xff {
            return Err(Error::InvalidAddress(format!(
                "unsupported workchain 0x{workchain:02x}"
            )));
        }

        let expected = u16::from_be_bytes([decoded[34], decoded[35]]);
        let actual = crc16_xmodem(&decoded[..34]);
        if expected != actual {
            return Err(Error::InvalidAddress("checksum mismatch".to_string()));
        }

        Ok(Self {
            repr: s.to_string(),
        })
    }

    /// Address in its original user-friendly form
    pub fn as_str(&self) -> &str {
        &self.repr
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.repr)
    }
}

impl FromStr for AccountAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.repr)
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// CRC16/XMODEM (poly 0x1021, init 0), as used by user-friendly addresses
fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Token amount in nanotons.
///
/// Backed by a 256-bit integer: on-chain values can exceed the 64-bit range,
/// and display conversion must be exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Coins(U256);

impl Coins {
    /// Zero amount
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    /// Amount from a nanoton count
    pub fn from_nano(nano: impl Into<U256>) -> Self {
        Self(nano.into())
    }

    /// Amount from a decimal nanoton string (the chain API wire form)
    pub fn from_dec_str(s: &str) -> Result<Self> {
        U256::from_dec_str(s)
            .map(Self)
            .map_err(|e| Error::InvalidAmount(format!("{s:?}: {e:?}")))
    }

    /// Raw nanoton count
    pub fn nano(&self) -> U256 {
        self.0
    }

    /// True for the zero amount
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Saturating addition
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Coins {
    /// Exact decimal expansion in TON, trailing zeros trimmed
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let divisor = U256::from(NANO_PER_TON);
        let whole = self.0 / divisor;
        let frac = (self.0 % divisor).as_u64();
        if frac == 0 {
            write!(f, "{whole}")
        } else {
            let mut digits = format!("{frac:09}");
            while digits.ends_with('0') {
                digits.pop();
            }
            write!(f, "{whole}.{digits}")
        }
    }
}

impl Serialize for Coins {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Coins {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_dec_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Stable 32-byte content hash of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TxHash([u8; 32]);

impl TxHash {
    /// Hash from its raw bytes
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Hash from a byte slice, validating the length
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::InvalidHash(format!("expected 32 bytes, got {}", bytes.len())))?;
        Ok(Self(bytes))
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex encoding, as used in viewer links
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for TxHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for TxHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        Self::from_slice(&bytes).map_err(serde::de::Error::custom)
    }
}

/// Locator of a transaction in an account's log: logical time plus hash.
///
/// Used as the resumption cursor for live tailing and as the pagination
/// cursor for historical listing. The default value (lt 0) addresses the
/// start of the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TxLocator {
    /// Logical time, monotonic within an account
    pub lt: u64,

    /// Transaction content hash
    pub hash: TxHash,
}

impl TxLocator {
    /// Locator from its parts
    pub fn new(lt: u64, hash: TxHash) -> Self {
        Self { lt, hash }
    }
}

impl fmt::Display for TxLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lt, self.hash)
    }
}

/// Message direction and value class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// Value-bearing message between two accounts on the network
    Internal,
    /// Message entering the network from outside (no value)
    ExternalIn,
    /// Message leaving the network (logs/events, no value)
    ExternalOut,
}

/// One message of a transaction's I/O set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxMessage {
    /// Message kind
    pub kind: MessageKind,

    /// Source address as reported by the ledger (may be empty for external)
    pub source: String,

    /// Destination address as reported by the ledger (may be empty for external)
    pub destination: String,

    /// Attached value in nanotons; zero for non-internal messages
    pub value: Coins,
}

impl TxMessage {
    /// True for internal, value-bearing messages
    pub fn is_internal(&self) -> bool {
        self.kind == MessageKind::Internal
    }
}

/// Outbound message set of a transaction.
///
/// Decoding happens in the ledger collaborator and can fail for a single
/// transaction without failing the stream; the failure is carried inline so
/// the classifier can report it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutboundMessages {
    /// Successfully decoded messages, in original order
    Decoded(Vec<TxMessage>),

    /// The set could not be decoded
    Malformed {
        /// Decoder diagnostic
        reason: String,
    },
}

impl Default for OutboundMessages {
    fn default() -> Self {
        Self::Decoded(Vec::new())
    }
}

/// A single account transaction as supplied by the ledger collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Logical time assigned by the ledger
    pub lt: u64,

    /// Content hash
    pub hash: TxHash,

    /// Block time of the transaction
    pub timestamp: DateTime<Utc>,

    /// Inbound message, if any
    pub inbound: Option<TxMessage>,

    /// Outbound message set
    pub outbound: OutboundMessages,
}

impl Transaction {
    /// Locator of this transaction
    pub fn locator(&self) -> TxLocator {
        TxLocator::new(self.lt, self.hash)
    }
}

/// Most recently finalized masterchain block reference.
///
/// Required to issue consistent state queries; otherwise opaque to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainHead {
    /// Masterchain block sequence number
    pub seqno: u32,
}

/// Account state as resolved against a chain head
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountState {
    /// Current balance in nanotons
    pub balance: Coins,

    /// Locator of the account's last transaction; `None` for fresh accounts
    pub last_tx: Option<TxLocator>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREASURY: &str = "EQCXwWAyDG_IhRh6CzPSetvgGecywZBU3YNCawmz03Uk25RG";

    #[test]
    fn test_parse_valid_address() {
        let addr = AccountAddress::parse(TREASURY).unwrap();
        assert_eq!(addr.as_str(), TREASURY);
        assert_eq!(addr.to_string(), TREASURY);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(AccountAddress::parse("EQCXwWAy").is_err());
        assert!(AccountAddress::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_charset() {
        let bad = format!("{}!", &TREASURY[..47]);
        assert!(AccountAddress::parse(&bad).is_err());
    }

    #[test]
    fn test_parse_rejects_corrupted_checksum() {
        let mut corrupted = TREASURY.to_string();
        corrupted.pop();
        corrupted.push('H');
        assert!(AccountAddress::parse(&corrupted).is_err());
    }

    #[test]
    fn test_coins_display_whole() {
        assert_eq!(Coins::from_nano(1_000_000_000u64).to_string(), "1");
        assert_eq!(Coins::from_nano(25_000_000_000u64).to_string(), "25");
        assert_eq!(Coins::zero().to_string(), "0");
    }

    #[test]
    fn test_coins_display_fractional() {
        assert_eq!(Coins::from_nano(750_000_000u64).to_string(), "0.75");
        assert_eq!(Coins::from_nano(1u64).to_string(), "0.000000001");
        assert_eq!(Coins::from_nano(1_500_000_001u64).to_string(), "1.500000001");
    }

    #[test]
    fn test_coins_display_beyond_u64() {
        // 12345678901234567890 TON and change: wider than any 64-bit integer
        let coins = Coins::from_dec_str("12345678901234567890123456789").unwrap();
        assert_eq!(coins.to_string(), "12345678901234567890.123456789");
    }

    #[test]
    fn test_coins_serde_decimal_string() {
        let coins = Coins::from_nano(500_000_000u64);
        let json = serde_json::to_string(&coins).unwrap();
        assert_eq!(json, "\"500000000\"");
        let back: Coins = serde_json::from_str(&json).unwrap();
        assert_eq!(back, coins);
    }

    #[test]
    fn test_tx_hash_hex() {
        let hash = TxHash::new([0xab; 32]);
        assert_eq!(hash.to_hex(), "ab".repeat(32));
        assert!(TxHash::from_slice(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_locator_default_addresses_log_start() {
        let locator = TxLocator::default();
        assert_eq!(locator.lt, 0);
        assert_eq!(locator.hash, TxHash::default());
    }
}
