//! identifier types shared across the workspace

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ClientError, Result};

/// 20-byte L1 address (wallet account or contract), 0x-prefixed hex in text form
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EthAddress(pub [u8; 20]);

impl EthAddress {
    pub fn from_hex(s: &str) -> Result<Self> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)
            .map_err(|e| ClientError::InvalidAddress(format!("bad hex: {e}")))?;
        let arr: [u8; 20] = bytes
            .try_into()
            .map_err(|_| ClientError::InvalidAddress(format!("must be 20 bytes: {s}")))?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl FromStr for EthAddress {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

/// opaque handle for a user session held by the rollup client
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// rollup transaction identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId(pub [u8; 32]);

impl TxId {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// rollup asset identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u32);

impl AssetId {
    /// ETH always occupies slot 0 on the rollup
    pub const ETH: AssetId = AssetId(0);
    /// wstETH, the second asset the demo displays
    pub const WSTETH: AssetId = AssetId(2);
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// settlement-speed preference for value-moving transactions
///
/// instant settlement pays for immediate rollup inclusion; next-rollup
/// waits for the batch and is cheaper. the demo flows pin instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Settlement {
    #[default]
    Instant,
    NextRollup,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_address_roundtrip() {
        let addr = EthAddress::from_hex("0x09120eaed8e4cd86d85a616680151daa653880f2").unwrap();
        assert_eq!(addr.to_string(), "0x09120eaed8e4cd86d85a616680151daa653880f2");

        // prefix is optional on parse
        let bare = EthAddress::from_hex("09120eaed8e4cd86d85a616680151daa653880f2").unwrap();
        assert_eq!(addr, bare);
    }

    #[test]
    fn test_wallet_address_rejects_bad_input() {
        assert!(EthAddress::from_hex("0x1234").is_err());
        assert!(EthAddress::from_hex("not hex at all").is_err());
        assert!(EthAddress::from_hex("").is_err());
    }

    #[test]
    fn test_tx_id_display() {
        let tx = TxId([0xab; 32]);
        let s = tx.to_string();
        assert!(s.starts_with("0x"));
        assert_eq!(s.len(), 2 + 64);
    }

    #[test]
    fn test_settlement_default_is_instant() {
        assert_eq!(Settlement::default(), Settlement::Instant);
    }
}
