//! bridge descriptor model and the listing capability

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;
use velum_sdk::{AssetId, EthAddress};

/// one supported conversion direction of a bridge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPair {
    pub input: AssetId,
    pub output: AssetId,
}

impl AssetPair {
    pub fn new(input: AssetId, output: AssetId) -> Self {
        Self { input, output }
    }
}

/// one bridge listed by the directory
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BridgeDescriptor {
    /// human-readable bridge name (the directory label)
    pub name: String,
    /// numeric bridge identifier used in bridge calls
    pub id: u32,
    /// adapter contract address on L1
    pub address: EthAddress,
    /// conversions the bridge supports, where known
    pub asset_pairs: Vec<AssetPair>,
}

/// capability interface for listing available bridges, keyed by name
#[async_trait]
pub trait BridgeSource: Send + Sync {
    async fn list_bridges(&self) -> Result<BTreeMap<String, BridgeDescriptor>>;
}
