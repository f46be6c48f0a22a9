//! fixed bridge listing for devnet mode

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::rollup::CONVERSION_BRIDGE_ID;
use velum_bridges::{AssetPair, BridgeDescriptor, BridgeSource, Result};
use velum_sdk::{AssetId, EthAddress};

/// in-memory [`BridgeSource`] with the demo bridge set
#[derive(Clone, Copy, Default)]
pub struct DevBridgeDirectory;

#[async_trait]
impl BridgeSource for DevBridgeDirectory {
    async fn list_bridges(&self) -> Result<BTreeMap<String, BridgeDescriptor>> {
        let mut bridges = BTreeMap::new();
        bridges.insert(
            "CurveStEthBridge".to_string(),
            BridgeDescriptor {
                name: "CurveStEthBridge".to_string(),
                id: CONVERSION_BRIDGE_ID,
                address: EthAddress([0x06; 20]),
                asset_pairs: vec![
                    AssetPair::new(AssetId::ETH, AssetId::WSTETH),
                    AssetPair::new(AssetId::WSTETH, AssetId::ETH),
                ],
            },
        );
        // listed but not routable from the devnet rollup
        bridges.insert(
            "ElementBridge".to_string(),
            BridgeDescriptor {
                name: "ElementBridge".to_string(),
                id: 1,
                address: EthAddress([0x01; 20]),
                asset_pairs: Vec::new(),
            },
        );
        Ok(bridges)
    }
}
