//! on-chain bridge directory reader
//!
//! the directory contract exposes a single view, `getBridges()`, returning
//! every registered bridge as (address, id, label). asset pairs are not
//! published on-chain, so they are layered in client-side from a table
//! keyed by label; unknown labels list with no pairs rather than being
//! dropped.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::abi::{self, BridgeRow};
use crate::descriptor::{AssetPair, BridgeDescriptor, BridgeSource};
use crate::error::{DirectoryError, Result};
use crate::rpc::JsonRpcClient;
use velum_sdk::{AssetId, EthAddress};

/// default L1 JSON-RPC endpoint (local anvil/hardhat fork)
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// the deployed directory contract, 0x09120eAED8e4cD86D85a616680151DAA653880F2
pub const DEFAULT_DIRECTORY_ADDRESS: EthAddress = EthAddress([
    0x09, 0x12, 0x0e, 0xae, 0xd8, 0xe4, 0xcd, 0x86, 0xd8, 0x5a, 0x61, 0x66, 0x80, 0x15, 0x1d,
    0xaa, 0x65, 0x38, 0x80, 0xf2,
]);

/// reads the bridge listing from the directory contract over JSON-RPC
pub struct BridgeDirectory {
    rpc: JsonRpcClient,
    address: EthAddress,
}

impl BridgeDirectory {
    pub fn new(rpc: JsonRpcClient, address: EthAddress) -> Self {
        Self { rpc, address }
    }
}

#[async_trait::async_trait]
impl BridgeSource for BridgeDirectory {
    async fn list_bridges(&self) -> Result<BTreeMap<String, BridgeDescriptor>> {
        let selector = abi::function_selector("getBridges()");
        let payload = self.rpc.eth_call(self.address, &selector).await?;
        let rows = abi::decode_bridge_rows(&payload)?;
        debug!(count = rows.len(), "fetched bridge directory");
        descriptors_from_rows(rows)
    }
}

fn descriptors_from_rows(rows: Vec<BridgeRow>) -> Result<BTreeMap<String, BridgeDescriptor>> {
    let mut bridges = BTreeMap::new();
    for row in rows {
        let id = u32::try_from(row.id)
            .map_err(|_| DirectoryError::Abi(format!("bridge id {} exceeds u32", row.id)))?;
        let descriptor = BridgeDescriptor {
            name: row.label.clone(),
            id,
            address: row.address,
            asset_pairs: known_asset_pairs(&row.label),
        };
        if bridges.insert(row.label.clone(), descriptor).is_some() {
            warn!(label = %row.label, "duplicate bridge label in directory, keeping latest");
        }
    }
    Ok(bridges)
}

/// pairs for labels the client knows how to route through
fn known_asset_pairs(label: &str) -> Vec<AssetPair> {
    match label {
        "CurveStEthBridge" => vec![
            AssetPair::new(AssetId::ETH, AssetId::WSTETH),
            AssetPair::new(AssetId::WSTETH, AssetId::ETH),
        ],
        _ => Vec::new(),
    }
}
