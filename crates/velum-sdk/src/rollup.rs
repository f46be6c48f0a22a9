//! rollup client capability boundary
//!
//! the external client owns key generation, proof construction, note
//! encryption and chain synchronization. this trait is the narrow surface
//! the orchestration layer calls through, so the concrete client can be
//! swapped for the in-memory devnet double in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::keys::{
    AccountKeyPair, AccountPublicKey, AccountSecretKey, SpendingKeyPair, SpendingPublicKey,
    SpendingSecretKey, SpendingSigner,
};
use crate::types::{AssetId, EthAddress, Settlement, TxId, UserId};

/// parameters for registering an alias against an account
///
/// carries the privacy secret because the client constructs the
/// registration proof locally; nothing here is serialized.
#[derive(Clone, Debug)]
pub struct RegisterAccount {
    pub account_public_key: AccountPublicKey,
    pub alias: String,
    pub account_secret_key: AccountSecretKey,
    pub spending_public_key: SpendingPublicKey,
    /// asset funding the registration deposit, by symbol
    pub funding_symbol: String,
    /// funding quantity in base units; zero is rejected by the client
    pub funding_quantity: u128,
    pub settlement: Settlement,
    /// L1 wallet paying the deposit and fee
    pub fee_payer: EthAddress,
}

/// parameters for shielding ETH onto the rollup
#[derive(Clone, Debug)]
pub struct DepositRequest {
    /// L1 wallet the funds leave from
    pub from: EthAddress,
    /// privacy account receiving the shielded note
    pub to: AccountPublicKey,
    /// quantity in base units; zero is rejected by the client
    pub quantity: u128,
    pub settlement: Settlement,
}

/// parameters for a cross-protocol bridge call
#[derive(Clone, Debug)]
pub struct BridgeCall {
    pub user: UserId,
    pub signer: SpendingSigner,
    /// numeric identifier of the bridge to route through
    pub bridge_id: u32,
    /// input quantity in base units
    pub input_quantity: u128,
    pub input_symbol: String,
    pub output_symbol: String,
    /// minimum acceptable output per unit of input, as a 1e18-scaled price
    pub min_output_ratio: u128,
    pub settlement: Settlement,
}

/// asynchronous, fallible surface of the external rollup client
#[async_trait]
pub trait RollupClient: Send + Sync {
    /// block until the client has caught up with the rollup chain
    async fn await_synchronised(&self) -> Result<()>;

    /// derive the privacy keypair for a wallet; deterministic per address
    async fn generate_account_key_pair(&self, wallet: EthAddress) -> Result<AccountKeyPair>;

    /// derive the spending keypair for a wallet; deterministic per address
    async fn generate_spending_key_pair(&self, wallet: EthAddress) -> Result<SpendingKeyPair>;

    /// build the signer capability from a spending secret
    async fn create_spending_signer(&self, secret: SpendingSecretKey) -> Result<SpendingSigner>;

    /// has this account key been registered on the rollup?
    async fn is_account_registered(&self, account_key: &AccountPublicKey) -> Result<bool>;

    /// does a local user session exist for this account key?
    async fn user_exists(&self, account_key: &AccountPublicKey) -> Result<bool>;

    /// fetch the existing local user for an account key
    async fn get_user(&self, account_key: &AccountPublicKey) -> Result<UserId>;

    /// create a local user session from the privacy secret
    async fn add_user(&self, account_secret: &AccountSecretKey) -> Result<UserId>;

    /// register alias + spending key, funding the account in one shot
    async fn register_account(&self, request: RegisterAccount) -> Result<TxId>;

    /// shield L1 ETH into the recipient's account
    async fn deposit(&self, request: DepositRequest) -> Result<TxId>;

    /// route value through a bridge with a slippage floor
    async fn bridge_call(&self, request: BridgeCall) -> Result<TxId>;

    /// block until the user's decrypted note data is current
    async fn await_user_synchronised(&self, user: UserId) -> Result<()>;

    /// base-unit balance of one asset
    async fn balance(&self, user: UserId, asset: AssetId) -> Result<u128>;

    /// resolve an asset symbol ("eth" is always asset 0)
    async fn asset_id_by_symbol(&self, symbol: &str) -> Result<AssetId>;
}
