//! in-memory rollup client
//!
//! deterministic double for the external rollup client: blake3
//! domain-separated key derivation from the wallet address, an alias
//! registry, a per-(user, asset) base-unit ledger and a fixed-price
//! ETH→wstETH conversion bridge. every value-moving call is recorded so
//! tests can assert on exactly what the orchestration layer sent.
//!
//! failure injection: [`DevRollup::decline_next_signature`] makes the
//! next key derivation fail the way a wallet rejection does,
//! [`DevRollup::set_synchronised`] parks the client out of sync, and
//! [`DevRollup::set_bridge_price`] moves the conversion rate.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use tokio::sync::RwLock;
use tracing::debug;

use velum_sdk::{
    AccountKeyPair, AccountPublicKey, AccountSecretKey, AssetId, BridgeCall, ClientError,
    DepositRequest, EthAddress, RegisterAccount, Result, RollupClient, RollupConfig,
    SpendingKeyPair, SpendingPublicKey, SpendingSecretKey, SpendingSigner, TxId, UserId,
};

const ACCOUNT_KEY_DOMAIN: &[u8] = b"velum.account-key.v1";
const ACCOUNT_PUB_DOMAIN: &[u8] = b"velum.account-pub.v1";
const SPENDING_KEY_DOMAIN: &[u8] = b"velum.spending-key.v1";
const TX_DOMAIN: &[u8] = b"velum.devnet-tx.v1";
const BRIDGE_SIG_DOMAIN: &[u8] = b"velum.bridge-call.v1";

/// the one bridge the devnet routes, ETH→wstETH
pub const CONVERSION_BRIDGE_ID: u32 = 6;

/// default wstETH-per-ETH conversion price, 1e18-scaled (1:1)
pub const DEFAULT_BRIDGE_PRICE: u128 = 1_000_000_000_000_000_000;

const RATIO_SCALE: u128 = 1_000_000_000_000_000_000;

#[derive(Default)]
struct DevState {
    unsynchronised: bool,
    decline_next_signature: bool,
    bridge_price: u128,
    registered: HashSet<AccountPublicKey>,
    aliases: HashMap<String, AccountPublicKey>,
    users: HashMap<AccountPublicKey, UserId>,
    balances: HashMap<(UserId, AssetId), u128>,
    next_user: u64,
    nonce: u64,
    last_register: Option<RegisterAccount>,
    last_deposit: Option<DepositRequest>,
    last_bridge: Option<BridgeCall>,
}

/// in-memory [`RollupClient`] double
#[derive(Clone)]
pub struct DevRollup {
    config: Arc<RollupConfig>,
    state: Arc<RwLock<DevState>>,
}

impl Default for DevRollup {
    fn default() -> Self {
        Self::new()
    }
}

impl DevRollup {
    /// double with the default devnet configuration
    pub fn new() -> Self {
        Self::with_config(RollupConfig::devnet())
    }

    /// double tied to the given configuration; the configured server
    /// url is echoed in synchronization failures
    pub fn with_config(config: RollupConfig) -> Self {
        debug!(server = %config.server_url, "devnet rollup ready");
        let state = DevState {
            bridge_price: DEFAULT_BRIDGE_PRICE,
            next_user: 1,
            ..DevState::default()
        };
        Self {
            config: Arc::new(config),
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// configuration the double was built with
    pub fn config(&self) -> &RollupConfig {
        &self.config
    }

    /// the next key derivation fails as if the wallet refused to sign
    pub async fn decline_next_signature(&self) {
        self.state.write().await.decline_next_signature = true;
    }

    /// park the client out of (or back in) sync
    pub async fn set_synchronised(&self, synchronised: bool) {
        self.state.write().await.unsynchronised = !synchronised;
    }

    /// move the conversion price, 1e18-scaled wstETH per ETH
    pub async fn set_bridge_price(&self, price: u128) {
        self.state.write().await.bridge_price = price;
    }

    /// last register call the double accepted
    pub async fn recorded_register(&self) -> Option<RegisterAccount> {
        self.state.read().await.last_register.clone()
    }

    /// last deposit the double accepted
    pub async fn recorded_deposit(&self) -> Option<DepositRequest> {
        self.state.read().await.last_deposit.clone()
    }

    /// last bridge call the double accepted
    pub async fn recorded_bridge(&self) -> Option<BridgeCall> {
        self.state.read().await.last_bridge.clone()
    }

    async fn take_decline(&self) -> Result<()> {
        let mut state = self.state.write().await;
        if state.decline_next_signature {
            state.decline_next_signature = false;
            return Err(ClientError::WalletDeclined);
        }
        Ok(())
    }

    fn out_of_sync(&self) -> ClientError {
        ClientError::Unavailable(format!(
            "rollup client at {} out of sync",
            self.config.server_url
        ))
    }
}

fn derive_secret(domain: &[u8], material: &[u8]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(domain);
    hasher.update(material);
    *hasher.finalize().as_bytes()
}

fn account_public_from_secret(secret: &AccountSecretKey) -> AccountPublicKey {
    let mut hasher = blake3::Hasher::new();
    hasher.update(ACCOUNT_PUB_DOMAIN);
    hasher.update(secret.expose());
    AccountPublicKey(*hasher.finalize().as_bytes())
}

fn spending_public_from_secret(secret: &SpendingSecretKey) -> SpendingPublicKey {
    let signing_key = SigningKey::from_bytes(secret.expose());
    SpendingPublicKey(signing_key.verifying_key().to_bytes())
}

fn quote_output(input: u128, price: u128) -> Result<u128> {
    input
        .checked_mul(price)
        .map(|scaled| scaled / RATIO_SCALE)
        .ok_or_else(|| ClientError::InvalidAmount("bridge quote overflow".into()))
}

fn mint_tx_id(state: &mut DevState, parts: &[&[u8]]) -> TxId {
    state.nonce += 1;
    let mut hasher = blake3::Hasher::new();
    hasher.update(TX_DOMAIN);
    hasher.update(&state.nonce.to_le_bytes());
    for part in parts {
        hasher.update(part);
    }
    TxId(*hasher.finalize().as_bytes())
}

fn user_known(state: &DevState, user: UserId) -> bool {
    state.users.values().any(|known| *known == user)
}

#[async_trait]
impl RollupClient for DevRollup {
    async fn await_synchronised(&self) -> Result<()> {
        if self.state.read().await.unsynchronised {
            return Err(self.out_of_sync());
        }
        Ok(())
    }

    async fn generate_account_key_pair(&self, wallet: EthAddress) -> Result<AccountKeyPair> {
        self.take_decline().await?;
        let secret_key =
            AccountSecretKey::from_bytes(derive_secret(ACCOUNT_KEY_DOMAIN, wallet.as_bytes()));
        let public_key = account_public_from_secret(&secret_key);
        Ok(AccountKeyPair {
            public_key,
            secret_key,
        })
    }

    async fn generate_spending_key_pair(&self, wallet: EthAddress) -> Result<SpendingKeyPair> {
        self.take_decline().await?;
        let secret_key =
            SpendingSecretKey::from_bytes(derive_secret(SPENDING_KEY_DOMAIN, wallet.as_bytes()));
        let public_key = spending_public_from_secret(&secret_key);
        Ok(SpendingKeyPair {
            public_key,
            secret_key,
        })
    }

    async fn create_spending_signer(&self, secret: SpendingSecretKey) -> Result<SpendingSigner> {
        let public_key = spending_public_from_secret(&secret);
        Ok(SpendingSigner::new(public_key, secret))
    }

    async fn is_account_registered(&self, account_key: &AccountPublicKey) -> Result<bool> {
        Ok(self.state.read().await.registered.contains(account_key))
    }

    async fn user_exists(&self, account_key: &AccountPublicKey) -> Result<bool> {
        Ok(self.state.read().await.users.contains_key(account_key))
    }

    async fn get_user(&self, account_key: &AccountPublicKey) -> Result<UserId> {
        self.state
            .read()
            .await
            .users
            .get(account_key)
            .copied()
            .ok_or(ClientError::UnknownUser)
    }

    async fn add_user(&self, account_secret: &AccountSecretKey) -> Result<UserId> {
        let public_key = account_public_from_secret(account_secret);
        let mut state = self.state.write().await;
        if let Some(existing) = state.users.get(&public_key) {
            // re-adding recovers the existing session
            return Ok(*existing);
        }
        let user = UserId(state.next_user);
        state.next_user += 1;
        state.users.insert(public_key, user);
        debug!(%user, account = %public_key, "added user");
        Ok(user)
    }

    async fn register_account(&self, request: RegisterAccount) -> Result<TxId> {
        if request.funding_quantity == 0 {
            return Err(ClientError::InvalidAmount(
                "registration funding must be positive".into(),
            ));
        }
        let derived = account_public_from_secret(&request.account_secret_key);
        if derived != request.account_public_key {
            return Err(ClientError::Unavailable(
                "account secret does not match account key".into(),
            ));
        }

        let funding_asset = self.asset_id_by_symbol(&request.funding_symbol).await?;

        let mut state = self.state.write().await;
        if state.registered.contains(&request.account_public_key) {
            return Err(ClientError::AlreadyRegistered);
        }
        if let Some(owner) = state.aliases.get(&request.alias) {
            if *owner != request.account_public_key {
                return Err(ClientError::AliasTaken(request.alias.clone()));
            }
            return Err(ClientError::AlreadyRegistered);
        }
        let user = *state
            .users
            .get(&request.account_public_key)
            .ok_or(ClientError::UnknownUser)?;

        let slot = state.balances.entry((user, funding_asset)).or_insert(0);
        *slot = slot
            .checked_add(request.funding_quantity)
            .ok_or_else(|| ClientError::InvalidAmount("balance overflow".into()))?;
        state
            .aliases
            .insert(request.alias.clone(), request.account_public_key);
        state.registered.insert(request.account_public_key);

        let tx = mint_tx_id(
            &mut state,
            &[
                request.alias.as_bytes(),
                request.account_public_key.as_bytes(),
                &request.funding_quantity.to_le_bytes(),
            ],
        );
        debug!(alias = %request.alias, %user, %tx, "registered account");
        state.last_register = Some(request);
        Ok(tx)
    }

    async fn deposit(&self, request: DepositRequest) -> Result<TxId> {
        if request.quantity == 0 {
            return Err(ClientError::InvalidAmount(
                "deposit quantity must be positive".into(),
            ));
        }

        let mut state = self.state.write().await;
        let user = *state
            .users
            .get(&request.to)
            .ok_or(ClientError::UnknownUser)?;
        let slot = state.balances.entry((user, AssetId::ETH)).or_insert(0);
        *slot = slot
            .checked_add(request.quantity)
            .ok_or_else(|| ClientError::InvalidAmount("balance overflow".into()))?;

        let tx = mint_tx_id(
            &mut state,
            &[
                request.from.as_bytes(),
                request.to.as_bytes(),
                &request.quantity.to_le_bytes(),
            ],
        );
        debug!(%user, quantity = request.quantity, %tx, "shielded deposit");
        state.last_deposit = Some(request);
        Ok(tx)
    }

    async fn bridge_call(&self, request: BridgeCall) -> Result<TxId> {
        if request.input_quantity == 0 {
            return Err(ClientError::InvalidAmount(
                "bridge quantity must be positive".into(),
            ));
        }
        if request.bridge_id != CONVERSION_BRIDGE_ID {
            return Err(ClientError::Unavailable(format!(
                "unknown bridge id {}",
                request.bridge_id
            )));
        }
        let input = self.asset_id_by_symbol(&request.input_symbol).await?;
        let output = self.asset_id_by_symbol(&request.output_symbol).await?;
        if (input, output) != (AssetId::ETH, AssetId::WSTETH) {
            return Err(ClientError::Unavailable(format!(
                "bridge {CONVERSION_BRIDGE_ID} does not route {} -> {}",
                request.input_symbol, request.output_symbol
            )));
        }

        // the real client signs the join-split with the spending key;
        // here the signer proves itself with one ed25519 round trip
        let mut preimage = Vec::new();
        preimage.extend_from_slice(BRIDGE_SIG_DOMAIN);
        preimage.extend_from_slice(&request.user.0.to_le_bytes());
        preimage.extend_from_slice(&request.bridge_id.to_le_bytes());
        preimage.extend_from_slice(&request.input_quantity.to_le_bytes());
        let signing_key = SigningKey::from_bytes(request.signer.secret().expose());
        let signature: Signature = signing_key.sign(&preimage);
        let verifying_key = VerifyingKey::from_bytes(request.signer.public_key().as_bytes())
            .map_err(|_| ClientError::Unavailable("spending signature rejected".into()))?;
        verifying_key
            .verify(&preimage, &signature)
            .map_err(|_| ClientError::Unavailable("spending signature rejected".into()))?;

        let mut state = self.state.write().await;
        if !user_known(&state, request.user) {
            return Err(ClientError::UnknownUser);
        }
        let have = state
            .balances
            .get(&(request.user, input))
            .copied()
            .unwrap_or(0);
        if have < request.input_quantity {
            return Err(ClientError::InsufficientBalance {
                have,
                need: request.input_quantity,
            });
        }
        if state.bridge_price < request.min_output_ratio {
            return Err(ClientError::SlippageExceeded {
                quoted: state.bridge_price,
                floor: request.min_output_ratio,
            });
        }

        let quoted = quote_output(request.input_quantity, state.bridge_price)?;
        state
            .balances
            .insert((request.user, input), have - request.input_quantity);
        let out_slot = state.balances.entry((request.user, output)).or_insert(0);
        *out_slot = out_slot
            .checked_add(quoted)
            .ok_or_else(|| ClientError::InvalidAmount("balance overflow".into()))?;

        let tx = mint_tx_id(
            &mut state,
            &[
                &request.user.0.to_le_bytes(),
                &request.bridge_id.to_le_bytes(),
                &request.input_quantity.to_le_bytes(),
            ],
        );
        debug!(
            user = %request.user,
            input = request.input_quantity,
            output = quoted,
            %tx,
            "bridged"
        );
        state.last_bridge = Some(request);
        Ok(tx)
    }

    async fn await_user_synchronised(&self, user: UserId) -> Result<()> {
        let state = self.state.read().await;
        if state.unsynchronised {
            return Err(self.out_of_sync());
        }
        if !user_known(&state, user) {
            return Err(ClientError::UnknownUser);
        }
        Ok(())
    }

    async fn balance(&self, user: UserId, asset: AssetId) -> Result<u128> {
        let state = self.state.read().await;
        if !user_known(&state, user) {
            return Err(ClientError::UnknownUser);
        }
        Ok(state.balances.get(&(user, asset)).copied().unwrap_or(0))
    }

    async fn asset_id_by_symbol(&self, symbol: &str) -> Result<AssetId> {
        match symbol.to_ascii_lowercase().as_str() {
            "eth" => Ok(AssetId::ETH),
            "wsteth" => Ok(AssetId::WSTETH),
            _ => Err(ClientError::UnknownAsset(symbol.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velum_sdk::Settlement;

    fn wallet(byte: u8) -> EthAddress {
        EthAddress([byte; 20])
    }

    async fn connected_user(rollup: &DevRollup, byte: u8) -> (AccountKeyPair, UserId) {
        let keys = rollup.generate_account_key_pair(wallet(byte)).await.unwrap();
        let user = rollup.add_user(&keys.secret_key).await.unwrap();
        (keys, user)
    }

    async fn registered_user(rollup: &DevRollup, byte: u8, alias: &str) -> (AccountKeyPair, UserId) {
        let (keys, user) = connected_user(rollup, byte).await;
        let spending = rollup
            .generate_spending_key_pair(wallet(byte))
            .await
            .unwrap();
        rollup
            .register_account(RegisterAccount {
                account_public_key: keys.public_key,
                alias: alias.into(),
                account_secret_key: keys.secret_key.clone(),
                spending_public_key: spending.public_key,
                funding_symbol: "eth".into(),
                funding_quantity: 500_000_000_000_000_000,
                settlement: Settlement::Instant,
                fee_payer: wallet(byte),
            })
            .await
            .unwrap();
        (keys, user)
    }

    #[tokio::test]
    async fn test_key_derivation_is_deterministic() {
        let rollup = DevRollup::new();
        let a = rollup.generate_account_key_pair(wallet(1)).await.unwrap();
        let b = rollup.generate_account_key_pair(wallet(1)).await.unwrap();
        let c = rollup.generate_account_key_pair(wallet(2)).await.unwrap();
        assert_eq!(a.public_key, b.public_key);
        assert_eq!(a.secret_key.expose(), b.secret_key.expose());
        assert_ne!(a.public_key, c.public_key);
    }

    #[tokio::test]
    async fn test_spending_signer_matches_keypair() {
        let rollup = DevRollup::new();
        let pair = rollup.generate_spending_key_pair(wallet(1)).await.unwrap();
        let signer = rollup
            .create_spending_signer(pair.secret_key.clone())
            .await
            .unwrap();
        assert_eq!(signer.public_key(), pair.public_key);
    }

    #[tokio::test]
    async fn test_decline_fires_once() {
        let rollup = DevRollup::new();
        rollup.decline_next_signature().await;
        let err = rollup
            .generate_account_key_pair(wallet(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::WalletDeclined));
        // disarmed after firing
        assert!(rollup.generate_account_key_pair(wallet(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_unsynchronised_blocks_sync_waits() {
        let rollup = DevRollup::new();
        rollup.set_synchronised(false).await;
        assert!(matches!(
            rollup.await_synchronised().await.unwrap_err(),
            ClientError::Unavailable(_)
        ));
        rollup.set_synchronised(true).await;
        assert!(rollup.await_synchronised().await.is_ok());
    }

    #[tokio::test]
    async fn test_out_of_sync_error_names_the_server() {
        let rollup = DevRollup::with_config(
            RollupConfig::devnet().with_server_url("http://rollup.test:9999"),
        );
        rollup.set_synchronised(false).await;
        let err = rollup.await_synchronised().await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Unavailable(detail) if detail.contains("rollup.test:9999")
        ));
    }

    #[tokio::test]
    async fn test_register_enforces_alias_uniqueness() {
        let rollup = DevRollup::new();
        registered_user(&rollup, 1, "alice").await;

        let (keys, _) = connected_user(&rollup, 2).await;
        let spending = rollup.generate_spending_key_pair(wallet(2)).await.unwrap();
        let err = rollup
            .register_account(RegisterAccount {
                account_public_key: keys.public_key,
                alias: "alice".into(),
                account_secret_key: keys.secret_key.clone(),
                spending_public_key: spending.public_key,
                funding_symbol: "eth".into(),
                funding_quantity: 500_000_000_000_000_000,
                settlement: Settlement::Instant,
                fee_payer: wallet(2),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::AliasTaken(alias) if alias == "alice"));
    }

    #[tokio::test]
    async fn test_register_rejects_second_registration() {
        let rollup = DevRollup::new();
        let (keys, _) = registered_user(&rollup, 1, "alice").await;
        assert!(rollup.is_account_registered(&keys.public_key).await.unwrap());

        let spending = rollup.generate_spending_key_pair(wallet(1)).await.unwrap();
        let err = rollup
            .register_account(RegisterAccount {
                account_public_key: keys.public_key,
                alias: "alice2".into(),
                account_secret_key: keys.secret_key.clone(),
                spending_public_key: spending.public_key,
                funding_symbol: "eth".into(),
                funding_quantity: 500_000_000_000_000_000,
                settlement: Settlement::Instant,
                fee_payer: wallet(1),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::AlreadyRegistered));
    }

    #[tokio::test]
    async fn test_register_funds_the_account() {
        let rollup = DevRollup::new();
        let (keys, user) = connected_user(&rollup, 1).await;
        let spending = rollup.generate_spending_key_pair(wallet(1)).await.unwrap();
        rollup
            .register_account(RegisterAccount {
                account_public_key: keys.public_key,
                alias: "alice".into(),
                account_secret_key: keys.secret_key.clone(),
                spending_public_key: spending.public_key,
                funding_symbol: "eth".into(),
                funding_quantity: 500_000_000_000_000_000,
                settlement: Settlement::Instant,
                fee_payer: wallet(1),
            })
            .await
            .unwrap();

        assert_eq!(
            rollup.balance(user, AssetId::ETH).await.unwrap(),
            500_000_000_000_000_000
        );
        let recorded = rollup.recorded_register().await.unwrap();
        assert_eq!(recorded.funding_quantity, 500_000_000_000_000_000);
        assert_eq!(recorded.alias, "alice");
    }

    #[tokio::test]
    async fn test_register_rejects_zero_funding() {
        let rollup = DevRollup::new();
        let (keys, _) = connected_user(&rollup, 1).await;
        let spending = rollup.generate_spending_key_pair(wallet(1)).await.unwrap();
        let err = rollup
            .register_account(RegisterAccount {
                account_public_key: keys.public_key,
                alias: "alice".into(),
                account_secret_key: keys.secret_key.clone(),
                spending_public_key: spending.public_key,
                funding_symbol: "eth".into(),
                funding_quantity: 0,
                settlement: Settlement::Instant,
                fee_payer: wallet(1),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidAmount(_)));
        // nothing registered or recorded
        assert!(!rollup.is_account_registered(&keys.public_key).await.unwrap());
        assert!(rollup.recorded_register().await.is_none());
    }

    #[tokio::test]
    async fn test_deposit_credits_recipient_and_rejects_zero() {
        let rollup = DevRollup::new();
        let (keys, user) = connected_user(&rollup, 1).await;

        let err = rollup
            .deposit(DepositRequest {
                from: wallet(1),
                to: keys.public_key,
                quantity: 0,
                settlement: Settlement::Instant,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidAmount(_)));
        assert!(rollup.recorded_deposit().await.is_none());

        rollup
            .deposit(DepositRequest {
                from: wallet(1),
                to: keys.public_key,
                quantity: 1_000_000_000_000_000_000,
                settlement: Settlement::Instant,
            })
            .await
            .unwrap();
        assert_eq!(
            rollup.balance(user, AssetId::ETH).await.unwrap(),
            1_000_000_000_000_000_000
        );
    }

    async fn funded_signer(rollup: &DevRollup, byte: u8) -> (UserId, SpendingSigner, AccountKeyPair) {
        let (keys, user) = registered_user(rollup, byte, "alice").await;
        let spending = rollup
            .generate_spending_key_pair(wallet(byte))
            .await
            .unwrap();
        let signer = rollup
            .create_spending_signer(spending.secret_key.clone())
            .await
            .unwrap();
        rollup
            .deposit(DepositRequest {
                from: wallet(byte),
                to: keys.public_key,
                quantity: 1_500_000_000_000_000_000,
                settlement: Settlement::Instant,
            })
            .await
            .unwrap();
        (user, signer, keys)
    }

    #[tokio::test]
    async fn test_bridge_swaps_at_the_configured_price() {
        let rollup = DevRollup::new();
        let (user, signer, _) = funded_signer(&rollup, 1).await;

        rollup
            .bridge_call(BridgeCall {
                user,
                signer,
                bridge_id: CONVERSION_BRIDGE_ID,
                input_quantity: 1_000_000_000_000_000_000,
                input_symbol: "eth".into(),
                output_symbol: "wsteth".into(),
                min_output_ratio: RATIO_SCALE,
                settlement: Settlement::Instant,
            })
            .await
            .unwrap();

        assert_eq!(
            rollup.balance(user, AssetId::ETH).await.unwrap(),
            1_000_000_000_000_000_000
        );
        assert_eq!(
            rollup.balance(user, AssetId::WSTETH).await.unwrap(),
            1_000_000_000_000_000_000
        );
        assert!(rollup.recorded_bridge().await.is_some());
    }

    #[tokio::test]
    async fn test_bridge_enforces_slippage_floor() {
        let rollup = DevRollup::new();
        let (user, signer, _) = funded_signer(&rollup, 1).await;
        // price drops below the 1:1 floor
        rollup.set_bridge_price(DEFAULT_BRIDGE_PRICE / 2).await;

        let err = rollup
            .bridge_call(BridgeCall {
                user,
                signer,
                bridge_id: CONVERSION_BRIDGE_ID,
                input_quantity: 1_000_000_000_000_000_000,
                input_symbol: "eth".into(),
                output_symbol: "wsteth".into(),
                min_output_ratio: RATIO_SCALE,
                settlement: Settlement::Instant,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::SlippageExceeded { .. }));
        // nothing moved
        assert_eq!(
            rollup.balance(user, AssetId::ETH).await.unwrap(),
            2_000_000_000_000_000_000
        );
        assert_eq!(rollup.balance(user, AssetId::WSTETH).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bridge_checks_funds() {
        let rollup = DevRollup::new();
        let (user, signer, _) = funded_signer(&rollup, 1).await;

        let err = rollup
            .bridge_call(BridgeCall {
                user,
                signer,
                bridge_id: CONVERSION_BRIDGE_ID,
                input_quantity: 3_000_000_000_000_000_000,
                input_symbol: "eth".into(),
                output_symbol: "wsteth".into(),
                min_output_ratio: RATIO_SCALE,
                settlement: Settlement::Instant,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::InsufficientBalance {
                have: 2_000_000_000_000_000_000,
                need: 3_000_000_000_000_000_000,
            }
        ));
    }

    #[tokio::test]
    async fn test_bridge_rejects_unknown_routes() {
        let rollup = DevRollup::new();
        let (user, signer, _) = funded_signer(&rollup, 1).await;

        let err = rollup
            .bridge_call(BridgeCall {
                user,
                signer: signer.clone(),
                bridge_id: 7,
                input_quantity: 1,
                input_symbol: "eth".into(),
                output_symbol: "wsteth".into(),
                min_output_ratio: 0,
                settlement: Settlement::Instant,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Unavailable(_)));

        let err = rollup
            .bridge_call(BridgeCall {
                user,
                signer,
                bridge_id: CONVERSION_BRIDGE_ID,
                input_quantity: 1,
                input_symbol: "wsteth".into(),
                output_symbol: "eth".into(),
                min_output_ratio: 0,
                settlement: Settlement::Instant,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_unknown_symbol_is_rejected() {
        let rollup = DevRollup::new();
        let err = rollup.asset_id_by_symbol("dai").await.unwrap_err();
        assert!(matches!(err, ClientError::UnknownAsset(sym) if sym == "dai"));
        assert_eq!(rollup.asset_id_by_symbol("ETH").await.unwrap(), AssetId::ETH);
        assert_eq!(
            rollup.asset_id_by_symbol("wstETH").await.unwrap(),
            AssetId::WSTETH
        );
    }
}
