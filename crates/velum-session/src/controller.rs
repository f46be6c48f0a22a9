//! session lifecycle orchestration
//!
//! every operation follows the same shape: take the in-flight guard (or
//! fail `Busy`), read the current snapshot, call collaborators, and
//! install the next snapshot atomically. a failure anywhere leaves the
//! previous snapshot in place, so observers never see partial state.

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex, MutexGuard, RwLock};
use tracing::{info, warn};

use crate::error::{Result, SessionError};
use crate::session::{AssetBalance, RegistrationStatus, Session, SessionStatus};
use velum_sdk::{
    format_base_units, parse_base_units, AssetId, BridgeCall, ClientError, DepositRequest,
    EthAddress, RegisterAccount, RollupClient, Settlement, TxId, WalletEvent, WalletProvider,
};

/// numeric id of the demo conversion bridge (ETH→wstETH)
pub const DEFAULT_BRIDGE_ID: u32 = 6;

/// default minimum acceptable output price, 1e18-scaled (1.0)
pub const DEFAULT_MIN_OUTPUT_RATIO: u128 = 1_000_000_000_000_000_000;

const FUNDING_SYMBOL: &str = "eth";
const SECOND_DISPLAY_SYMBOL: &str = "wstETH";

/// orchestrates connect / register / deposit / bridge over the
/// collaborator traits and owns the single session slot
pub struct AccountSessionController {
    rollup: Arc<dyn RollupClient>,
    wallet: Arc<dyn WalletProvider>,
    session: RwLock<Option<Arc<Session>>>,
    in_flight: Mutex<()>,
}

impl AccountSessionController {
    pub fn new(rollup: Arc<dyn RollupClient>, wallet: Arc<dyn WalletProvider>) -> Self {
        Self {
            rollup,
            wallet,
            session: RwLock::new(None),
            in_flight: Mutex::new(()),
        }
    }

    /// walk the full connect sequence and install the session snapshot
    ///
    /// derivation is deterministic per wallet address, so reconnecting
    /// with the same account rebuilds the identical keys.
    pub async fn connect(&self) -> Result<SessionStatus> {
        let _guard = self.begin()?;

        let accounts = self.wallet.request_accounts().await?;
        if accounts.is_empty() {
            return Err(ClientError::Unavailable("wallet returned no accounts".into()).into());
        }
        let wallet_address = self.wallet.signer_address().await?;
        self.rollup.await_synchronised().await?;

        let account = self.rollup.generate_account_key_pair(wallet_address).await?;
        let registered = self.rollup.is_account_registered(&account.public_key).await?;
        let user = if self.rollup.user_exists(&account.public_key).await? {
            self.rollup.get_user(&account.public_key).await?
        } else {
            self.rollup.add_user(&account.secret_key).await?
        };
        let spending = self.rollup.generate_spending_key_pair(wallet_address).await?;
        let signer = self.rollup.create_spending_signer(spending.secret_key).await?;

        let session = Session {
            wallet_address,
            account_public_key: account.public_key,
            account_secret_key: account.secret_key,
            spending_signer: signer,
            user,
            registration: if registered {
                RegistrationStatus::Registered
            } else {
                RegistrationStatus::Unregistered
            },
            last_tx: None,
        };
        info!(wallet = %wallet_address, registered, "session connected");

        let status = SessionStatus::of(Some(&session));
        self.install(session).await;
        Ok(status)
    }

    /// register an alias against the connected account, funding it with
    /// the given decimal ETH amount (zero is rejected by the client)
    pub async fn register_account(&self, alias: &str, amount: &str) -> Result<TxId> {
        let _guard = self.begin()?;
        let session = self.current().await?;
        if session.is_registered() {
            return Err(SessionError::AlreadyRegistered);
        }
        let alias = alias.trim();
        if alias.is_empty() {
            return Err(SessionError::EmptyAlias);
        }
        let funding_quantity = parse_base_units(amount)?;

        let tx = self
            .rollup
            .register_account(RegisterAccount {
                account_public_key: session.account_public_key,
                alias: alias.to_string(),
                account_secret_key: session.account_secret_key.clone(),
                spending_public_key: session.spending_signer.public_key(),
                funding_symbol: FUNDING_SYMBOL.to_string(),
                funding_quantity,
                settlement: Settlement::Instant,
                fee_payer: session.wallet_address,
            })
            .await?;
        info!(alias, %tx, "account registered");
        self.install(session.registered_with(tx)).await;
        Ok(tx)
    }

    /// shield L1 ETH into the connected account
    pub async fn deposit_eth(&self, amount: &str) -> Result<TxId> {
        let _guard = self.begin()?;
        let session = self.current().await?;
        let quantity = parse_base_units(amount)?;

        let tx = self
            .rollup
            .deposit(DepositRequest {
                from: session.wallet_address,
                to: session.account_public_key,
                quantity,
                settlement: Settlement::Instant,
            })
            .await?;
        info!(%tx, quantity, "deposit submitted");
        self.install(session.with_tx(tx)).await;
        Ok(tx)
    }

    /// route value through the conversion bridge with a slippage floor
    pub async fn bridge_assets(
        &self,
        amount: &str,
        from_symbol: &str,
        to_symbol: &str,
        min_output_ratio: Option<u128>,
    ) -> Result<TxId> {
        let _guard = self.begin()?;
        let session = self.current().await?;
        let input_quantity = parse_base_units(amount)?;

        let tx = self
            .rollup
            .bridge_call(BridgeCall {
                user: session.user,
                signer: session.spending_signer.clone(),
                bridge_id: DEFAULT_BRIDGE_ID,
                input_quantity,
                input_symbol: from_symbol.to_string(),
                output_symbol: to_symbol.to_string(),
                min_output_ratio: min_output_ratio.unwrap_or(DEFAULT_MIN_OUTPUT_RATIO),
                settlement: Settlement::Instant,
            })
            .await?;
        info!(%tx, input = %from_symbol, output = %to_symbol, "bridge submitted");
        self.install(session.with_tx(tx)).await;
        Ok(tx)
    }

    /// wait for note sync, then read the two display assets
    pub async fn balances(&self) -> Result<Vec<AssetBalance>> {
        let _guard = self.begin()?;
        let session = self.current().await?;
        self.rollup.await_user_synchronised(session.user).await?;

        let eth = self.rollup.asset_id_by_symbol(FUNDING_SYMBOL).await?;
        let eth_units = self.rollup.balance(session.user, eth).await?;
        let second_units = self.rollup.balance(session.user, AssetId::WSTETH).await?;

        Ok(vec![
            AssetBalance {
                symbol: FUNDING_SYMBOL.to_string(),
                asset: eth,
                base_units: eth_units,
                display: format_base_units(eth_units),
            },
            AssetBalance {
                symbol: SECOND_DISPLAY_SYMBOL.to_string(),
                asset: AssetId::WSTETH,
                base_units: second_units,
                display: format_base_units(second_units),
            },
        ])
    }

    /// discard the session after a provider-level account switch
    ///
    /// waits for any in-flight operation to land first, so a stale
    /// snapshot cannot be installed over the reset.
    pub async fn handle_account_change(&self, new_address: EthAddress) {
        let _guard = self.in_flight.lock().await;
        let had_session = self.session.write().await.take().is_some();
        if had_session {
            info!(%new_address, "wallet account changed, session discarded");
        }
    }

    /// consume wallet events until the provider goes away
    pub async fn run_wallet_watcher(
        self: Arc<Self>,
        mut events: broadcast::Receiver<WalletEvent>,
    ) {
        loop {
            match events.recv().await {
                Ok(WalletEvent::AccountsChanged(address)) => {
                    self.handle_account_change(address).await;
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "wallet event stream lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    /// render view of the slot; never blocks on in-flight operations
    pub async fn status(&self) -> SessionStatus {
        SessionStatus::of(self.session.read().await.as_deref())
    }

    /// current snapshot, if connected
    pub async fn session(&self) -> Option<Arc<Session>> {
        self.session.read().await.clone()
    }

    fn begin(&self) -> Result<MutexGuard<'_, ()>> {
        self.in_flight.try_lock().map_err(|_| SessionError::Busy)
    }

    async fn current(&self) -> Result<Arc<Session>> {
        self.session
            .read()
            .await
            .clone()
            .ok_or(SessionError::NotConnected)
    }

    async fn install(&self, next: Session) {
        *self.session.write().await = Some(Arc::new(next));
    }
}
