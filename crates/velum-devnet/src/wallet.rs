//! in-memory wallet provider
//!
//! a scriptable stand-in for an injected wallet: a fixed account list,
//! an approve/decline knob for the access prompt, and a
//! [`switch_account`](DevWallet::switch_account) that emits the same
//! account-change notification a real provider would.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use velum_sdk::{ClientError, EthAddress, Result, WalletEvent, WalletProvider};

struct WalletState {
    active: usize,
    decline_next_request: bool,
}

/// in-memory [`WalletProvider`] double
#[derive(Clone)]
pub struct DevWallet {
    accounts: Arc<Vec<EthAddress>>,
    state: Arc<RwLock<WalletState>>,
    events: broadcast::Sender<WalletEvent>,
}

impl DevWallet {
    pub fn new(accounts: Vec<EthAddress>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            accounts: Arc::new(accounts),
            state: Arc::new(RwLock::new(WalletState {
                active: 0,
                decline_next_request: false,
            })),
            events,
        }
    }

    /// three deterministic accounts, 0x1111…, 0x2222…, 0x3333…
    pub fn with_default_accounts() -> Self {
        Self::new((1..=3).map(|i| EthAddress([i * 0x11; 20])).collect())
    }

    /// full account list, for display
    pub fn accounts(&self) -> &[EthAddress] {
        &self.accounts
    }

    /// the next access prompt is declined
    pub async fn decline_next_request(&self) {
        self.state.write().await.decline_next_request = true;
    }

    /// switch the active account, notifying subscribers
    pub async fn switch_account(&self, index: usize) -> Result<EthAddress> {
        let address = *self
            .accounts
            .get(index)
            .ok_or_else(|| ClientError::Unavailable(format!("no account at index {index}")))?;
        self.state.write().await.active = index;
        debug!(%address, "switched active account");
        // nobody listening is fine
        let _ = self.events.send(WalletEvent::AccountsChanged(address));
        Ok(address)
    }
}

#[async_trait]
impl WalletProvider for DevWallet {
    async fn request_accounts(&self) -> Result<Vec<EthAddress>> {
        let mut state = self.state.write().await;
        if state.decline_next_request {
            state.decline_next_request = false;
            return Err(ClientError::WalletDeclined);
        }
        Ok(self.accounts.as_ref().clone())
    }

    async fn signer_address(&self) -> Result<EthAddress> {
        let state = self.state.read().await;
        self.accounts
            .get(state.active)
            .copied()
            .ok_or_else(|| ClientError::Unavailable("wallet has no accounts".into()))
    }

    fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.events.subscribe()
    }
}
