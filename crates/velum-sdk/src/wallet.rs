//! wallet provider capability boundary
//!
//! wraps whatever injected wallet the host environment supplies: request
//! account access, read the active signer address, and watch for
//! provider-level account switches. an account switch invalidates the
//! whole session upstream.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::Result;
use crate::types::EthAddress;

/// provider-level notifications
#[derive(Clone, Debug)]
pub enum WalletEvent {
    /// the active account changed; the session built on the old account
    /// is no longer valid
    AccountsChanged(EthAddress),
}

/// narrow surface of an injected wallet provider
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// prompt for account access; the user may decline
    async fn request_accounts(&self) -> Result<Vec<EthAddress>>;

    /// address of the active signer
    async fn signer_address(&self) -> Result<EthAddress>;

    /// subscribe to provider notifications
    fn subscribe(&self) -> broadcast::Receiver<WalletEvent>;
}
