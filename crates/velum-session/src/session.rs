//! immutable session snapshot and its render view

use velum_sdk::{
    AccountPublicKey, AccountSecretKey, AssetId, EthAddress, SpendingSigner, TxId, UserId,
};

/// whether the account key has an alias registered on the rollup
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistrationStatus {
    Unregistered,
    Registered,
}

/// everything one connected wallet holds
///
/// built only by a fully successful connect and replaced wholesale
/// afterwards; a partially-populated session is unrepresentable. carries
/// the privacy secret, so the value stays in memory and is never
/// serialized.
#[derive(Clone, Debug)]
pub struct Session {
    pub wallet_address: EthAddress,
    pub account_public_key: AccountPublicKey,
    pub account_secret_key: AccountSecretKey,
    pub spending_signer: SpendingSigner,
    pub user: UserId,
    pub registration: RegistrationStatus,
    pub last_tx: Option<TxId>,
}

impl Session {
    pub fn is_registered(&self) -> bool {
        self.registration == RegistrationStatus::Registered
    }

    /// next snapshot with an updated last transaction
    pub(crate) fn with_tx(&self, tx: TxId) -> Self {
        Self {
            last_tx: Some(tx),
            ..self.clone()
        }
    }

    /// next snapshot marked registered by the given transaction
    pub(crate) fn registered_with(&self, tx: TxId) -> Self {
        Self {
            registration: RegistrationStatus::Registered,
            last_tx: Some(tx),
            ..self.clone()
        }
    }
}

/// cheap view of the session slot for rendering
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionStatus {
    pub connected: bool,
    pub registered: bool,
    pub has_signer: bool,
    pub wallet_address: Option<EthAddress>,
    pub last_tx: Option<TxId>,
}

impl SessionStatus {
    pub fn of(session: Option<&Session>) -> Self {
        match session {
            None => Self::default(),
            Some(session) => Self {
                connected: true,
                registered: session.is_registered(),
                has_signer: true,
                wallet_address: Some(session.wallet_address),
                last_tx: session.last_tx,
            },
        }
    }
}

/// one row of the balance display
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetBalance {
    pub symbol: String,
    pub asset: AssetId,
    pub base_units: u128,
    /// decimal display string, trailing zeros trimmed
    pub display: String,
}
