//! velum-sdk: types and capability boundaries for the velum demo client
//!
//! provides:
//! - identifier and key newtypes (wallet addresses, privacy/spending keys)
//! - exact base-unit amount conversion (18 decimals)
//! - rollup client configuration
//! - the two collaborator traits the orchestration layer depends on
//!
//! ## session flow
//!
//! ```text
//! WalletProvider                RollupClient
//!     │                             │
//!     │ request_accounts            │
//!     ├────────────────────────────►│ await_synchronised
//!     │                             │ generate_account_key_pair (privacy)
//!     │                             │ is_account_registered
//!     │                             │ get_user / add_user
//!     │                             │ generate_spending_key_pair
//!     │                             │ create_spending_signer
//!     │                             │
//!     │        ┌─ register_account ─┤
//!     │        ├─ deposit ──────────┤
//!     │        └─ bridge_call ──────┤
//! ```
//!
//! the concrete rollup client (key generation, proofs, note decryption,
//! chain sync) lives behind [`RollupClient`]; nothing in this workspace
//! reimplements it. the devnet crate provides an in-memory double.

pub mod amount;
pub mod config;
pub mod error;
pub mod keys;
pub mod rollup;
pub mod types;
pub mod wallet;

pub use amount::{format_base_units, parse_base_units, BASE_UNIT_DECIMALS};
pub use config::RollupConfig;
pub use error::{ClientError, Result};
pub use keys::{
    AccountKeyPair, AccountPublicKey, AccountSecretKey, SpendingKeyPair, SpendingPublicKey,
    SpendingSecretKey, SpendingSigner,
};
pub use rollup::{BridgeCall, DepositRequest, RegisterAccount, RollupClient};
pub use types::{AssetId, EthAddress, Settlement, TxId, UserId};
pub use wallet::{WalletEvent, WalletProvider};
