//! in-memory collaborator doubles
//!
//! everything the shell's devnet mode and the integration tests need to
//! run without a rollup deployment: a deterministic rollup client, a
//! wallet provider with scriptable approval, and a fixed bridge listing.
//! behavior mirrors the real collaborators closely enough that the
//! orchestration layer cannot tell the difference through the traits.

pub mod directory;
pub mod rollup;
pub mod wallet;

pub use directory::DevBridgeDirectory;
pub use rollup::{DevRollup, CONVERSION_BRIDGE_ID, DEFAULT_BRIDGE_PRICE};
pub use wallet::DevWallet;
