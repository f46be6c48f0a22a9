//! velum-bridges: read-only bridge directory client
//!
//! the rollup publishes its available bridges through a directory
//! contract; this crate fetches and decodes that listing. strictly
//! read-only and uncached: every call re-fetches.
//!
//! the on-chain directory publishes (address, id, label) per bridge;
//! supported asset pairs are layered on from built-in per-bridge client
//! knowledge, keyed by label.

pub mod abi;
pub mod descriptor;
pub mod directory;
pub mod error;
pub mod rpc;

pub use descriptor::{AssetPair, BridgeDescriptor, BridgeSource};
pub use directory::{BridgeDirectory, DEFAULT_DIRECTORY_ADDRESS, DEFAULT_RPC_URL};
pub use error::{DirectoryError, Result};
pub use rpc::JsonRpcClient;
