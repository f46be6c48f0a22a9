//! velum-session: session lifecycle over the wallet and rollup boundaries
//!
//! one [`AccountSessionController`] owns the session slot. connect()
//! walks the whole derivation sequence and installs an immutable
//! [`Session`] snapshot; value-moving operations replace the snapshot
//! wholesale on success and leave it untouched on failure. a wallet
//! account switch discards the session entirely.
//!
//! ```text
//!          connect            register / deposit / bridge
//!   None ──────────► Session ────────────────────────────► Session'
//!    ▲                  │  (new snapshot, last_tx updated)
//!    └──────────────────┘
//!      AccountsChanged
//! ```

pub mod controller;
pub mod error;
pub mod session;

pub use controller::{AccountSessionController, DEFAULT_BRIDGE_ID, DEFAULT_MIN_OUTPUT_RATIO};
pub use error::{Result, SessionError};
pub use session::{AssetBalance, RegistrationStatus, Session, SessionStatus};
