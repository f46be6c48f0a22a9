//! privacy and spending key material
//!
//! the privacy (account) keypair en-/de-crypts a user's confidential
//! balance notes; sharing the privacy secret grants viewing access. the
//! spending keypair authorizes outgoing transfers. both are derived
//! deterministically from the wallet address by the rollup client, so the
//! same wallet always recovers the same keys.
//!
//! secrets live only in memory, are zeroized on drop, redact their debug
//! form, and deliberately have no serde impls.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// privacy public key, identifies the account on the rollup
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountPublicKey(pub [u8; 32]);

impl AccountPublicKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for AccountPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for AccountPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// privacy secret key, decrypts note data. memory only, zeroized on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AccountSecretKey([u8; 32]);

impl AccountSecretKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// raw bytes, for local derivation/registration calls only
    pub fn expose(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for AccountSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccountSecretKey(<redacted>)")
    }
}

/// the privacy keypair
#[derive(Clone, Debug)]
pub struct AccountKeyPair {
    pub public_key: AccountPublicKey,
    pub secret_key: AccountSecretKey,
}

/// spending public key, registered alongside an alias
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpendingPublicKey(pub [u8; 32]);

impl SpendingPublicKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for SpendingPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for SpendingPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// spending secret key. memory only, zeroized on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SpendingSecretKey([u8; 32]);

impl SpendingSecretKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// raw bytes, for local signer construction only
    pub fn expose(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for SpendingSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SpendingSecretKey(<redacted>)")
    }
}

/// the spending keypair
#[derive(Clone, Debug)]
pub struct SpendingKeyPair {
    pub public_key: SpendingPublicKey,
    pub secret_key: SpendingSecretKey,
}

/// capability that authorizes outgoing value transfers
///
/// constructed by the rollup client from a spending secret; the
/// orchestration layer only ever reads the public half.
#[derive(Clone)]
pub struct SpendingSigner {
    public_key: SpendingPublicKey,
    secret: SpendingSecretKey,
}

impl SpendingSigner {
    pub fn new(public_key: SpendingPublicKey, secret: SpendingSecretKey) -> Self {
        Self { public_key, secret }
    }

    pub fn public_key(&self) -> SpendingPublicKey {
        self.public_key
    }

    /// secret half, consumed by the rollup client when it signs
    pub fn secret(&self) -> &SpendingSecretKey {
        &self.secret
    }
}

impl fmt::Debug for SpendingSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpendingSigner")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}
