//! error types for collaborator calls
//!
//! every kind is a tag the presentation layer can route on instead of
//! string-matching messages.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("wallet interaction declined by user")]
    WalletDeclined,

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u128, need: u128 },

    #[error("slippage exceeded: quoted {quoted}, floor {floor}")]
    SlippageExceeded { quoted: u128, floor: u128 },

    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("unknown asset: {0}")]
    UnknownAsset(String),

    #[error("no local user for this account key")]
    UnknownUser,

    #[error("alias already taken: {0}")]
    AliasTaken(String),

    #[error("account already registered")]
    AlreadyRegistered,
}

pub type Result<T> = std::result::Result<T, ClientError>;
