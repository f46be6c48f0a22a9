//! orchestration-level errors
//!
//! collaborator failures pass through with their [`ClientError`] tag;
//! the extra kinds here are preconditions only the controller can check.

use thiserror::Error;

use velum_sdk::ClientError;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("no active session; connect first")]
    NotConnected,

    #[error("account is already registered")]
    AlreadyRegistered,

    #[error("alias must not be empty")]
    EmptyAlias,

    #[error("another operation is already in flight")]
    Busy,

    #[error(transparent)]
    Client(#[from] ClientError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
