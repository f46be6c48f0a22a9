//! error types for directory queries

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("rpc error: {0}")]
    Rpc(String),

    #[error("abi decode error: {0}")]
    Abi(String),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
