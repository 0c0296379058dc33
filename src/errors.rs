use std::result::Result as StdResult;

use thiserror::Error;

/// Error type shared by the storage backends and configuration layer.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage quota exceeded for `{key}`: {attempted} bytes over a limit of {limit}")]
    QuotaExceeded {
        key: String,
        limit: usize,
        attempted: usize,
    },
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, BudgetError>;
