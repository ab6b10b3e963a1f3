//! Error types for wallet-core

use thiserror::Error;

/// Result type alias for wallet operations
pub type Result<T> = std::result::Result<T, WalletError>;

/// Wallet error types
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Account not found: {0} - create a wallet first")]
    AccountNotFound(String),

    #[error("Cancelled: {0}")]
    UserCancelled(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("`{command}` failed with {status}")]
    ExternalCommand { command: String, status: String },

    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl WalletError {
    /// Whether this error should end the whole session rather than a single action
    pub fn is_fatal(&self) -> bool {
        matches!(self, WalletError::MissingDependency(_))
    }
}
