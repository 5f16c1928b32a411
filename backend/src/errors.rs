//! Typed errors for the storage and configuration layers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// No storage backend is attached to the repository
    #[error("Persistent storage is not available")]
    Unavailable,

    #[error("Invalid storage key '{0}': only letters, digits, '-' and '_' are allowed")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize stored data: {0}")]
    Serialization(#[from] serde_json::Error),

    /// JSON has no representation for NaN or infinity
    #[error("Payment {id} has a non-finite amount and cannot be stored")]
    NonFiniteAmount { id: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
