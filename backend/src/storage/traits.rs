//! # Storage Traits
//!
//! The key-value abstraction the payment repository is written against, so
//! the backing store (files on disk, memory) can be swapped without touching
//! the domain layer.

use crate::errors::StorageError;

/// Trait defining a string key-value store
pub trait KeyValueStorage: Send + Sync {
    /// Retrieve the value stored under `key`, if any
    fn get_value(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store a value, overwriting whatever was under `key`
    fn put_value(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Returns true if the key existed
    fn delete_value(&self, key: &str) -> Result<bool, StorageError>;

    /// List all keys, sorted
    fn list_keys(&self) -> Result<Vec<String>, StorageError>;
}

/// Keys double as file names, so they are limited to `[A-Za-z0-9_-]`
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
