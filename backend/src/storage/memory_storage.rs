//! In-memory key-value storage for tests and throwaway sessions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::traits::{validate_key, KeyValueStorage};
use crate::errors::StorageError;

/// Clones share the same underlying map
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let values = self.values.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(values.get(key).cloned())
    }

    fn put_value(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut values = self.values.write().map_err(|_| StorageError::LockPoisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete_value(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        let mut values = self.values.write().map_err(|_| StorageError::LockPoisoned)?;
        Ok(values.remove(key).is_some())
    }

    fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        let values = self.values.read().map_err(|_| StorageError::LockPoisoned)?;
        let mut keys: Vec<String> = values.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_values() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();

        storage.put_value("slot", "value").unwrap();

        assert_eq!(handle.get_value("slot").unwrap(), Some("value".to_string()));
        assert_eq!(handle.list_keys().unwrap(), vec!["slot"]);
    }

    #[test]
    fn test_delete_value() {
        let storage = MemoryStorage::new();
        storage.put_value("slot", "value").unwrap();

        assert!(storage.delete_value("slot").unwrap());
        assert!(!storage.delete_value("slot").unwrap());
        assert!(storage.list_keys().unwrap().is_empty());
    }
}
