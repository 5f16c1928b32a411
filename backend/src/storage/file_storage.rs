//! # File Key-Value Storage
//!
//! Each key is a file inside a base data directory:
//!
//! ```text
//! data/
//! ├── config.yaml
//! └── virtual-wallet-payments.json   ← one file per key
//! ```
//!
//! Writes go to a `.tmp` sibling first and are then renamed over the target,
//! so a crash mid-write never leaves a half-written slot behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::traits::{validate_key, KeyValueStorage};
use crate::errors::StorageError;

/// Directory name used under the platform data directory
pub const DEFAULT_DIRECTORY_NAME: &str = "virtual-wallet";

const VALUE_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "tmp";

#[derive(Debug, Clone)]
pub struct FileStorage {
    base_directory: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self, StorageError> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a file storage in the platform data directory
    /// (e.g. `~/.local/share/virtual-wallet` on Linux)
    pub fn new_default() -> Result<Self, StorageError> {
        let data_dir = Self::default_data_directory().ok_or(StorageError::Unavailable)?;
        Self::new(data_dir)
    }

    pub fn default_data_directory() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(DEFAULT_DIRECTORY_NAME))
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.base_directory.join(format!("{}.{}", key, VALUE_EXTENSION))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let path = self.value_path(key);

        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Read {} bytes from {}", content.len(), path.display());
                Ok(Some(content))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put_value(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let path = self.value_path(key);
        let temp_path = path.with_extension(TEMP_EXTENSION);

        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn delete_value(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;

        match fs::remove_file(self.value_path(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();

        for entry in fs::read_dir(&self.base_directory)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(VALUE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                if validate_key(stem).is_ok() {
                    keys.push(stem.to_string());
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test() -> (TempDir, FileStorage) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = FileStorage::new(temp_dir.path()).expect("Failed to create storage");
        (temp_dir, storage)
    }

    #[test]
    fn test_creates_missing_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        let storage = FileStorage::new(&nested).unwrap();

        assert!(nested.is_dir());
        assert_eq!(storage.base_directory(), nested.as_path());
    }

    #[test]
    fn test_default_data_directory_is_app_specific() {
        if let Some(dir) = FileStorage::default_data_directory() {
            assert_eq!(dir.file_name().and_then(|n| n.to_str()), Some(DEFAULT_DIRECTORY_NAME));
            assert_eq!(dir.parent(), dirs::data_dir().as_deref());
        }
    }

    #[test]
    fn test_put_and_get_value() {
        let (_temp_dir, storage) = setup_test();

        storage.put_value("slot", "[1,2,3]").unwrap();

        assert_eq!(storage.get_value("slot").unwrap(), Some("[1,2,3]".to_string()));
    }

    #[test]
    fn test_get_nonexistent_value() {
        let (_temp_dir, storage) = setup_test();

        assert_eq!(storage.get_value("missing").unwrap(), None);
    }

    #[test]
    fn test_put_overwrites_and_leaves_no_temp_file() {
        let (temp_dir, storage) = setup_test();

        storage.put_value("slot", "first").unwrap();
        storage.put_value("slot", "second").unwrap();

        assert_eq!(storage.get_value("slot").unwrap(), Some("second".to_string()));
        assert!(temp_dir.path().join("slot.json").exists());
        assert!(!temp_dir.path().join("slot.tmp").exists());
    }

    #[test]
    fn test_delete_value() {
        let (_temp_dir, storage) = setup_test();
        storage.put_value("slot", "x").unwrap();

        assert!(storage.delete_value("slot").unwrap());
        assert!(!storage.delete_value("slot").unwrap());
        assert_eq!(storage.get_value("slot").unwrap(), None);
    }

    #[test]
    fn test_list_keys_ignores_other_files() {
        let (temp_dir, storage) = setup_test();
        storage.put_value("b-slot", "1").unwrap();
        storage.put_value("a-slot", "2").unwrap();
        fs::write(temp_dir.path().join("config.yaml"), "x: 1").unwrap();
        fs::create_dir(temp_dir.path().join("nested.json")).unwrap();

        assert_eq!(storage.list_keys().unwrap(), vec!["a-slot", "b-slot"]);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (_temp_dir, storage) = setup_test();

        assert!(matches!(
            storage.put_value("../outside", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            storage.get_value("a/b"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
