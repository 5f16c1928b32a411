//! Test utilities: a temp-dir backed storage that is removed on drop.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use shared::{Payment, Wallet};
use tempfile::TempDir;

use super::{FileStorage, PaymentRepository};
use crate::errors::StorageError;

/// RAII test environment. The temporary directory (and everything written
/// into it) goes away when this is dropped, even if the test panics.
pub struct TestEnvironment {
    _temp_dir: TempDir,
    pub storage: FileStorage,
    pub repository: PaymentRepository,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self, StorageError> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let storage = FileStorage::new(&base_path)?;
        let repository = PaymentRepository::new(Arc::new(storage.clone()));

        Ok(Self {
            _temp_dir: temp_dir,
            storage,
            repository,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }
}

/// Build a stored payment without going through the service
pub fn sample_payment(amount: f64, wallet: Wallet, (year, month, day): (i32, u32, u32)) -> Payment {
    Payment {
        id: uuid::Uuid::new_v4().to_string(),
        amount,
        description: format!("Payment of {}", amount),
        place: "Test place".to_string(),
        wallet,
        date: NaiveDate::from_ymd_opt(year, month, day).expect("valid test date"),
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_cleanup() {
        let base_path;

        {
            let env = TestEnvironment::new().unwrap();
            base_path = env.base_directory().to_path_buf();
            assert!(base_path.exists());

            std::fs::write(base_path.join("test_file.txt"), "test data").unwrap();
        }

        assert!(!base_path.exists());
    }
}
