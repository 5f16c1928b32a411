//! # Virtual Wallet Backend
//!
//! Non-UI logic for the virtual wallet expense tracker: payments made from
//! two wallets are recorded in a local key-value store and summarised into
//! spending statistics.
//!
//! ## Architecture
//!
//! ```text
//! UI layer (external)
//!     ↓
//! Domain (PaymentService, StatsService, PaymentValidator)
//!     ↓
//! Storage (PaymentRepository → KeyValueStorage: files or memory)
//! ```
//!
//! [`initialize_backend`] builds exactly one repository and hands it to the
//! services, so there is a single owner of the stored collection per
//! running application.

pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod storage;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

pub use config::AppConfig;
pub use domain::{MonthLabelLocale, PaymentService, PaymentValidator, StatsService};
pub use errors::{ConfigError, StorageError};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, PaymentRepository};

/// Application state holding the services, all sharing one repository
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub payment_service: PaymentService,
    pub stats_service: StatsService,
}

impl AppState {
    pub fn new(config: AppConfig, repository: PaymentRepository) -> Self {
        let payment_service = PaymentService::new(repository.clone());
        let stats_service = StatsService::new(repository, config.month_label_locale);
        Self {
            config,
            payment_service,
            stats_service,
        }
    }

    /// State backed by an in-memory store; nothing survives the process
    pub fn in_memory(config: AppConfig) -> Self {
        let repository =
            PaymentRepository::with_key(Arc::new(MemoryStorage::new()), config.storage_key.clone());
        Self::new(config, repository)
    }

    /// State with no persistent storage: reads are empty, writes are dropped
    pub fn detached(config: AppConfig) -> Self {
        Self::new(config, PaymentRepository::detached())
    }

    /// The recent spending window using the configured number of months
    pub fn recent_monthly_totals(&self) -> Vec<shared::MonthlyTotal> {
        self.stats_service
            .recent_monthly_totals(self.config.recent_months)
    }
}

/// Open file storage under `data_directory`, or under the platform data
/// directory when none is given
pub fn open_file_storage(data_directory: Option<&Path>) -> Result<FileStorage> {
    let storage = match data_directory {
        Some(dir) => FileStorage::new(dir)?,
        None => FileStorage::new_default()
            .context("Could not open storage in the platform data directory")?,
    };
    Ok(storage)
}

/// Initialize the backend with file storage under `data_directory`
/// (or the platform data directory). Installs the logging subscriber using
/// the configured level unless `RUST_LOG` overrides it.
pub fn initialize_backend(data_directory: Option<&Path>) -> Result<AppState> {
    let storage = open_file_storage(data_directory)?;
    let config = AppConfig::load_or_create(storage.base_directory())?;

    logging::init_logging(&config.log_level);
    info!("Using data directory {}", storage.base_directory().display());

    info!("Setting up storage");
    let repository = PaymentRepository::with_key(Arc::new(storage), config.storage_key.clone());

    info!("Setting up application state");
    Ok(AppState::new(config, repository))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_backend_creates_config() {
        let temp_dir = TempDir::new().unwrap();

        let state = initialize_backend(Some(temp_dir.path())).unwrap();

        assert!(temp_dir.path().join(config::CONFIG_FILE_NAME).exists());
        assert_eq!(state.payment_service.repository().storage_key(), state.config.storage_key);
        assert!(state.payment_service.get_payments().is_empty());
    }

    #[test]
    fn test_initialize_backend_honours_configured_locale() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.month_label_locale = MonthLabelLocale::Spanish;
        config.save(temp_dir.path()).unwrap();

        let state = initialize_backend(Some(temp_dir.path())).unwrap();

        assert_eq!(state.stats_service.locale(), MonthLabelLocale::Spanish);
    }

    #[test]
    fn test_initialize_backend_rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(config::CONFIG_FILE_NAME), "recent_months: 0\n").unwrap();

        assert!(initialize_backend(Some(temp_dir.path())).is_err());
    }

    #[test]
    fn test_initialize_backend_installs_logging() {
        let temp_dir = TempDir::new().unwrap();

        initialize_backend(Some(temp_dir.path())).unwrap();

        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn test_open_file_storage_uses_given_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("wallet-data");

        let storage = open_file_storage(Some(&nested)).unwrap();

        assert_eq!(storage.base_directory(), nested.as_path());
        assert!(nested.is_dir());
    }

    #[test]
    fn test_detached_state() {
        let state = AppState::detached(AppConfig::default());

        assert!(!state.payment_service.repository().is_attached());
        assert_eq!(state.stats_service.get_payment_stats().total_payments, 0);
    }
}
