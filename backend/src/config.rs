//! # Application Config
//!
//! A single YAML file, `config.yaml`, at the root of the data directory:
//!
//! ```yaml
//! storage_key: virtual-wallet-payments
//! month_label_locale: english
//! recent_months: 6
//! log_level: info
//! data_format_version: "1.0"
//! created_at: "2025-01-21T19:30:00Z"
//! updated_at: "2025-01-21T19:35:00Z"
//! ```
//!
//! A missing file is created with defaults. Writes use a temp file and a
//! rename so a crash never leaves a truncated config.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::MonthLabelLocale;
use crate::errors::ConfigError;
use crate::storage::{validate_key, DEFAULT_STORAGE_KEY};

pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const DATA_FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Slot holding the payment collection
    pub storage_key: String,
    pub month_label_locale: MonthLabelLocale,
    /// How many months the recent spending window keeps
    pub recent_months: usize,
    /// Default log filter when RUST_LOG is not set
    pub log_level: String,
    /// Layout version of stored data, for future migrations
    pub data_format_version: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            month_label_locale: MonthLabelLocale::default(),
            recent_months: 6,
            log_level: "info".to_string(),
            data_format_version: DATA_FORMAT_VERSION.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl AppConfig {
    pub fn config_path(base_directory: &Path) -> PathBuf {
        base_directory.join(CONFIG_FILE_NAME)
    }

    /// Load the config from `base_directory`, writing the defaults first if
    /// there is no config file yet
    pub fn load_or_create(base_directory: &Path) -> Result<Self, ConfigError> {
        let config_path = Self::config_path(base_directory);

        if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)?;
            let config: AppConfig = serde_yaml::from_str(&yaml_content)?;
            config.validate()?;
            debug!("Loaded config from {:?}", config_path);
            Ok(config)
        } else {
            let config = AppConfig::default();
            config.save(base_directory)?;
            info!("Created default config at {:?}", config_path);
            Ok(config)
        }
    }

    pub fn save(&self, base_directory: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        if !base_directory.exists() {
            fs::create_dir_all(base_directory)?;
            info!("Created data directory: {:?}", base_directory);
        }

        let config_path = Self::config_path(base_directory);
        let yaml_content = serde_yaml::to_string(self)?;

        let temp_path = config_path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &config_path)?;

        debug!("Saved config to {:?}", config_path);
        Ok(())
    }

    /// Save with a refreshed `updated_at`
    pub fn update(&mut self, base_directory: &Path) -> Result<(), ConfigError> {
        self.updated_at = Utc::now().to_rfc3339();
        self.save(base_directory)?;
        info!("Updated config");
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_key(&self.storage_key).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.recent_months == 0 {
            return Err(ConfigError::Invalid(
                "recent_months must be at least 1".to_string(),
            ));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log_level cannot be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_default_config() {
        let temp_dir = TempDir::new().unwrap();

        let config = AppConfig::load_or_create(temp_dir.path()).unwrap();

        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.recent_months, 6);
        assert_eq!(config.month_label_locale, MonthLabelLocale::English);
        assert_eq!(config.data_format_version, "1.0");
        assert!(temp_dir.path().join(CONFIG_FILE_NAME).exists());
        assert!(!temp_dir.path().join("config.tmp").exists());
    }

    #[test]
    fn test_creates_missing_data_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("wallet");

        AppConfig::load_or_create(&nested).unwrap();

        assert!(nested.join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = AppConfig::load_or_create(temp_dir.path()).unwrap();
        config.month_label_locale = MonthLabelLocale::Spanish;
        config.recent_months = 12;
        config.update(temp_dir.path()).unwrap();

        let reloaded = AppConfig::load_or_create(temp_dir.path()).unwrap();

        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "month_label_locale: spanish\n",
        )
        .unwrap();

        let config = AppConfig::load_or_create(temp_dir.path()).unwrap();

        assert_eq!(config.month_label_locale, MonthLabelLocale::Spanish);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.recent_months, 6);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);

        fs::write(&path, "recent_months: 0\n").unwrap();
        assert!(matches!(
            AppConfig::load_or_create(temp_dir.path()),
            Err(ConfigError::Invalid(_))
        ));

        fs::write(&path, "storage_key: \"../payments\"\n").unwrap();
        assert!(matches!(
            AppConfig::load_or_create(temp_dir.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "recent_months: [oops").unwrap();

        assert!(matches!(
            AppConfig::load_or_create(temp_dir.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
