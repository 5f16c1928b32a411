use std::sync::Arc;

use shared::Payment;
use tracing::{debug, error, warn};

use super::traits::KeyValueStorage;
use crate::errors::StorageError;

/// Slot the payment collection is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "virtual-wallet-payments";

/// Reads and writes the whole payment collection under one storage slot.
///
/// `load` and `save` never fail: storage or parse problems are logged and
/// the collection degrades to empty (reads) or the write is dropped. Use
/// `try_load` / `try_save` to see the underlying [`StorageError`].
#[derive(Clone)]
pub struct PaymentRepository {
    storage: Option<Arc<dyn KeyValueStorage>>,
    storage_key: String,
}

impl PaymentRepository {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: Arc<dyn KeyValueStorage>, storage_key: impl Into<String>) -> Self {
        Self {
            storage: Some(storage),
            storage_key: storage_key.into(),
        }
    }

    /// A repository with no persistent storage behind it. Loads are empty
    /// and saves are dropped.
    pub fn detached() -> Self {
        Self {
            storage: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn is_attached(&self) -> bool {
        self.storage.is_some()
    }

    /// Read the stored collection. A missing or blank slot is an empty collection
    pub fn try_load(&self) -> Result<Vec<Payment>, StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;

        match storage.get_value(&self.storage_key)? {
            Some(data) if !data.trim().is_empty() => {
                let payments: Vec<Payment> = serde_json::from_str(&data)?;
                debug!("Loaded {} payments from '{}'", payments.len(), self.storage_key);
                Ok(payments)
            }
            _ => Ok(Vec::new()),
        }
    }

    pub fn load(&self) -> Vec<Payment> {
        match self.try_load() {
            Ok(payments) => payments,
            Err(StorageError::Unavailable) => {
                debug!("No persistent storage attached, returning no payments");
                Vec::new()
            }
            Err(e) => {
                error!("Error loading payments: {}", e);
                Vec::new()
            }
        }
    }

    /// Overwrite the slot with `payments`. Nothing is written if any amount
    /// is NaN or infinite, since it would come back as `null` and make the
    /// whole slot unreadable.
    pub fn try_save(&self, payments: &[Payment]) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        if let Some(payment) = payments.iter().find(|p| !p.amount.is_finite()) {
            return Err(StorageError::NonFiniteAmount {
                id: payment.id.clone(),
            });
        }
        let data = serde_json::to_string(payments)?;
        storage.put_value(&self.storage_key, &data)?;
        debug!("Saved {} payments to '{}'", payments.len(), self.storage_key);
        Ok(())
    }

    pub fn save(&self, payments: &[Payment]) {
        match self.try_save(payments) {
            Ok(()) => {}
            Err(StorageError::Unavailable) => {
                warn!("No persistent storage attached, dropping {} payments", payments.len());
            }
            Err(e) => error!("Error saving payments: {}", e),
        }
    }
}
