//! # Storage Module
//!
//! Persistence for the payment tracker. Everything lives in a key-value
//! store: one named slot holds the whole payment collection as JSON.
//!
//! ## Layers
//!
//! - [`KeyValueStorage`]: the slot abstraction, with a file-backed
//!   implementation ([`FileStorage`]) and an in-memory one ([`MemoryStorage`])
//! - [`PaymentRepository`]: reads and writes the collection under its slot,
//!   degrading to an empty collection when storage misbehaves

pub mod file_storage;
pub mod memory_storage;
pub mod payment_repository;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;
pub use payment_repository::{PaymentRepository, DEFAULT_STORAGE_KEY};
pub use traits::{validate_key, KeyValueStorage};
