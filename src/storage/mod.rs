pub mod json_backend;
pub mod memory;

use std::sync::Arc;

use crate::{config::Config, domain::BudgetDocument, errors::Result};

pub use json_backend::JsonFileStorage;
pub use memory::MemoryStorage;

/// Key under which the budget document is stored.
pub const STORAGE_KEY: &str = "budget";

/// Synchronous string key-value store the budget document is persisted to.
///
/// Both operations may fail; callers treat a failed read the same as a missing value.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Reads and parses the stored document. `Ok(None)` means nothing was stored.
pub fn read_document(storage: &dyn KeyValueStorage) -> Result<Option<BudgetDocument>> {
    match storage.get(STORAGE_KEY)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serializes the whole document and overwrites the stored value.
pub fn write_document(storage: &dyn KeyValueStorage, document: &BudgetDocument) -> Result<()> {
    let json = serde_json::to_string(document)?;
    storage.set(STORAGE_KEY, &json)
}

/// Opens the file backend described by `config`.
pub fn open_configured(config: &Config) -> Result<JsonFileStorage> {
    let storage = JsonFileStorage::new(config.resolve_storage_root())?;
    Ok(storage.with_quota(config.storage_quota_bytes))
}
