//! Per-tab cache of API responses in sessionStorage.
//!
//! Entries live until the tab closes: page swaps reuse the last quotes
//! response, a fresh visit refetches.

use darlingx_core::error::StorageError;
use serde::{Serialize, de::DeserializeOwned};
use web_sys::Storage;

use super::dom;

fn storage() -> Result<Storage, StorageError> {
    dom::session_storage().ok_or(StorageError::Unavailable)
}

/// Cached value under `key`. An entry that no longer decodes as `T` is
/// dropped and reported as a miss.
pub fn load<T: DeserializeOwned>(key: &str) -> Option<T> {
    let storage = storage().ok()?;
    let raw = storage.get_item(key).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("discarding cached {key}: {e}");
            let _ = storage.remove_item(key);
            None
        }
    }
}

pub fn save<T: Serialize>(key: &str, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|_| StorageError::SerializationFailed)?;
    storage()?
        .set_item(key, &raw)
        .map_err(|_| StorageError::WriteFailed)
}

pub fn forget(key: &str) {
    if let Ok(storage) = storage() {
        let _ = storage.remove_item(key);
    }
}
