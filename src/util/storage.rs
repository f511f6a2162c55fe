//! Key-value storage backends for persisted session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store is injectable so the auth flow can be exercised from
//! native tests. In the browser the backend is `localStorage`; natively it
//! is an in-memory map. A disabled or corrupted browser store degrades to
//! "nothing persisted" rather than an error.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Synchronous string key-value storage.
pub trait SessionStorage: Send + Sync {
    /// Read a value. `None` when absent or the backend is unavailable.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value. Silently dropped when the backend is unavailable.
    fn set(&self, key: &str, value: &str);
    /// Remove a value if present.
    fn remove(&self, key: &str);
}

/// In-memory storage used natively and as a test double.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .ok()
            .and_then(|values| values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

/// Browser `localStorage` backend.
#[cfg(feature = "csr")]
#[derive(Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        let _ = storage.set_item(key, value);
    }

    fn remove(&self, key: &str) {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        let _ = storage.remove_item(key);
    }
}

/// Storage backend for the current build target.
pub fn default_storage() -> Arc<dyn SessionStorage> {
    #[cfg(feature = "csr")]
    {
        Arc::new(BrowserStorage)
    }
    #[cfg(not(feature = "csr"))]
    {
        Arc::new(MemoryStorage::default())
    }
}
