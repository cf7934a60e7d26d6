//! In-process storage backend.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::{Storage, StorageError};

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl Inner {
    fn used_excluding(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

/// A `HashMap`-backed [`Storage`], optionally limited to a byte quota.
///
/// The quota counts key and value bytes, like browser local storage does, and
/// lets tests exercise the "quota exceeded" degradation path.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: Mutex<Inner>,
}

impl MemoryStorage {
    /// Create an unbounded storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage that rejects writes beyond `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        let storage = Self::new();
        storage.set_quota(Some(bytes));
        storage
    }

    /// Change or lift the byte quota.
    pub fn set_quota(&self, quota: Option<usize>) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.quota = quota;
        }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().map_or(0, |inner| inner.entries.len())
    }

    /// Whether no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StorageError> {
        self.inner
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_string()))
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.lock()?;
        if let Some(quota) = inner.quota {
            let available = quota.saturating_sub(inner.used_excluding(key));
            let needed = key.len() + value.len();
            if needed > available {
                return Err(StorageError::QuotaExceeded { needed, available });
            }
        }
        inner.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.entries.remove(key);
        Ok(())
    }
}
