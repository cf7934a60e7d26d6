//! Durable local persistence for store snapshots.
//!
//! The storefront keeps no server-side state. Each persisted store serializes
//! its full state under its own namespaced key after every mutation and reads
//! it back once at startup, the way a browser app uses local storage.
//!
//! # Storage backends
//!
//! - [`MemoryStorage`] - in-process map, used by tests and ephemeral sessions
//! - [`FileStorage`] - one JSON file per key under a data directory
//!
//! # Failure semantics
//!
//! Nothing here is fatal. Missing, corrupt or version-mismatched snapshots load
//! as the default state; failed writes are reported to the owning store, which
//! logs them and keeps working in memory.

mod file;
mod memory;

use std::sync::Arc;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Version written into every snapshot envelope.
///
/// Bump when a store's serialized shape changes incompatibly; older snapshots
/// are then discarded instead of half-loaded.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors raised by a [`Storage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend cannot be used at all (e.g. poisoned lock, read-only medium).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the backend's quota.
    #[error("storage quota exceeded ({needed} bytes needed, {available} available)")]
    QuotaExceeded {
        /// Bytes the write would occupy.
        needed: usize,
        /// Bytes still free.
        available: usize,
    },

    /// Filesystem error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be encoded.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A string key-value medium.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written or is full.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage keys, namespaced per deployment.
pub mod keys {
    /// Cart lines.
    pub const CART: &str = "cart";
    /// Wishlist entries.
    pub const WISHLIST: &str = "wishlist";
    /// Recently viewed products.
    pub const RECENTLY_VIEWED: &str = "recently-viewed";

    /// Build the full key for a store under `namespace`.
    #[must_use]
    pub fn namespaced(namespace: &str, key: &str) -> String {
        format!("{namespace}:{key}")
    }
}

/// Versioned envelope around a persisted store state.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot<T> {
    version: u32,
    state: T,
}

/// Binds a store to its storage key and tracks write health.
///
/// A `Persistor` never fails its caller: load falls back to the default state
/// and save failures flip [`Persistor::is_degraded`].
#[derive(Clone)]
pub struct Persistor {
    storage: Arc<dyn Storage>,
    key: String,
    degraded: bool,
}

impl std::fmt::Debug for Persistor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistor")
            .field("key", &self.key)
            .field("degraded", &self.degraded)
            .finish_non_exhaustive()
    }
}

impl Persistor {
    /// Create a persistor for `key` under `namespace`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, namespace: &str, key: &str) -> Self {
        Self {
            storage,
            key: keys::namespaced(namespace, key),
            degraded: false,
        }
    }

    /// The full namespaced storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the most recent save failed.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Load the persisted state, or `T::default()` if there is none usable.
    pub fn load<T>(&self) -> T
    where
        T: DeserializeOwned + Default,
    {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "No snapshot found, starting empty");
                return T::default();
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "Failed to read snapshot, starting empty"
                );
                return T::default();
            }
        };

        match decode::<T>(&raw) {
            Ok(state) => state,
            Err(reason) => {
                tracing::warn!(key = %self.key, %reason, "Discarding unusable snapshot");
                T::default()
            }
        }
    }

    /// Persist `state`. Failures are logged and recorded, never returned.
    pub fn save<T>(&mut self, state: &T)
    where
        T: Serialize,
    {
        match self.try_save(state) {
            Ok(()) => {
                if self.degraded {
                    tracing::info!(key = %self.key, "Persistence recovered");
                }
                self.degraded = false;
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "Failed to persist snapshot, continuing in memory"
                );
                self.degraded = true;
            }
        }
    }

    /// Remove the persisted snapshot.
    pub fn erase(&mut self) {
        if let Err(e) = self.storage.remove(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "Failed to erase snapshot");
            self.degraded = true;
        }
    }

    fn try_save<T: Serialize>(&self, state: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&Snapshot {
            version: SNAPSHOT_VERSION,
            state,
        })?;
        self.storage.set(&self.key, &raw)
    }
}

/// Decode a snapshot envelope, describing why it was rejected on failure.
fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    #[derive(Deserialize)]
    struct Header {
        version: u32,
    }

    let header: Header = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    if header.version != SNAPSHOT_VERSION {
        return Err(format!(
            "snapshot version {} does not match {SNAPSHOT_VERSION}",
            header.version
        ));
    }
    serde_json::from_str::<Snapshot<T>>(raw)
        .map(|snapshot| snapshot.state)
        .map_err(|e| e.to_string())
}
