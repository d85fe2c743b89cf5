//! Key-value local store held in memory, shaped like browser storage.

use std::collections::HashMap;
use std::sync::{
    Arc, RwLock,
    atomic::{AtomicBool, Ordering},
};

use tracing::warn;

use crate::{
    config::DEFAULT_DRAFT_STORAGE_KEY,
    draft::{domain::DraftSnapshot, ports::LocalDraftStore},
};

/// Thread-safe in-memory local draft store.
///
/// Clones and [`InMemoryLocalDraftStore::sharing`] handles see the same
/// underlying storage, which models several views writing one key.
#[derive(Debug, Clone)]
pub struct InMemoryLocalDraftStore {
    storage: Arc<RwLock<HashMap<String, String>>>,
    key: String,
    failing: Arc<AtomicBool>,
}

impl Default for InMemoryLocalDraftStore {
    fn default() -> Self {
        Self::with_key(DEFAULT_DRAFT_STORAGE_KEY)
    }
}

impl InMemoryLocalDraftStore {
    /// Creates an empty store using the default key.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store writing under `key`.
    #[must_use]
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            storage: Arc::default(),
            key: key.into(),
            failing: Arc::default(),
        }
    }

    /// Returns a handle on the same storage writing under `key`.
    #[must_use]
    pub fn sharing(&self, key: impl Into<String>) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            key: key.into(),
            failing: Arc::clone(&self.failing),
        }
    }

    /// Makes subsequent writes fail, as a full or disabled storage would.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns the raw serialized value under this store's key.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.storage
            .read()
            .ok()
            .and_then(|storage| storage.get(&self.key).cloned())
    }

    /// Writes a raw value under this store's key.
    pub fn put_raw(&self, value: impl Into<String>) {
        if let Ok(mut storage) = self.storage.write() {
            storage.insert(self.key.clone(), value.into());
        }
    }
}

impl LocalDraftStore for InMemoryLocalDraftStore {
    fn save(&self, snapshot: &DraftSnapshot) {
        if self.failing.load(Ordering::SeqCst) {
            warn!(key = %self.key, "local draft storage unavailable, snapshot not saved");
            return;
        }
        let encoded = match serde_json::to_string(snapshot) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to encode draft snapshot");
                return;
            }
        };
        match self.storage.write() {
            Ok(mut storage) => {
                storage.insert(self.key.clone(), encoded);
            }
            Err(err) => warn!(key = %self.key, error = %err, "local draft storage poisoned"),
        }
    }

    fn load(&self) -> Option<DraftSnapshot> {
        let raw = self.raw()?;
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(key = %self.key, error = %err, "ignoring unreadable draft snapshot");
                None
            }
        }
    }

    fn clear(&self) {
        if let Ok(mut storage) = self.storage.write() {
            storage.remove(&self.key);
        }
    }
}
