use std::collections::BTreeMap;

use forms_types::{IdentityRecord, QueryKey};
use parking_lot::RwLock;
use serde_json::Value;

use crate::{CacheStore, IdentityStore};

#[derive(Clone, Debug)]
struct CacheEntry {
    data: Value,
    stale: bool,
}

/// In-memory read cache that records every invalidation.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<BTreeMap<QueryKey, CacheEntry>>,
    invalidations: RwLock<Vec<QueryKey>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store fresh data under `key`.
    pub fn put(&self, key: impl Into<QueryKey>, data: Value) {
        self.entries
            .write()
            .insert(key.into(), CacheEntry { data, stale: false });
    }

    pub fn get(&self, key: &QueryKey) -> Option<Value> {
        self.entries.read().get(key).map(|e| e.data.clone())
    }

    /// Unknown keys count as stale: there is nothing fresh to serve.
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries.read().get(key).map_or(true, |e| e.stale)
    }

    /// Every invalidation so far, in call order.
    pub fn invalidations(&self) -> Vec<QueryKey> {
        self.invalidations.read().clone()
    }

    pub fn invalidation_count(&self, key: &QueryKey) -> usize {
        self.invalidations.read().iter().filter(|k| *k == key).count()
    }
}

impl CacheStore for MemoryCache {
    fn invalidate(&self, key: &QueryKey) {
        if let Some(entry) = self.entries.write().get_mut(key) {
            entry.stale = true;
        }
        self.invalidations.write().push(key.clone());
    }
}

/// In-memory session holding the signed-in user's record.
#[derive(Debug, Default)]
pub struct SessionStore {
    record: RwLock<Option<IdentityRecord>>,
    updates: RwLock<usize>,
}

impl SessionStore {
    /// A session with nobody signed in.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(record: IdentityRecord) -> Self {
        Self {
            record: RwLock::new(Some(record)),
            updates: RwLock::new(0),
        }
    }

    /// Number of writes since creation.
    pub fn update_count(&self) -> usize {
        *self.updates.read()
    }
}

impl IdentityStore for SessionStore {
    fn current_identity(&self) -> Option<IdentityRecord> {
        self.record.read().clone()
    }

    fn update_identity(&self, record: IdentityRecord) {
        *self.record.write() = Some(record);
        *self.updates.write() += 1;
    }
}
