use std::collections::HashMap;
use std::sync::RwLock;

use crate::blob::Blob;
use crate::error::{StoreError, StoreResult};
use crate::names::{validate_id, validate_kind};
use crate::traits::RecordStore;

type RecordKey = (String, String);

/// In-memory, HashMap-based record store.
///
/// Intended for tests and embedding. All records are held in memory behind a
/// `RwLock` for safe concurrent access. Blobs are cloned on read/write and
/// lost when the store is dropped.
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<RecordKey, Blob>>,
}

impl InMemoryRecordStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Number of records currently stored, across all kinds.
    pub fn len(&self) -> usize {
        self.records.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all records from the store.
    pub fn clear(&self) -> StoreResult<()> {
        self.records.write().map_err(poisoned)?.clear();
        Ok(())
    }

    /// Return the sorted ids stored under `kind`.
    pub fn keys(&self, kind: &str) -> StoreResult<Vec<String>> {
        let map = self.records.read().map_err(poisoned)?;
        let mut ids: Vec<String> = map
            .keys()
            .filter(|(k, _)| k == kind)
            .map(|(_, id)| id.clone())
            .collect();
        ids.sort();
        Ok(ids)
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::LockPoisoned(e.to_string())
}

impl RecordStore for InMemoryRecordStore {
    fn read(&self, kind: &str, id: &str) -> StoreResult<Option<Blob>> {
        validate_kind(kind)?;
        validate_id(kind, id)?;
        let map = self.records.read().map_err(poisoned)?;
        Ok(map.get(&(kind.to_string(), id.to_string())).cloned())
    }

    fn write(&self, kind: &str, id: &str, blob: &Blob) -> StoreResult<()> {
        validate_kind(kind)?;
        validate_id(kind, id)?;
        let mut map = self.records.write().map_err(poisoned)?;
        map.insert((kind.to_string(), id.to_string()), blob.clone());
        Ok(())
    }

    fn remove(&self, kind: &str, id: &str) -> StoreResult<bool> {
        validate_kind(kind)?;
        validate_id(kind, id)?;
        let mut map = self.records.write().map_err(poisoned)?;
        Ok(map.remove(&(kind.to_string(), id.to_string())).is_some())
    }

    fn exists(&self, kind: &str, id: &str) -> StoreResult<bool> {
        validate_kind(kind)?;
        validate_id(kind, id)?;
        let map = self.records.read().map_err(poisoned)?;
        Ok(map.contains_key(&(kind.to_string(), id.to_string())))
    }
}

impl std::fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRecordStore")
            .field("record_count", &self.len())
            .finish()
    }
}
