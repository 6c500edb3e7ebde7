//! The persisted, ordered id list of one entity kind.
//!
//! [`Index`] keeps no in-memory copy of the list. Every operation reads the
//! persisted record, and every mutation writes the whole list back. A failed
//! write therefore leaves the previously persisted list in place: the
//! mutation is simply not committed.
//!
//! Mutations are read-modify-write on a shared record. Concurrent writers of
//! the same index must be serialized by the caller, otherwise one append can
//! overwrite another.

use std::sync::Arc;

use catalyst_store::{Blob, RecordStore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IndexError, IndexResult};

/// Record kind under which every index list is stored.
pub const INDEX_KIND: &str = "_index";

/// Serialized form of an index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub ids: Vec<String>,
}

/// Handle over the persisted id list named `name`.
#[derive(Clone)]
pub struct Index {
    name: String,
    store: Arc<dyn RecordStore>,
}

impl std::fmt::Debug for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Index").field("name", &self.name).finish()
    }
}

impl Index {
    /// Create a handle for the index `name` backed by `store`.
    pub fn new(store: Arc<dyn RecordStore>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            store,
        }
    }

    /// The index name (also its record id under [`INDEX_KIND`]).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full ordered id list. An index that was never written is empty.
    pub fn list(&self) -> IndexResult<Vec<String>> {
        Ok(self.load()?.ids)
    }

    /// Number of ids in the index.
    pub fn len(&self) -> IndexResult<usize> {
        Ok(self.load()?.ids.len())
    }

    /// Returns `true` if the index holds no ids.
    pub fn is_empty(&self) -> IndexResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Returns `true` if `id` is present.
    pub fn contains(&self, id: &str) -> IndexResult<bool> {
        Ok(self.position(id)?.is_some())
    }

    /// Position of `id` in index order.
    pub fn position(&self, id: &str) -> IndexResult<Option<usize>> {
        Ok(self.load()?.ids.iter().position(|x| x == id))
    }

    // ---------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------

    /// Append `id` at the end of the list.
    ///
    /// Appending an id that is already present is a no-op and returns
    /// `false`; the list is not rewritten in that case.
    pub fn append(&self, id: &str) -> IndexResult<bool> {
        self.check_id(id)?;
        let mut record = self.load()?;
        if record.ids.iter().any(|x| x == id) {
            return Ok(false);
        }
        record.ids.push(id.to_string());
        self.persist(&record)?;
        debug!(index = %self.name, id, len = record.ids.len(), "index append");
        Ok(true)
    }

    /// Remove `id` from the list. Returns `false` (no write) if absent.
    pub fn remove(&self, id: &str) -> IndexResult<bool> {
        let mut record = self.load()?;
        let Some(pos) = record.ids.iter().position(|x| x == id) else {
            return Ok(false);
        };
        record.ids.remove(pos);
        self.persist(&record)?;
        debug!(index = %self.name, id, len = record.ids.len(), "index remove");
        Ok(true)
    }

    fn check_id(&self, id: &str) -> IndexResult<()> {
        if id.is_empty() {
            return Err(IndexError::InvalidId {
                index: self.name.clone(),
                reason: "id must not be empty".into(),
            });
        }
        Ok(())
    }

    fn load(&self) -> IndexResult<IndexRecord> {
        match self.store.read(INDEX_KIND, &self.name)? {
            Some(blob) => Ok(blob.decode()?),
            None => Ok(IndexRecord::default()),
        }
    }

    fn persist(&self, record: &IndexRecord) -> IndexResult<()> {
        let blob = Blob::encode(record)?;
        self.store.write(INDEX_KIND, &self.name, &blob)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use catalyst_store::{InMemoryRecordStore, StoreError, StoreResult};

    /// Store whose writes can be switched to fail.
    #[derive(Default)]
    struct FlakyStore {
        inner: InMemoryRecordStore,
        fail_writes: AtomicBool,
    }

    impl RecordStore for FlakyStore {
        fn read(&self, kind: &str, id: &str) -> StoreResult<Option<Blob>> {
            self.inner.read(kind, id)
        }

        fn write(&self, kind: &str, id: &str, blob: &Blob) -> StoreResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Io(std::io::Error::other("disk full")));
            }
            self.inner.write(kind, id, blob)
        }

        fn remove(&self, kind: &str, id: &str) -> StoreResult<bool> {
            self.inner.remove(kind, id)
        }
    }

    fn make_index() -> Index {
        Index::new(Arc::new(InMemoryRecordStore::new()), "mentors")
    }

    #[test]
    fn new_index_is_empty() {
        let idx = make_index();
        assert!(idx.is_empty().unwrap());
        assert!(idx.list().unwrap().is_empty());
    }

    #[test]
    fn append_preserves_insertion_order() {
        let idx = make_index();
        for id in ["c", "a", "b"] {
            assert!(idx.append(id).unwrap());
        }
        assert_eq!(idx.list().unwrap(), vec!["c", "a", "b"]);
        assert_eq!(idx.position("a").unwrap(), Some(1));
    }

    #[test]
    fn duplicate_append_is_noop() {
        let idx = make_index();
        assert!(idx.append("a").unwrap());
        assert!(!idx.append("a").unwrap());
        assert_eq!(idx.list().unwrap(), vec!["a"]);
    }

    #[test]
    fn append_rejects_empty_id() {
        let idx = make_index();
        let err = idx.append("").unwrap_err();
        assert!(matches!(err, IndexError::InvalidId { .. }));
    }

    #[test]
    fn remove_present_and_absent() {
        let idx = make_index();
        idx.append("a").unwrap();
        idx.append("b").unwrap();

        assert!(idx.remove("a").unwrap());
        assert!(!idx.remove("a").unwrap());
        assert!(!idx.remove("never").unwrap());
        assert_eq!(idx.list().unwrap(), vec!["b"]);
        assert!(!idx.contains("a").unwrap());
    }

    #[test]
    fn handles_share_persisted_state() {
        let store: Arc<dyn RecordStore> = Arc::new(InMemoryRecordStore::new());
        let first = Index::new(Arc::clone(&store), "users");
        let second = Index::new(Arc::clone(&store), "users");
        let other = Index::new(store, "chats");

        first.append("u1").unwrap();
        assert_eq!(second.list().unwrap(), vec!["u1"]);
        assert!(other.is_empty().unwrap());
    }

    #[test]
    fn failed_append_is_not_committed() {
        let store = Arc::new(FlakyStore::default());
        let idx = Index::new(store.clone(), "users");
        idx.append("kept").unwrap();

        store.fail_writes.store(true, Ordering::SeqCst);
        let err = idx.append("lost").unwrap_err();
        assert!(matches!(err, IndexError::Store(StoreError::Io(_))));

        store.fail_writes.store(false, Ordering::SeqCst);
        assert_eq!(idx.list().unwrap(), vec!["kept"]);
    }

    #[test]
    fn failed_remove_is_not_committed() {
        let store = Arc::new(FlakyStore::default());
        let idx = Index::new(store.clone(), "users");
        idx.append("a").unwrap();

        store.fail_writes.store(true, Ordering::SeqCst);
        assert!(idx.remove("a").is_err());

        store.fail_writes.store(false, Ordering::SeqCst);
        assert!(idx.contains("a").unwrap());
    }

    #[test]
    fn corrupt_record_surfaces_as_store_error() {
        let store: Arc<dyn RecordStore> = Arc::new(InMemoryRecordStore::new());
        store
            .write(INDEX_KIND, "users", &Blob::new(b"{oops".to_vec()))
            .unwrap();
        let idx = Index::new(store, "users");
        let err = idx.list().unwrap_err();
        assert!(matches!(err, IndexError::Store(StoreError::Serialization(_))));
    }
}
