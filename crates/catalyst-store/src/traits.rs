use crate::blob::Blob;
use crate::error::StoreResult;

/// Durable keyed record store: one [`Blob`] per `(kind, id)`.
///
/// All implementations must satisfy these invariants:
/// - Read-your-writes for a single `(kind, id)` issued by the same caller.
/// - A write replaces any previous blob for the same key (last writer wins).
/// - No transactional guarantee spans more than one key.
/// - All I/O errors are propagated, never silently ignored or retried.
pub trait RecordStore: Send + Sync {
    /// Read the blob stored under `(kind, id)`.
    ///
    /// Returns `Ok(None)` if no record exists.
    fn read(&self, kind: &str, id: &str) -> StoreResult<Option<Blob>>;

    /// Write (create or replace) the blob stored under `(kind, id)`.
    fn write(&self, kind: &str, id: &str, blob: &Blob) -> StoreResult<()>;

    /// Remove the record under `(kind, id)`. Returns `true` if it existed.
    fn remove(&self, kind: &str, id: &str) -> StoreResult<bool>;

    /// Check whether a record exists.
    ///
    /// Default implementation reads the blob. Backends may override with a
    /// cheaper probe.
    fn exists(&self, kind: &str, id: &str) -> StoreResult<bool> {
        Ok(self.read(kind, id)?.is_some())
    }
}
