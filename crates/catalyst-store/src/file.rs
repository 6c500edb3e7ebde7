//! Filesystem-backed record store.
//!
//! Layout on disk:
//!
//! ```text
//! <root>/
//!   <kind>/
//!     <hex(id)>.json
//! ```
//!
//! Ids are hex-encoded so arbitrary id strings map onto safe file names.
//! Every write lands in a temporary file in the kind directory and is then
//! renamed over the target, so readers observe either the old blob or the
//! new one, never a torn write.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::blob::Blob;
use crate::error::{StoreError, StoreResult};
use crate::names::{validate_id, validate_kind};
use crate::traits::RecordStore;

const RECORD_EXTENSION: &str = "json";

/// Durable record store keeping one file per record under a root directory.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    root: PathBuf,
    sync: bool,
}

impl FileRecordStore {
    /// Open (or create) a store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "opened file record store");
        Ok(Self { root, sync: true })
    }

    /// Toggle `fsync` of every record before it is renamed into place.
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// The root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the sorted ids stored under `kind`.
    pub fn ids(&self, kind: &str) -> StoreResult<Vec<String>> {
        validate_kind(kind)?;
        let dir = self.root.join(kind);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let bytes = hex::decode(stem)
                .map_err(|e| StoreError::Serialization(format!("bad record file name {stem}: {e}")))?;
            let id = String::from_utf8(bytes)
                .map_err(|e| StoreError::Serialization(format!("bad record file name {stem}: {e}")))?;
            ids.push(id);
        }
        ids.sort();
        Ok(ids)
    }

    fn record_path(&self, kind: &str, id: &str) -> StoreResult<PathBuf> {
        validate_kind(kind)?;
        validate_id(kind, id)?;
        Ok(self
            .root
            .join(kind)
            .join(format!("{}.{RECORD_EXTENSION}", hex::encode(id))))
    }
}

impl RecordStore for FileRecordStore {
    fn read(&self, kind: &str, id: &str) -> StoreResult<Option<Blob>> {
        let path = self.record_path(kind, id)?;
        match fs::read(&path) {
            Ok(data) => Ok(Some(Blob::new(data))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, kind: &str, id: &str, blob: &Blob) -> StoreResult<()> {
        let path = self.record_path(kind, id)?;
        let dir = self.root.join(kind);
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(&blob.data)?;
        if self.sync {
            tmp.as_file().sync_all()?;
        }
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;

        debug!(kind, id, bytes = blob.len(), "record written");
        Ok(())
    }

    fn remove(&self, kind: &str, id: &str) -> StoreResult<bool> {
        let path = self.record_path(kind, id)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(kind, id, "record removed");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, kind: &str, id: &str) -> StoreResult<bool> {
        let path = self.record_path(kind, id)?;
        Ok(path.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store() -> (TempDir, FileRecordStore) {
        let dir = TempDir::new().unwrap();
        let store = FileRecordStore::open(dir.path()).unwrap().with_sync(false);
        (dir, store)
    }

    #[test]
    fn write_and_read() {
        let (_dir, store) = open_store();
        store.write("mentor", "m1", &Blob::new(b"{}".to_vec())).unwrap();
        assert_eq!(
            store.read("mentor", "m1").unwrap(),
            Some(Blob::new(b"{}".to_vec()))
        );
    }

    #[test]
    fn read_missing_returns_none() {
        let (_dir, store) = open_store();
        assert!(store.read("mentor", "ghost").unwrap().is_none());
        assert!(!store.exists("mentor", "ghost").unwrap());
    }

    #[test]
    fn records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = FileRecordStore::open(dir.path()).unwrap();
            store.write("user", "u1", &Blob::new(b"\"ada\"".to_vec())).unwrap();
        }
        let reopened = FileRecordStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened.read("user", "u1").unwrap(),
            Some(Blob::new(b"\"ada\"".to_vec()))
        );
    }

    #[test]
    fn overwrite_replaces_content() {
        let (_dir, store) = open_store();
        store.write("user", "u1", &Blob::new(b"1".to_vec())).unwrap();
        store.write("user", "u1", &Blob::new(b"22".to_vec())).unwrap();
        assert_eq!(store.read("user", "u1").unwrap().unwrap().len(), 2);
        assert_eq!(store.ids("user").unwrap(), vec!["u1".to_string()]);
    }

    #[test]
    fn remove_reports_prior_existence() {
        let (_dir, store) = open_store();
        store.write("chat", "c1", &Blob::new(b"x".to_vec())).unwrap();
        assert!(store.remove("chat", "c1").unwrap());
        assert!(!store.remove("chat", "c1").unwrap());
    }

    #[test]
    fn ids_with_path_characters_are_encoded() {
        let (dir, store) = open_store();
        let id = "../../etc/passwd";
        store.write("user", id, &Blob::new(b"x".to_vec())).unwrap();

        assert_eq!(store.ids("user").unwrap(), vec![id.to_string()]);
        // Nothing escaped the kind directory.
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn longest_accepted_id_fits_in_a_file_name() {
        let (_dir, store) = open_store();
        let id = "x".repeat(crate::names::MAX_ID_LEN);
        store.write("mentor", &id, &Blob::new(b"{}".to_vec())).unwrap();
        assert!(store.exists("mentor", &id).unwrap());
        assert_eq!(store.ids("mentor").unwrap(), vec![id]);
    }

    #[test]
    fn overlong_id_is_rejected_before_io() {
        let (_dir, store) = open_store();
        let id = "x".repeat(crate::names::MAX_ID_LEN + 10);
        let err = store.write("mentor", &id, &Blob::new(vec![])).unwrap_err();
        assert!(matches!(err, StoreError::IdTooLong { .. }));
        assert!(store.ids("mentor").unwrap().is_empty());
    }

    #[test]
    fn ids_of_unknown_kind_is_empty() {
        let (_dir, store) = open_store();
        assert!(store.ids("nothing").unwrap().is_empty());
    }

    #[test]
    fn invalid_kind_never_touches_disk() {
        let (_dir, store) = open_store();
        let err = store.write("../up", "x", &Blob::new(vec![])).unwrap_err();
        assert!(matches!(err, StoreError::InvalidKind { .. }));
    }
}
