//! Collection-level operations of one entity kind.
//!
//! A [`Collection`] is the "static side" of a kind: it owns the kind's
//! [`Index`] and hands out [`Entity`] handles for per-id work. Listing and
//! searching walk the index in order and load each blob; there is no
//! secondary structure to keep in sync beyond the index itself.

use std::sync::Arc;

use catalyst_index::Index;
use catalyst_store::{Blob, RecordStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::entity::Entity;
use crate::error::EntityResult;
use crate::kind::KindSpec;
use crate::locks::{KeyedLocks, Partition};
use crate::page::{start_after, Page};
use crate::state::{new_id, now_millis, EntityState};

/// Record kind holding the per-kind "seeded" markers.
pub const SEED_KIND: &str = "_seed";

/// Persisted marker written once a kind's seed dataset is loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedMarker {
    pub seeded_at: i64,
    pub count: usize,
}

/// All entities of one kind over a shared record store.
pub struct Collection<S: EntityState> {
    spec: KindSpec<S>,
    store: Arc<dyn RecordStore>,
    index: Index,
    locks: Arc<KeyedLocks>,
}

impl<S: EntityState> Collection<S> {
    /// Collection with its own lock table.
    pub fn new(store: Arc<dyn RecordStore>, spec: KindSpec<S>) -> Self {
        Self::with_locks(store, spec, Arc::new(KeyedLocks::new()))
    }

    /// Collection sharing `locks` with other collections of the same store.
    pub fn with_locks(store: Arc<dyn RecordStore>, spec: KindSpec<S>, locks: Arc<KeyedLocks>) -> Self {
        let index = Index::new(Arc::clone(&store), spec.index_name);
        Self {
            spec,
            store,
            index,
            locks,
        }
    }

    pub fn spec(&self) -> &KindSpec<S> {
        &self.spec
    }

    pub fn kind(&self) -> &'static str {
        self.spec.name
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub(crate) fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    pub(crate) fn locks(&self) -> &KeyedLocks {
        &self.locks
    }

    /// Handle for the entity `id`.
    pub fn entity(&self, id: impl Into<String>) -> Entity<'_, S> {
        Entity::new(self, id)
    }

    // ---------------------------------------------------------------
    // Per-id shorthands
    // ---------------------------------------------------------------

    pub fn exists(&self, id: &str) -> EntityResult<bool> {
        self.entity(id).exists()
    }

    pub fn get(&self, id: &str) -> EntityResult<Option<S>> {
        self.entity(id).get()
    }

    pub fn get_state(&self, id: &str) -> EntityResult<S> {
        self.entity(id).get_state()
    }

    pub fn patch<P: Serialize + ?Sized>(&self, id: &str, partial: &P) -> EntityResult<S> {
        self.entity(id).patch(partial)
    }

    pub fn mutate(&self, id: &str, f: impl FnOnce(S) -> S) -> EntityResult<S> {
        self.entity(id).mutate(f)
    }

    pub fn delete(&self, id: &str) -> EntityResult<bool> {
        self.entity(id).delete()
    }

    // ---------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------

    /// Store `state` and append its id to the index.
    ///
    /// An empty id is replaced by a fresh one. Creating an id that already
    /// exists overwrites its blob and leaves the index untouched. If the
    /// index append fails, the previous blob is put back (or the new one
    /// removed when there was none) and the error returned.
    pub fn create(&self, mut state: S) -> EntityResult<S> {
        if state.id().is_empty() {
            state.set_id(new_id());
        }
        let entity = self.entity(state.id());
        entity.locked(|| {
            let previous = self.store.read(self.kind(), entity.id())?;
            entity.write(&state)?;
            if let Err(err) = self.index_locked(|| Ok(self.index.append(entity.id())?)) {
                self.undo_write(entity.id(), previous);
                return Err(err);
            }
            Ok(())
        })?;
        debug!(kind = self.kind(), id = state.id(), "entity created");
        Ok(state)
    }

    fn undo_write(&self, id: &str, previous: Option<Blob>) {
        let undone = match &previous {
            Some(blob) => self.store.write(self.kind(), id, blob),
            None => self.store.remove(self.kind(), id).map(|_| ()),
        };
        if let Err(error) = undone {
            warn!(
                kind = self.kind(),
                id,
                restoring = previous.is_some(),
                error = %error,
                "failed to undo record write after index append failed"
            );
        }
    }

    /// Delete every id independently. Returns how many existed.
    ///
    /// Not atomic: an error stops the loop and earlier deletions stay
    /// committed.
    pub fn delete_many<I, T>(&self, ids: I) -> EntityResult<usize>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut deleted = 0;
        for id in ids {
            if self.delete(id.as_ref())? {
                deleted += 1;
            }
        }
        info!(kind = self.kind(), deleted, "bulk delete");
        Ok(deleted)
    }

    // ---------------------------------------------------------------
    // Enumeration
    // ---------------------------------------------------------------

    /// Page through the kind in index order.
    ///
    /// Takes up to `limit + 1` ids after `cursor`; when all of them are
    /// available the first `limit` are returned and `next` is the id of the
    /// last returned item. `limit` is raised to 1 if zero.
    pub fn list(&self, cursor: Option<&str>, limit: usize) -> EntityResult<Page<S>> {
        let limit = limit.max(1);
        let ids = self.index.list()?;
        let Some(start) = start_after(&ids, cursor) else {
            warn!(kind = self.kind(), cursor, "cursor not in index, returning empty page");
            return Ok(Page::empty());
        };

        let window: Vec<&String> = ids.iter().skip(start).take(limit + 1).collect();
        let has_more = window.len() > limit;
        let page_ids = &window[..window.len().min(limit)];

        let items = page_ids
            .iter()
            .map(|id| self.get_state(id))
            .collect::<EntityResult<Vec<_>>>()?;
        let next = if has_more {
            page_ids.last().map(|id| id.to_string())
        } else {
            None
        };
        Ok(Page { items, next })
    }

    /// Every entity of the kind, in index order.
    pub fn list_all(&self) -> EntityResult<Vec<S>> {
        self.index
            .list()?
            .iter()
            .map(|id| self.get_state(id))
            .collect()
    }

    /// Page through the entities for which `keep` returns `true`.
    ///
    /// Walks the index from `cursor`, loading every entity, until `limit + 1`
    /// matches are collected or the index ends; the number of non-matching
    /// ids visited is unbounded. The returned cursor is an index id, so it
    /// is only meaningful when resubmitted with the same predicate.
    pub fn scan_filter(
        &self,
        cursor: Option<&str>,
        limit: usize,
        mut keep: impl FnMut(&S) -> bool,
    ) -> EntityResult<Page<S>> {
        let limit = limit.max(1);
        let ids = self.index.list()?;
        let Some(start) = start_after(&ids, cursor) else {
            warn!(kind = self.kind(), cursor, "cursor not in index, returning empty page");
            return Ok(Page::empty());
        };

        let mut matched: Vec<(String, S)> = Vec::with_capacity(limit + 1);
        let mut visited = 0usize;
        for id in &ids[start..] {
            visited += 1;
            let state = self.get_state(id)?;
            if keep(&state) {
                matched.push((id.clone(), state));
                if matched.len() > limit {
                    break;
                }
            }
        }
        debug!(kind = self.kind(), visited, matched = matched.len(), "scan finished");

        let next = if matched.len() > limit {
            matched.truncate(limit);
            matched.last().map(|(id, _)| id.clone())
        } else {
            None
        };
        Ok(Page {
            items: matched.into_iter().map(|(_, state)| state).collect(),
            next,
        })
    }

    // ---------------------------------------------------------------
    // Seeding
    // ---------------------------------------------------------------

    /// Whether the kind's seed marker is set.
    pub fn is_seeded(&self) -> EntityResult<bool> {
        Ok(self.store.exists(SEED_KIND, self.kind())?)
    }

    /// Load the seed dataset unless the persisted marker says it was loaded.
    ///
    /// Cheap when already seeded (one existence probe). Concurrent first
    /// calls in one process seed once. If seeding fails midway the marker is
    /// not written and the next call creates every item again; creates of
    /// the same ids overwrite, so no duplicates appear. Returns `true` when
    /// this call did the seeding.
    pub fn ensure_seed(&self) -> EntityResult<bool> {
        if self.is_seeded()? {
            return Ok(false);
        }
        self.locks.with(Partition::Seed(self.kind().to_string()), || {
            if self.is_seeded()? {
                return Ok(false);
            }
            let seed = (self.spec.seed)();
            let count = seed.len();
            for state in seed {
                self.create(state)?;
            }
            let marker = SeedMarker {
                seeded_at: now_millis(),
                count,
            };
            self.store
                .write(SEED_KIND, self.kind(), &Blob::encode(&marker)?)?;
            info!(kind = self.kind(), count, "seed data loaded");
            Ok(true)
        })
    }

    // ---------------------------------------------------------------
    // Index plumbing
    // ---------------------------------------------------------------

    pub(crate) fn unindex(&self, id: &str) -> EntityResult<bool> {
        self.index_locked(|| Ok(self.index.remove(id)?))
    }

    fn index_locked<T>(&self, f: impl FnOnce() -> EntityResult<T>) -> EntityResult<T> {
        self.locks.with(Partition::Index(self.kind().to_string()), f)
    }
}

impl<S: EntityState> std::fmt::Debug for Collection<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("kind", &self.spec.name)
            .field("index", &self.spec.index_name)
            .finish()
    }
}
