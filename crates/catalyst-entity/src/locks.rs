//! Process-local partition locks.
//!
//! Each entity id is its own partition: every read-modify-write on a single
//! `(kind, id)` runs under that partition's mutex, so one id has exactly one
//! writer at a time while different ids proceed in parallel. The per-kind
//! index and the per-kind seed routine are partitions of their own.
//!
//! Acquisition order is `Seed -> Entity -> Index`; code in this crate never
//! takes them in any other order.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::{EntityError, EntityResult};

/// A lockable unit of state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Partition {
    /// State of one entity.
    Entity { kind: String, id: String },
    /// The id list of one kind.
    Index(String),
    /// The seeding routine of one kind.
    Seed(String),
}

/// Table of partition mutexes, shared by every collection over one store.
#[derive(Default)]
pub struct KeyedLocks {
    table: Mutex<HashMap<Partition, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutex guarding `partition`. Lock the returned handle to enter it.
    ///
    /// The table entry lives until a later [`KeyedLocks::with`] on the same
    /// partition finds it unused.
    pub fn handle(&self, partition: Partition) -> EntityResult<Arc<Mutex<()>>> {
        let mut table = self.table.lock().map_err(poisoned)?;
        Ok(Arc::clone(table.entry(partition).or_default()))
    }

    /// Run `f` while holding `partition`, then drop the table entry if no
    /// other thread holds or waits for it.
    pub fn with<T>(
        &self,
        partition: Partition,
        f: impl FnOnce() -> EntityResult<T>,
    ) -> EntityResult<T> {
        let handle = self.handle(partition.clone())?;
        let result = {
            let _guard = handle.lock().map_err(poisoned)?;
            f()
        };
        self.release(&partition, handle)?;
        result
    }

    /// Handles are only handed out under the table lock, so an entry whose
    /// `Arc` is owned by the table alone has nobody holding or waiting.
    fn release(&self, partition: &Partition, handle: Arc<Mutex<()>>) -> EntityResult<()> {
        let mut table = self.table.lock().map_err(poisoned)?;
        drop(handle);
        if table
            .get(partition)
            .is_some_and(|entry| Arc::strong_count(entry) == 1)
        {
            table.remove(partition);
        }
        Ok(())
    }

    /// Number of partitions currently tracked.
    pub fn len(&self) -> usize {
        self.table.lock().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for KeyedLocks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedLocks")
            .field("partitions", &self.len())
            .finish()
    }
}

pub(crate) fn poisoned<E: std::fmt::Display>(e: E) -> EntityError {
    EntityError::LockPoisoned(e.to_string())
}
