//! Per-id handle over one entity's state.

use catalyst_store::Blob;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::collection::Collection;
use crate::error::{EntityError, EntityResult};
use crate::locks::Partition;
use crate::state::EntityState;

/// One logical record of a kind, addressed by id.
///
/// The handle is cheap; it holds no state of its own; every call round-trips
/// through the record store, which stays the single authority for the blob.
pub struct Entity<'a, S: EntityState> {
    collection: &'a Collection<S>,
    id: String,
}

impl<'a, S: EntityState> Entity<'a, S> {
    pub(crate) fn new(collection: &'a Collection<S>, id: impl Into<String>) -> Self {
        Self {
            collection,
            id: id.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &'static str {
        self.collection.spec().name
    }

    /// `true` iff a blob is stored for this id.
    pub fn exists(&self) -> EntityResult<bool> {
        Ok(self.collection.store().exists(self.kind(), &self.id)?)
    }

    /// Stored state, or `None` when the id has no blob.
    pub fn get(&self) -> EntityResult<Option<S>> {
        match self.collection.store().read(self.kind(), &self.id)? {
            Some(blob) => Ok(Some(blob.decode()?)),
            None => Ok(None),
        }
    }

    /// Stored state, falling back to the kind's initial state (carrying this
    /// id) when absent.
    ///
    /// Absence is not an error here. Callers that need "not found" semantics
    /// check [`exists`](Self::exists) or use [`get`](Self::get).
    pub fn get_state(&self) -> EntityResult<S> {
        match self.get()? {
            Some(state) => Ok(state),
            None => Ok(self.initial_state()),
        }
    }

    /// Shallow-merge the top-level fields of `partial` into the current
    /// state and write it back.
    ///
    /// A never-created id gets a blob built from the initial state. It is
    /// not added to the index; only [`Collection::create`] indexes.
    pub fn patch<P: Serialize + ?Sized>(&self, partial: &P) -> EntityResult<S> {
        self.locked(|| {
            let current = serde_json::to_value(self.get_state()?)?;
            let patch = serde_json::to_value(partial)?;

            let mut merged = match current {
                Value::Object(map) => map,
                other => return Err(self.not_an_object(&other)),
            };
            let fields = match patch {
                Value::Object(map) => map,
                other => return Err(self.not_an_object(&other)),
            };
            let keys: Vec<String> = fields.keys().cloned().collect();
            merged.extend(fields);

            let mut next: S = serde_json::from_value(Value::Object(merged))?;
            next.set_id(self.id.clone());
            self.write(&next)?;
            debug!(kind = self.kind(), id = %self.id, fields = ?keys, "entity patched");
            Ok(next)
        })
    }

    /// Replace the state with `f(current)` and write it back.
    ///
    /// Used where a shallow merge cannot express the change, such as
    /// appending to an embedded list. The id is kept equal to the record key.
    pub fn mutate(&self, f: impl FnOnce(S) -> S) -> EntityResult<S> {
        self.locked(|| {
            let mut next = f(self.get_state()?);
            next.set_id(self.id.clone());
            self.write(&next)?;
            debug!(kind = self.kind(), id = %self.id, "entity mutated");
            Ok(next)
        })
    }

    /// Remove the blob and the index entry. Returns whether the blob existed.
    ///
    /// The index entry is removed even when the blob was already gone.
    pub fn delete(&self) -> EntityResult<bool> {
        let existed = self.locked(|| {
            let existed = self.collection.store().remove(self.kind(), &self.id)?;
            self.collection.unindex(&self.id)?;
            Ok(existed)
        })?;
        debug!(kind = self.kind(), id = %self.id, existed, "entity deleted");
        Ok(existed)
    }

    pub(crate) fn write(&self, state: &S) -> EntityResult<()> {
        let blob = Blob::encode(state)?;
        self.collection.store().write(self.kind(), &self.id, &blob)?;
        Ok(())
    }

    pub(crate) fn locked<T>(&self, f: impl FnOnce() -> EntityResult<T>) -> EntityResult<T> {
        let partition = Partition::Entity {
            kind: self.kind().to_string(),
            id: self.id.clone(),
        };
        self.collection.locks().with(partition, f)
    }

    fn initial_state(&self) -> S {
        let mut state = (self.collection.spec().initial)();
        state.set_id(self.id.clone());
        state
    }

    fn not_an_object(&self, found: &Value) -> EntityError {
        let found = match found {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        };
        EntityError::NotAnObject {
            kind: self.kind().to_string(),
            found: found.to_string(),
        }
    }
}

impl<S: EntityState> std::fmt::Debug for Entity<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("kind", &self.kind())
            .field("id", &self.id)
            .finish()
    }
}
