use catalyst_index::IndexError;
use catalyst_store::StoreError;

/// Errors from entity and collection operations.
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    /// Record store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Index read or persist failed.
    #[error("index error: {0}")]
    Index(#[from] IndexError),

    /// State could not be converted to or from its stored form.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Shallow merge needs both the state and the patch to be JSON objects.
    #[error("cannot patch {kind}: expected a JSON object, got {found}")]
    NotAnObject { kind: String, found: String },

    /// A partition lock was poisoned by a panicking holder.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

impl From<serde_json::Error> for EntityError {
    fn from(err: serde_json::Error) -> Self {
        EntityError::Serialization(err.to_string())
    }
}

/// Result alias for entity operations.
pub type EntityResult<T> = Result<T, EntityError>;
