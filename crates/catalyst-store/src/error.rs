/// Errors from record store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The kind name cannot be used as a storage namespace.
    #[error("invalid kind {kind:?}: {reason}")]
    InvalidKind { kind: String, reason: String },

    /// Records must be addressed by a non-empty id.
    #[error("record id must not be empty (kind {0})")]
    EmptyId(String),

    /// Ids longer than [`crate::names::MAX_ID_LEN`] bytes are rejected by every backend.
    #[error("record id of kind {kind} is {len} bytes, limit is {max}")]
    IdTooLong { kind: String, len: usize, max: usize },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A backend lock was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
