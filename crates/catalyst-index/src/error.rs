//! Error types for the index crate.

/// Errors that can occur during index operations.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Ids stored in an index must be non-empty.
    #[error("invalid id for index {index}: {reason}")]
    InvalidId { index: String, reason: String },

    /// Store operation failed (read, persist, or decode of the id list).
    #[error("store error: {0}")]
    Store(#[from] catalyst_store::StoreError),
}

/// Convenience alias for index results.
pub type IndexResult<T> = Result<T, IndexError>;
