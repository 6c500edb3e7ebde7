//! Kind and id validation.
//!
//! Kinds double as storage namespaces (directory names for the file backend),
//! so they are restricted to a small, filesystem-safe alphabet:
//! - Must be non-empty and at most 64 bytes
//! - Only ASCII lowercase letters, digits, `_` and `-`
//!
//! Ids are opaque: any non-empty string of at most [`MAX_ID_LEN`] bytes.
//! The file backend hex-encodes ids into file names, which doubles their
//! length, so the limit keeps every id storable on common filesystems
//! (255-byte names) and the same on all backends.

use crate::error::{StoreError, StoreResult};

/// Longest accepted kind name.
pub const MAX_KIND_LEN: usize = 64;

/// Longest accepted record id, in bytes.
pub const MAX_ID_LEN: usize = 120;

/// Validate a kind name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use catalyst_store::names::validate_kind;
///
/// assert!(validate_kind("mentor").is_ok());
/// assert!(validate_kind("_index").is_ok());
/// assert!(validate_kind("").is_err());
/// assert!(validate_kind("../etc").is_err());
/// ```
pub fn validate_kind(kind: &str) -> StoreResult<()> {
    if kind.is_empty() {
        return Err(StoreError::InvalidKind {
            kind: kind.to_string(),
            reason: "kind must not be empty".into(),
        });
    }

    if kind.len() > MAX_KIND_LEN {
        return Err(StoreError::InvalidKind {
            kind: kind.to_string(),
            reason: format!("longer than {MAX_KIND_LEN} bytes"),
        });
    }

    if let Some(ch) = kind
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-'))
    {
        return Err(StoreError::InvalidKind {
            kind: kind.to_string(),
            reason: format!("contains forbidden character: {ch:?}"),
        });
    }

    Ok(())
}

/// Validate a record id for the given kind.
pub fn validate_id(kind: &str, id: &str) -> StoreResult<()> {
    if id.is_empty() {
        return Err(StoreError::EmptyId(kind.to_string()));
    }
    if id.len() > MAX_ID_LEN {
        return Err(StoreError::IdTooLong {
            kind: kind.to_string(),
            len: id.len(),
            max: MAX_ID_LEN,
        });
    }
    Ok(())
}
