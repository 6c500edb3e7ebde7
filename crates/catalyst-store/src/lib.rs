//! Keyed record storage for the Catalyst entity store.
//!
//! This crate is the leaf of the storage stack: a durable get/set of a single
//! serialized [`Blob`] per `(kind, id)` pair. Everything above it (indexes,
//! entities, collections) treats the store as the authority for bytes and
//! never interprets anything beyond the JSON helpers on [`Blob`].
//!
//! # Storage Backends
//!
//! All backends implement the [`RecordStore`] trait:
//!
//! - [`InMemoryRecordStore`] -- `HashMap`-based store for tests and embedding
//! - [`FileRecordStore`] -- one file per record, atomic replace on write
//!
//! # Design Rules
//!
//! 1. Read-your-writes for a single `(kind, id)` from the same caller.
//! 2. No cross-key transactions are offered or assumed.
//! 3. Kind names are validated before they touch a backend.
//! 4. All I/O errors are propagated, never retried or swallowed.

pub mod blob;
pub mod error;
pub mod file;
pub mod memory;
pub mod names;
pub mod traits;

pub use blob::Blob;
pub use error::{StoreError, StoreResult};
pub use file::FileRecordStore;
pub use memory::InMemoryRecordStore;
pub use names::{validate_id, validate_kind, MAX_ID_LEN, MAX_KIND_LEN};
pub use traits::RecordStore;
