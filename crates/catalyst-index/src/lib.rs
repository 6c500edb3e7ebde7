//! Ordered id index for the Catalyst entity store.
//!
//! An [`Index`] is the enumeration backbone of one entity kind: an
//! insertion-ordered, duplicate-free list of live ids, persisted as a single
//! record in the underlying [`catalyst_store::RecordStore`]. Pagination order
//! is index order; nothing else is sorted.
//!
//! # Key Types
//!
//! - [`Index`] -- handle over one persisted id list
//! - [`IndexRecord`] -- the serialized form of the list

pub mod error;
pub mod index;

pub use error::{IndexError, IndexResult};
pub use index::{Index, IndexRecord, INDEX_KIND};
