//! Indexed entity collections for the Catalyst store.
//!
//! An entity kind is described by a [`KindSpec`] value (kind name, index
//! name, initial state, seed dataset) rather than by a type hierarchy. A
//! [`Collection`] binds a [`KindSpec`] to a [`catalyst_store::RecordStore`] and
//! offers the whole capability surface of the kind:
//!
//! - per-id lifecycle through [`Entity`]: `exists`, `get_state`, `get`,
//!   `patch`, `mutate`, `delete`
//! - collection operations: `create`, `delete_many`, `list`, `list_all`,
//!   `scan_filter`, `ensure_seed`
//!
//! # Invariants
//!
//! 1. An id is in the kind's index iff a state blob is stored for it.
//! 2. Pages follow index order; the cursor is the last id of the previous
//!    page, and an unknown cursor yields an empty page, never an error.
//! 3. Seeding happens once per kind, guarded by a persisted marker record.
//! 4. Every read-modify-write of one entity holds that entity's partition
//!    lock; every index mutation holds the kind's index lock.

pub mod collection;
pub mod entity;
pub mod error;
pub mod kind;
pub mod locks;
pub mod page;
pub mod state;

pub use collection::{Collection, SeedMarker, SEED_KIND};
pub use entity::Entity;
pub use error::{EntityError, EntityResult};
pub use kind::KindSpec;
pub use locks::{KeyedLocks, Partition};
pub use page::Page;
pub use state::{new_id, now_millis, EntityState};
