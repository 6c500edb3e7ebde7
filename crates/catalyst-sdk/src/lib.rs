//! Catalyst Connect domain layer.
//!
//! Defines the four entity kinds of the mentorship platform (users,
//! mentors, connections and chat boards) on top of `catalyst-entity`, the
//! mentor search, chat message append, and the [`Catalyst`] facade that
//! ties them to one configured store.

pub mod catalyst;
pub mod chat;
pub mod config;
pub mod connection;
pub mod error;
pub mod mentor;
mod seed;
pub mod specialties;
pub mod user;

pub use catalyst::Catalyst;
pub use chat::{list_messages, send_message, ChatBoard, ChatMessage, ChatSummary, CHATS};
pub use config::{Backend, CatalystConfig};
pub use connection::{Connection, ConnectionStatus, CONNECTIONS};
pub use error::{SdkError, SdkResult};
pub use mentor::{search_mentors, Mentor, MentorPatch, MentorQuery, MENTORS};
pub use specialties::ALL_SPECIALTIES;
pub use user::{PublicUser, User, UserPatch, USERS};

// Re-export the storage layer for embedders
pub use catalyst_entity::{Collection, Page};
pub use catalyst_store::{FileRecordStore, InMemoryRecordStore, RecordStore};
