use serde::de::DeserializeOwned;
use serde::Serialize;

/// State stored for one entity.
///
/// The id is part of the state so that a loaded record is self-describing.
/// The store keeps it equal to the record key.
pub trait EntityState: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

/// Generate a fresh, unique, time-ordered entity id (UUID v7).
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// Current wall-clock time in milliseconds since the UNIX epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
