use std::sync::Arc;

use catalyst_entity::{now_millis, Collection, KeyedLocks, Page};
use catalyst_store::{FileRecordStore, InMemoryRecordStore, RecordStore};
use tracing::{debug, info, warn};

use crate::chat::{self, ChatBoard, ChatMessage, ChatSummary, CHATS};
use crate::config::{Backend, CatalystConfig};
use crate::connection::{Connection, ConnectionStatus, CONNECTIONS};
use crate::error::{SdkError, SdkResult};
use crate::mentor::{self, Mentor, MentorPatch, MentorQuery, MENTORS};
use crate::user::{PublicUser, User, UserPatch, USERS};

/// The Catalyst Connect data layer: four entity collections over one store.
///
/// All collections share one lock table, so a `Catalyst` is the unit of
/// in-process coordination. Wrap it in an `Arc` to share between threads.
pub struct Catalyst {
    config: CatalystConfig,
    store: Arc<dyn RecordStore>,
    users: Collection<User>,
    mentors: Collection<Mentor>,
    connections: Collection<Connection>,
    chats: Collection<ChatBoard>,
}

impl Catalyst {
    /// Open the backend named by `config`.
    pub fn open(config: CatalystConfig) -> SdkResult<Self> {
        config.validate()?;
        let store: Arc<dyn RecordStore> = match config.backend {
            Backend::Memory => Arc::new(InMemoryRecordStore::new()),
            Backend::File => Arc::new(FileRecordStore::open(&config.data_dir)?),
        };
        info!(backend = ?config.backend, data_dir = %config.data_dir.display(), "catalyst opened");
        let catalyst = Self::with_store(store, config);
        if catalyst.config.seed_on_open {
            catalyst.seed_all()?;
        }
        Ok(catalyst)
    }

    /// In-memory instance with default settings.
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(InMemoryRecordStore::new()), CatalystConfig::in_memory())
    }

    /// Use an existing store. `config.backend` and `config.data_dir` are ignored.
    pub fn with_store(store: Arc<dyn RecordStore>, config: CatalystConfig) -> Self {
        let locks = Arc::new(KeyedLocks::new());
        Self {
            users: Collection::with_locks(Arc::clone(&store), USERS, Arc::clone(&locks)),
            mentors: Collection::with_locks(Arc::clone(&store), MENTORS, Arc::clone(&locks)),
            connections: Collection::with_locks(Arc::clone(&store), CONNECTIONS, Arc::clone(&locks)),
            chats: Collection::with_locks(Arc::clone(&store), CHATS, locks),
            store,
            config,
        }
    }

    // ---- Accessors ----

    pub fn config(&self) -> &CatalystConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn users(&self) -> &Collection<User> {
        &self.users
    }

    pub fn mentors(&self) -> &Collection<Mentor> {
        &self.mentors
    }

    pub fn connections(&self) -> &Collection<Connection> {
        &self.connections
    }

    pub fn chats(&self) -> &Collection<ChatBoard> {
        &self.chats
    }

    /// Seed every kind that has a dataset. Returns the kinds seeded by this call.
    pub fn seed_all(&self) -> SdkResult<Vec<&'static str>> {
        let mut seeded = Vec::new();
        if self.users.ensure_seed()? {
            seeded.push(self.users.kind());
        }
        if self.mentors.ensure_seed()? {
            seeded.push(self.mentors.kind());
        }
        if self.chats.ensure_seed()? {
            seeded.push(self.chats.kind());
        }
        Ok(seeded)
    }

    // ---- Users ----

    pub fn list_users(&self, cursor: Option<&str>, limit: Option<usize>) -> SdkResult<Page<PublicUser>> {
        self.users.ensure_seed()?;
        let page = self.users.list(cursor, self.config.page_size(limit))?;
        Ok(page.map(PublicUser::from))
    }

    pub fn user(&self, id: &str) -> SdkResult<User> {
        self.users
            .get(id)?
            .ok_or_else(|| SdkError::not_found(self.users.kind(), id))
    }

    /// Register a user. Name and email are required.
    pub fn create_user(&self, user: User) -> SdkResult<User> {
        if user.name.trim().is_empty() || user.email.trim().is_empty() {
            return Err(SdkError::InvalidInput("name and email are required".into()));
        }
        Ok(self.users.create(user)?)
    }

    pub fn update_user(&self, id: &str, patch: &UserPatch) -> SdkResult<User> {
        if !self.users.exists(id)? {
            return Err(SdkError::not_found(self.users.kind(), id));
        }
        Ok(self.users.patch(id, patch)?)
    }

    pub fn delete_users<T: AsRef<str>>(&self, ids: &[T]) -> SdkResult<usize> {
        require_ids(ids)?;
        Ok(self.users.delete_many(ids)?)
    }

    /// Strip the credential before a user leaves the process.
    pub fn sanitize(user: User) -> PublicUser {
        PublicUser::from(user)
    }

    // ---- Mentors ----

    /// List or search mentors, seeding the directory first.
    ///
    /// An unfiltered query pages straight through the index; anything else
    /// scans and filters.
    pub fn browse_mentors(
        &self,
        query: &MentorQuery,
        cursor: Option<&str>,
        limit: Option<usize>,
    ) -> SdkResult<Page<Mentor>> {
        self.mentors.ensure_seed()?;
        let limit = self.config.page_size(limit);
        let page = if query.is_unfiltered() {
            self.mentors.list(cursor, limit)?
        } else {
            mentor::search_mentors(&self.mentors, query, cursor, limit)?
        };
        Ok(page)
    }

    pub fn mentor(&self, id: &str) -> SdkResult<Mentor> {
        self.mentors
            .get(id)?
            .ok_or_else(|| SdkError::not_found(self.mentors.kind(), id))
    }

    pub fn create_mentor(&self, mentor: Mentor) -> SdkResult<Mentor> {
        if mentor.name.trim().is_empty() {
            return Err(SdkError::InvalidInput("mentor name is required".into()));
        }
        Ok(self.mentors.create(mentor)?)
    }

    pub fn update_mentor(&self, id: &str, patch: &MentorPatch) -> SdkResult<Mentor> {
        if !self.mentors.exists(id)? {
            return Err(SdkError::not_found(self.mentors.kind(), id));
        }
        Ok(self.mentors.patch(id, patch)?)
    }

    pub fn delete_mentors<T: AsRef<str>>(&self, ids: &[T]) -> SdkResult<usize> {
        require_ids(ids)?;
        Ok(self.mentors.delete_many(ids)?)
    }

    // ---- Connections ----

    pub fn request_connection(
        &self,
        mentor_id: &str,
        mentee_id: &str,
        initial_message: Option<&str>,
    ) -> SdkResult<Connection> {
        if mentor_id.trim().is_empty() || mentee_id.trim().is_empty() {
            return Err(SdkError::InvalidInput("mentorId and menteeId are required".into()));
        }
        let connection = self.connections.create(Connection {
            mentor_id: mentor_id.to_string(),
            mentee_id: mentee_id.to_string(),
            status: ConnectionStatus::Pending,
            requested_at: now_millis(),
            initial_message: initial_message.map(str::to_string),
            ..Connection::default()
        })?;
        info!(connection = %connection.id, mentor = mentor_id, mentee = mentee_id, "connection requested");
        Ok(connection)
    }

    /// Accept or decline a request.
    ///
    /// Accepting opens a chat board for the pair unless one is already
    /// linked. Repeated or reversed responses are not rejected.
    pub fn respond_to_connection(&self, id: &str, status: &str) -> SdkResult<Connection> {
        let status: ConnectionStatus = status.parse()?;
        if status == ConnectionStatus::Pending {
            return Err(SdkError::InvalidStatus(status.to_string()));
        }
        let connection = self
            .connections
            .get(id)?
            .ok_or_else(|| SdkError::not_found(self.connections.kind(), id))?;

        let mut patch = serde_json::json!({ "status": status });
        if status == ConnectionStatus::Accepted {
            patch["acceptedAt"] = serde_json::json!(now_millis());
            if connection.chat_id.is_none() {
                let board = self.chats.create(ChatBoard {
                    title: self.chat_title(&connection)?,
                    ..ChatBoard::default()
                })?;
                patch["chatId"] = serde_json::json!(board.id);
            }
        }
        let updated = self.connections.patch(id, &patch)?;
        info!(connection = id, status = %status, chat = ?updated.chat_id, "connection answered");
        Ok(updated)
    }

    fn chat_title(&self, connection: &Connection) -> SdkResult<String> {
        let mentee = self.users.get(&connection.mentee_id)?;
        let mentor = self.mentors.get(&connection.mentor_id)?;
        let title = match (mentee, mentor) {
            (Some(mentee), Some(mentor)) => format!("Mentorship Chat: {} & {}", mentee.name, mentor.name),
            _ => {
                warn!(
                    connection = %connection.id,
                    mentor = %connection.mentor_id,
                    mentee = %connection.mentee_id,
                    "connection participant missing, titling chat by id"
                );
                format!("Mentorship Chat: {} & {}", connection.mentee_id, connection.mentor_id)
            }
        };
        Ok(title)
    }

    pub fn connection(&self, id: &str) -> SdkResult<Connection> {
        self.connections
            .get(id)?
            .ok_or_else(|| SdkError::not_found(self.connections.kind(), id))
    }

    pub fn list_connections(&self, cursor: Option<&str>, limit: Option<usize>) -> SdkResult<Page<Connection>> {
        Ok(self.connections.list(cursor, self.config.page_size(limit))?)
    }

    pub fn connections_for_mentee(&self, mentee_id: &str) -> SdkResult<Vec<Connection>> {
        self.connections_where(|c| c.mentee_id == mentee_id)
    }

    pub fn connections_for_mentor(&self, mentor_id: &str) -> SdkResult<Vec<Connection>> {
        self.connections_where(|c| c.mentor_id == mentor_id)
    }

    fn connections_where(&self, keep: impl Fn(&Connection) -> bool) -> SdkResult<Vec<Connection>> {
        let all = self.connections.list_all()?;
        Ok(all.into_iter().filter(|c| keep(c)).collect())
    }

    // ---- Chats ----

    pub fn list_chats(&self, cursor: Option<&str>, limit: Option<usize>) -> SdkResult<Page<ChatSummary>> {
        self.chats.ensure_seed()?;
        let page = self.chats.list(cursor, self.config.page_size(limit))?;
        Ok(page.map(|board| ChatSummary::from(&board)))
    }

    pub fn chat(&self, id: &str) -> SdkResult<ChatBoard> {
        self.chats
            .get(id)?
            .ok_or_else(|| SdkError::not_found(self.chats.kind(), id))
    }

    pub fn create_chat(&self, title: &str) -> SdkResult<ChatBoard> {
        let title = title.trim();
        if title.is_empty() {
            return Err(SdkError::InvalidInput("title is required".into()));
        }
        Ok(self.chats.create(ChatBoard {
            title: title.to_string(),
            ..ChatBoard::default()
        })?)
    }

    pub fn post_message(&self, chat_id: &str, user_id: &str, text: &str) -> SdkResult<ChatMessage> {
        let text = text.trim();
        if user_id.trim().is_empty() || text.is_empty() {
            return Err(SdkError::InvalidInput("userId and text are required".into()));
        }
        if !self.chats.exists(chat_id)? {
            return Err(SdkError::not_found(self.chats.kind(), chat_id));
        }
        Ok(chat::send_message(&self.chats, chat_id, user_id, text)?)
    }

    pub fn messages(&self, chat_id: &str) -> SdkResult<Vec<ChatMessage>> {
        if !self.chats.exists(chat_id)? {
            return Err(SdkError::not_found(self.chats.kind(), chat_id));
        }
        Ok(chat::list_messages(&self.chats, chat_id)?)
    }

    pub fn delete_chats<T: AsRef<str>>(&self, ids: &[T]) -> SdkResult<usize> {
        require_ids(ids)?;
        Ok(self.chats.delete_many(ids)?)
    }
}

impl std::fmt::Debug for Catalyst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalyst")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn require_ids<T: AsRef<str>>(ids: &[T]) -> SdkResult<()> {
    if ids.is_empty() {
        return Err(SdkError::InvalidInput("no ids given".into()));
    }
    debug!(count = ids.len(), "bulk delete requested");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalyst() -> Catalyst {
        Catalyst::in_memory()
    }

    fn add_mentor(c: &Catalyst, name: &str, tags: &[&str]) -> Mentor {
        c.create_mentor(Mentor {
            name: name.into(),
            title: "Mentor".into(),
            specialties: tags.iter().map(|t| t.to_string()).collect(),
            ..Mentor::default()
        })
        .unwrap()
    }

    fn add_user(c: &Catalyst, name: &str) -> User {
        c.create_user(User {
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: "secret".into(),
            ..User::default()
        })
        .unwrap()
    }

    // ---------------------------------------------------------------
    // Users & mentors
    // ---------------------------------------------------------------

    #[test]
    fn missing_records_are_not_found() {
        let c = catalyst();
        assert!(matches!(c.user("nobody"), Err(SdkError::NotFound { kind: "user", .. })));
        assert!(matches!(c.mentor("nobody"), Err(SdkError::NotFound { kind: "mentor", .. })));
        assert!(matches!(c.chat("nobody"), Err(SdkError::NotFound { kind: "chat", .. })));
        assert!(matches!(
            c.update_user("nobody", &UserPatch::default()),
            Err(SdkError::NotFound { .. })
        ));
        // The failed update must not materialize a record.
        assert!(!c.users().exists("nobody").unwrap());
    }

    #[test]
    fn update_user_patches_fields() {
        let c = catalyst();
        let user = add_user(&c, "Ada");
        let patch = UserPatch {
            bio: Some("Compilers".into()),
            ..UserPatch::default()
        };
        let updated = c.update_user(&user.id, &patch).unwrap();
        assert_eq!(updated.bio, "Compilers");
        assert_eq!(updated.name, "Ada");
        assert_eq!(updated.password_hash, "secret");
    }

    #[test]
    fn list_users_is_seeded_and_sanitized() {
        let c = catalyst();
        let page = c.list_users(None, Some(100)).unwrap();
        assert_eq!(page.items.len(), 3);
        let json = serde_json::to_value(&page.items).unwrap();
        assert!(json[0].get("passwordHash").is_none());
    }

    #[test]
    fn create_mentor_requires_name() {
        let c = catalyst();
        assert!(matches!(
            c.create_mentor(Mentor::default()),
            Err(SdkError::InvalidInput(_))
        ));
    }

    #[test]
    fn browse_mentors_dispatches_on_query() {
        let c = catalyst();
        let all = c.browse_mentors(&MentorQuery::default(), None, None).unwrap();
        assert_eq!(all.items.len(), 8);
        assert!(all.next.is_none());

        let design = c
            .browse_mentors(&MentorQuery::default().with_specialty("UX/UI Design"), None, None)
            .unwrap();
        assert_eq!(design.items.len(), 1);
        assert_eq!(design.items[0].id, "mentor-1");

        let small = c.browse_mentors(&MentorQuery::default(), None, Some(3)).unwrap();
        assert_eq!(small.items.len(), 3);
        assert_eq!(small.next.as_deref(), Some("mentor-3"));
    }

    #[test]
    fn update_mentor_merges_patch() {
        let c = catalyst();
        let m = add_mentor(&c, "Grace", &["Backend"]);
        let patch = MentorPatch {
            company: Some("Navy".into()),
            ..MentorPatch::default()
        };
        let updated = c.update_mentor(&m.id, &patch).unwrap();
        assert_eq!(updated.company, "Navy");
        assert_eq!(updated.specialties, vec!["Backend"]);
    }

    #[test]
    fn bulk_delete_rejects_empty_list() {
        let c = catalyst();
        let none: [&str; 0] = [];
        assert!(matches!(c.delete_users(&none), Err(SdkError::InvalidInput(_))));
        assert!(matches!(c.delete_mentors(&none), Err(SdkError::InvalidInput(_))));
        assert!(matches!(c.delete_chats(&none), Err(SdkError::InvalidInput(_))));
    }

    #[test]
    fn bulk_delete_counts_existing_only() {
        let c = catalyst();
        let a = add_mentor(&c, "A", &[]);
        let b = add_mentor(&c, "B", &[]);
        let removed = c.delete_mentors(&[a.id.as_str(), b.id.as_str(), "ghost"]).unwrap();
        assert_eq!(removed, 2);
        assert!(c.mentors().index().is_empty().unwrap());
    }

    // ---------------------------------------------------------------
    // Connections
    // ---------------------------------------------------------------

    #[test]
    fn request_requires_both_parties() {
        let c = catalyst();
        assert!(matches!(
            c.request_connection("", "u1", None),
            Err(SdkError::InvalidInput(_))
        ));
    }

    #[test]
    fn accept_opens_titled_chat() {
        let c = catalyst();
        let mentor = add_mentor(&c, "Grace", &[]);
        let mentee = add_user(&c, "Ada");
        let conn = c.request_connection(&mentor.id, &mentee.id, Some("hi")).unwrap();
        assert_eq!(conn.status, ConnectionStatus::Pending);
        assert!(conn.requested_at > 0);

        let accepted = c.respond_to_connection(&conn.id, "accepted").unwrap();
        assert_eq!(accepted.status, ConnectionStatus::Accepted);
        assert!(accepted.accepted_at.is_some());
        let chat = c.chat(accepted.chat_id.as_deref().unwrap()).unwrap();
        assert_eq!(chat.title, "Mentorship Chat: Ada & Grace");
        assert!(chat.messages.is_empty());

        // A second accept keeps the existing board.
        let again = c.respond_to_connection(&conn.id, "accepted").unwrap();
        assert_eq!(again.chat_id, accepted.chat_id);
    }

    #[test]
    fn accept_with_missing_parties_uses_ids() {
        let c = catalyst();
        let conn = c.request_connection("m-x", "u-x", None).unwrap();
        let accepted = c.respond_to_connection(&conn.id, "accepted").unwrap();
        let chat = c.chat(accepted.chat_id.as_deref().unwrap()).unwrap();
        assert_eq!(chat.title, "Mentorship Chat: u-x & m-x");
    }

    #[test]
    fn decline_opens_no_chat() {
        let c = catalyst();
        let conn = c.request_connection("m", "u", None).unwrap();
        let declined = c.respond_to_connection(&conn.id, "declined").unwrap();
        assert_eq!(declined.status, ConnectionStatus::Declined);
        assert!(declined.chat_id.is_none());
        assert!(declined.accepted_at.is_none());
    }

    #[test]
    fn respond_validates_status_and_id() {
        let c = catalyst();
        let conn = c.request_connection("m", "u", None).unwrap();
        assert!(matches!(
            c.respond_to_connection(&conn.id, "maybe"),
            Err(SdkError::InvalidStatus(_))
        ));
        assert!(matches!(
            c.respond_to_connection(&conn.id, "pending"),
            Err(SdkError::InvalidStatus(_))
        ));
        assert!(matches!(
            c.respond_to_connection("nope", "accepted"),
            Err(SdkError::NotFound { kind: "connection", .. })
        ));
    }

    #[test]
    fn connections_filter_by_party() {
        let c = catalyst();
        c.request_connection("m1", "u1", None).unwrap();
        c.request_connection("m2", "u1", None).unwrap();
        c.request_connection("m1", "u2", None).unwrap();
        assert_eq!(c.connections_for_mentee("u1").unwrap().len(), 2);
        assert_eq!(c.connections_for_mentor("m1").unwrap().len(), 2);
        assert!(c.connections_for_mentor("m9").unwrap().is_empty());
    }

    // ---------------------------------------------------------------
    // Chats
    // ---------------------------------------------------------------

    #[test]
    fn post_message_validates_input() {
        let c = catalyst();
        let chat = c.create_chat("  Room  ").unwrap();
        assert_eq!(chat.title, "Room");
        assert!(matches!(c.create_chat("   "), Err(SdkError::InvalidInput(_))));
        assert!(matches!(
            c.post_message(&chat.id, "u1", "   "),
            Err(SdkError::InvalidInput(_))
        ));
        assert!(matches!(
            c.post_message("missing", "u1", "hi"),
            Err(SdkError::NotFound { .. })
        ));
        let msg = c.post_message(&chat.id, "u1", " hi ").unwrap();
        assert_eq!(msg.text, "hi");
        assert_eq!(c.messages(&chat.id).unwrap(), vec![msg]);
    }

    #[test]
    fn list_chats_seeds_and_summarizes() {
        let c = catalyst();
        let page = c.list_chats(None, None).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id, "c1");
        assert_eq!(c.messages("c1").unwrap().len(), 1);
    }

    #[test]
    fn seed_all_reports_new_kinds_once() {
        let c = catalyst();
        assert_eq!(c.seed_all().unwrap(), vec!["user", "mentor", "chat"]);
        assert!(c.seed_all().unwrap().is_empty());
    }
}
