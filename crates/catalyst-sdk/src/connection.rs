//! Mentorship requests between a mentee and a mentor.

use std::fmt;
use std::str::FromStr;

use catalyst_entity::{EntityState, KindSpec};
use serde::{Deserialize, Serialize};

use crate::error::SdkError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Pending => "pending",
            ConnectionStatus::Accepted => "accepted",
            ConnectionStatus::Declined => "declined",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectionStatus {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ConnectionStatus::Pending),
            "accepted" => Ok(ConnectionStatus::Accepted),
            "declined" => Ok(ConnectionStatus::Declined),
            _ => Err(SdkError::InvalidStatus(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub mentor_id: String,
    pub mentee_id: String,
    #[serde(default)]
    pub status: ConnectionStatus,
    #[serde(default)]
    pub requested_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
}

impl EntityState for Connection {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Connections have no built-in dataset.
pub const CONNECTIONS: KindSpec<Connection> =
    KindSpec::new("connection", "connections", Connection::default);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Accepted".parse::<ConnectionStatus>().unwrap(), ConnectionStatus::Accepted);
        assert_eq!(" declined ".parse::<ConnectionStatus>().unwrap(), ConnectionStatus::Declined);
        assert!(matches!(
            "maybe".parse::<ConnectionStatus>(),
            Err(SdkError::InvalidStatus(s)) if s == "maybe"
        ));
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let conn = Connection {
            id: "c1".into(),
            mentor_id: "m1".into(),
            mentee_id: "u1".into(),
            requested_at: 5,
            chat_id: Some("chat-1".into()),
            ..Connection::default()
        };
        let json = serde_json::to_value(&conn).unwrap();
        assert_eq!(json["mentorId"], "m1");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["chatId"], "chat-1");
        assert!(json.get("acceptedAt").is_none());
    }

    #[test]
    fn clearing_chat_id_via_null_patch_field_decodes() {
        let json = serde_json::json!({
            "id": "c1", "mentorId": "m", "menteeId": "u", "chatId": null
        });
        let conn: Connection = serde_json::from_value(json).unwrap();
        assert_eq!(conn.chat_id, None);
        assert_eq!(conn.status, ConnectionStatus::Pending);
    }
}
