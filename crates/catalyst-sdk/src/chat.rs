//! Chat boards with an append-only message list.

use catalyst_entity::{new_id, now_millis, Collection, EntityResult, EntityState, KindSpec};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::seed;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub chat_id: String,
    pub user_id: String,
    pub text: String,
    /// Epoch milliseconds.
    pub ts: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatBoard {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl EntityState for ChatBoard {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

pub const CHATS: KindSpec<ChatBoard> =
    KindSpec::new("chat", "chats", ChatBoard::default).with_seed(seed::chats);

/// A board without its messages, as shown in listings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub id: String,
    pub title: String,
}

impl From<&ChatBoard> for ChatSummary {
    fn from(board: &ChatBoard) -> Self {
        Self {
            id: board.id.clone(),
            title: board.title.clone(),
        }
    }
}

/// Append a message to a board and return it.
///
/// Existence of the board is not checked here: sending to an unknown id
/// materializes a board from the initial state.
pub fn send_message(
    chats: &Collection<ChatBoard>,
    chat_id: &str,
    user_id: &str,
    text: &str,
) -> EntityResult<ChatMessage> {
    let message = ChatMessage {
        id: new_id(),
        chat_id: chat_id.to_string(),
        user_id: user_id.to_string(),
        text: text.to_string(),
        ts: now_millis(),
    };
    let appended = message.clone();
    chats.mutate(chat_id, move |mut board| {
        board.messages.push(appended);
        board
    })?;
    debug!(chat = chat_id, message = %message.id, "message appended");
    Ok(message)
}

pub fn list_messages(chats: &Collection<ChatBoard>, chat_id: &str) -> EntityResult<Vec<ChatMessage>> {
    Ok(chats.get_state(chat_id)?.messages)
}
