use catalyst_entity::{EntityState, KindSpec};
use serde::{Deserialize, Serialize};

use crate::seed;

/// A registered person. Email uniqueness is enforced by callers, not here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password_hash: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub is_mentor: bool,
}

impl EntityState for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

pub const USERS: KindSpec<User> = KindSpec::new("user", "users", User::default).with_seed(seed::users);

/// A user as shown to other people: everything but the credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub bio: String,
    pub is_mentor: bool,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            bio: user.bio,
            is_mentor: user.is_mentor,
        }
    }
}

/// Profile fields a user may change.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_mentor: Option<bool>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.bio.is_none() && self.is_mentor.is_none()
    }
}
