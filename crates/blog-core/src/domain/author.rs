use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author entity - a person who writes blog posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub birth_date: String,
    pub avatar: String,
    #[serde(default)]
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Placeholder avatar URL derived from the author's name.
pub fn placeholder_avatar(name: &str, surname: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}+{}",
        name.replace(' ', "+"),
        surname.replace(' ', "+")
    )
}

impl Author {
    /// Create a new author with generated ID and timestamps.
    ///
    /// A missing avatar falls back to a generated placeholder image.
    pub fn new(input: NewAuthor) -> Self {
        let avatar = input
            .avatar
            .unwrap_or_else(|| placeholder_avatar(&input.name, &input.surname));
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            surname: input.surname,
            email: input.email,
            birth_date: input.birth_date,
            avatar,
            is_admin: input.is_admin.unwrap_or(false),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payload for creating an author. Validated before any storage access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAuthor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub birth_date: String,
    pub avatar: Option<String>,
    pub is_admin: Option<bool>,
}

/// Partial update for an author. Unspecified fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthorPatch {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<String>,
    pub avatar: Option<String>,
    pub is_admin: Option<bool>,
}

impl AuthorPatch {
    /// Shallow-merge this patch into an existing record, bumping `updated_at`.
    pub fn apply(&self, author: &mut Author) {
        if let Some(name) = &self.name {
            author.name = name.clone();
        }
        if let Some(surname) = &self.surname {
            author.surname = surname.clone();
        }
        if let Some(email) = &self.email {
            author.email = email.clone();
        }
        if let Some(birth_date) = &self.birth_date {
            author.birth_date = birth_date.clone();
        }
        if let Some(avatar) = &self.avatar {
            author.avatar = avatar.clone();
        }
        if let Some(is_admin) = self.is_admin {
            author.is_admin = is_admin;
        }
        author.updated_at = Utc::now();
    }
}
