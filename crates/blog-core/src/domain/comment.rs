use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rating assigned to a comment when none is supplied.
pub const DEFAULT_RATING: u8 = 1;

/// Comment embedded in a blog post.
///
/// The author reference is optional and resolved best-effort at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub author: Option<Uuid>,
    #[serde(default = "default_rating")]
    pub rating: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_rating() -> u8 {
    DEFAULT_RATING
}

impl Comment {
    /// Create a new comment with generated ID and timestamps.
    pub fn new(input: NewComment) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            text: input.text,
            author: input.author,
            rating: input.rating.unwrap_or(DEFAULT_RATING),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payload for adding a comment to a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    #[serde(default)]
    pub text: String,
    pub author: Option<Uuid>,
    pub rating: Option<u8>,
}
