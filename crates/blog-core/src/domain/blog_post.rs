use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Comment;

/// Informational reading-time estimate. Not validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadTime {
    pub value: u32,
    pub unit: String,
}

/// Blog post entity. Comments are embedded and cascade with the post.
///
/// The author is stored as a reference; the `{name, avatar}` projection is
/// resolved at read time. A dangling reference degrades to an absent author
/// rather than failing the read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub category: String,
    pub title: String,
    pub content: String,
    pub cover: Option<String>,
    pub read_time: Option<ReadTime>,
    pub author: Option<Uuid>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Create a new post with generated ID, timestamps and no comments.
    pub fn new(input: NewBlogPost, author: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            category: input.category,
            title: input.title,
            content: input.content,
            cover: input.cover,
            read_time: input.read_time,
            author,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payload for creating a blog post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPost {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub cover: Option<String>,
    pub read_time: Option<ReadTime>,
    pub author: Option<Uuid>,
}

/// Partial update for a blog post. Unspecified fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostPatch {
    pub category: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub cover: Option<String>,
    pub read_time: Option<ReadTime>,
    pub author: Option<Uuid>,
}

impl PostPatch {
    /// Shallow-merge this patch into an existing record, bumping `updated_at`.
    pub fn apply(&self, post: &mut BlogPost) {
        if let Some(category) = &self.category {
            post.category = category.clone();
        }
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
        if let Some(cover) = &self.cover {
            post.cover = Some(cover.clone());
        }
        if let Some(read_time) = &self.read_time {
            post.read_time = Some(read_time.clone());
        }
        if let Some(author) = self.author {
            post.author = Some(author);
        }
        post.updated_at = Utc::now();
    }
}
