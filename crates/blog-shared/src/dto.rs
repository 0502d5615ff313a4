//! Data Transfer Objects - response shapes for the API.
//!
//! Authors are returned as full records; posts and comments carry the
//! populated `{name, avatar}` author projection instead of the raw id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blog_core::domain::{BlogPost, Comment, ReadTime};
use blog_core::query::{AuthorCard, AuthorLookup};

/// A comment with its author reference resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorCard>,
    pub rating: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommentResponse {
    pub fn project(comment: &Comment, lookup: &AuthorLookup) -> Self {
        Self {
            id: comment.id,
            text: comment.text.clone(),
            author: lookup.resolve(comment.author),
            rating: comment.rating,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// A blog post with author references resolved for the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostResponse {
    pub id: Uuid,
    pub category: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<ReadTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorCard>,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPostResponse {
    pub fn project(post: &BlogPost, lookup: &AuthorLookup) -> Self {
        Self {
            id: post.id,
            category: post.category.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            cover: post.cover.clone(),
            read_time: post.read_time.clone(),
            author: lookup.resolve(post.author),
            comments: post
                .comments
                .iter()
                .map(|comment| CommentResponse::project(comment, lookup))
                .collect(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}
