use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Author, AuthorPatch, BlogPost, Comment, PostPatch};
use crate::error::StoreError;

/// Criteria for listing authors.
///
/// `total` in the list result is always the filtered count *before*
/// skip/limit are applied, so callers can build pagination metadata.
#[derive(Debug, Clone, Default)]
pub struct AuthorQuery {
    /// Case-insensitive substring match on the author name.
    pub name: Option<String>,
    pub skip: u64,
    pub limit: u64,
    pub newest_first: bool,
}

/// Criteria for listing blog posts.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    /// Case-insensitive substring match on the post title.
    pub title: Option<String>,
    pub skip: u64,
    pub limit: u64,
    pub newest_first: bool,
}

/// Author collection store.
///
/// Not-found is expressed through `Option`; `StoreError` is reserved for
/// storage faults. `merge` has shallow-merge semantics: unspecified patch
/// fields leave the stored record untouched.
#[async_trait]
pub trait AuthorStore: Send + Sync {
    async fn list(&self, query: &AuthorQuery) -> Result<(Vec<Author>, u64), StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Author>, StoreError>;

    /// Batched lookup used by read-time population. Unknown ids are simply
    /// absent from the result.
    async fn get_many(&self, ids: &[Uuid]) -> Result<Vec<Author>, StoreError>;

    /// The full collection, for CSV export and the demo author fallback.
    async fn all(&self) -> Result<Vec<Author>, StoreError>;

    async fn create(&self, author: Author) -> Result<Author, StoreError>;

    async fn merge(&self, id: Uuid, patch: &AuthorPatch) -> Result<Option<Author>, StoreError>;

    /// Delete by id, returning the removed record. Does not cascade to posts
    /// referencing the author; dangling references are tolerated.
    async fn delete(&self, id: Uuid) -> Result<Option<Author>, StoreError>;
}

/// Blog post collection store. Comments are embedded in their parent post
/// and can only be mutated through the post's update path.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn list(&self, query: &PostQuery) -> Result<(Vec<BlogPost>, u64), StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<BlogPost>, StoreError>;

    async fn create(&self, post: BlogPost) -> Result<BlogPost, StoreError>;

    async fn merge(&self, id: Uuid, patch: &PostPatch) -> Result<Option<BlogPost>, StoreError>;

    /// Delete by id, returning the removed record. Embedded comments cascade.
    async fn delete(&self, id: Uuid) -> Result<Option<BlogPost>, StoreError>;

    /// Append a comment to the post's comment sequence.
    /// Returns the stored comment, or `None` if the post does not exist.
    async fn push_comment(
        &self,
        post_id: Uuid,
        comment: Comment,
    ) -> Result<Option<Comment>, StoreError>;

    /// Remove a comment by id. Returns the removed comment, or `None` if
    /// either the post or the comment does not exist.
    async fn pull_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Option<Comment>, StoreError>;
}
