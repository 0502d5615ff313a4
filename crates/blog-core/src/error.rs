//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::validate::FieldError;

/// Domain errors - business logic failures.
///
/// Handlers classify these in a fixed order: not-found, then bad
/// request/validation, then forbidden, then a generic server error.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Forbidden")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn author_not_found(id: Uuid) -> Self {
        Self::NotFound(format!("Author with id {id} was not found"))
    }

    pub fn post_not_found(id: Uuid) -> Self {
        Self::NotFound(format!("Post with _id {id} Not Found!"))
    }

    pub fn comment_not_found(post_id: Uuid, comment_id: Uuid) -> Self {
        Self::NotFound(format!(
            "Comment with id {comment_id} was not found in post {post_id}"
        ))
    }
}

/// Store-level errors. Not-found is expressed through `Option` in the store
/// contract, never through this type.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Collection file I/O failed: {0}")]
    Io(String),

    #[error("Collection document is corrupt: {0}")]
    Corrupt(String),
}
