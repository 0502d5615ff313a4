//! Comments sub-resource of blog posts.
//!
//! A 404 here always says which side is missing: the post or the comment.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::{Comment, NewComment};
use blog_core::validate::validate_new_comment;
use blog_shared::CommentResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /blogPosts/{id}/comments
pub async fn create(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    input: web::Json<NewComment>,
) -> AppResult<HttpResponse> {
    let post_id = id.into_inner();
    let input = input.into_inner();
    validate_new_comment(&input).map_err(AppError::Validation)?;

    let comment = state
        .posts
        .push_comment(post_id, Comment::new(input))
        .await?
        .ok_or_else(|| DomainError::post_not_found(post_id))?;

    let authors = match comment.author {
        Some(author_id) => state.authors.get_many(&[author_id]).await?,
        None => Vec::new(),
    };
    let lookup = blog_core::query::AuthorLookup::new(&authors);
    Ok(HttpResponse::Created().json(CommentResponse::project(&comment, &lookup)))
}

/// GET /blogPosts/{id}/comments
pub async fn list(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post_id = id.into_inner();
    let post = state
        .posts
        .get(post_id)
        .await?
        .ok_or_else(|| DomainError::post_not_found(post_id))?;

    let lookup = super::author_lookup_for(&state, std::slice::from_ref(&post)).await?;
    let comments: Vec<CommentResponse> = post
        .comments
        .iter()
        .map(|comment| CommentResponse::project(comment, &lookup))
        .collect();
    Ok(HttpResponse::Ok().json(comments))
}

/// GET /blogPosts/{id}/comments/{comment_id}
pub async fn get(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let post = state
        .posts
        .get(post_id)
        .await?
        .ok_or_else(|| DomainError::post_not_found(post_id))?;

    let lookup = super::author_lookup_for(&state, std::slice::from_ref(&post)).await?;
    let comment = post
        .comments
        .iter()
        .find(|comment| comment.id == comment_id)
        .ok_or_else(|| DomainError::comment_not_found(post_id, comment_id))?;
    Ok(HttpResponse::Ok().json(CommentResponse::project(comment, &lookup)))
}

/// DELETE /blogPosts/{id}/comments/{comment_id}
pub async fn remove(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    // Distinguish a missing post from a missing comment before mutating.
    if state.posts.get(post_id).await?.is_none() {
        return Err(DomainError::post_not_found(post_id).into());
    }

    state
        .posts
        .pull_comment(post_id, comment_id)
        .await?
        .ok_or_else(|| DomainError::comment_not_found(post_id, comment_id))?;
    tracing::info!(%post_id, %comment_id, "comment deleted");
    Ok(HttpResponse::NoContent().finish())
}
