//! Blog post CRUD, cover upload, PDF download and the email endpoint.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use rand::seq::SliceRandom;
use serde::Deserialize;
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::{BlogPost, NewBlogPost, PostPatch};
use blog_core::ports::{AssetScope, PostQuery};
use blog_core::validate::{validate_new_post, validate_post_patch};
use blog_shared::{ApiResponse, BlogPostResponse, Page, PageQuery};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PostListParams {
    pub title: Option<String>,
    /// The N most recently created posts, newest first.
    pub recent: Option<u64>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

async fn ensure_author_exists(state: &AppState, id: Uuid) -> AppResult<()> {
    if state.authors.get(id).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "Author with id {id} was not found"
        )));
    }
    Ok(())
}

/// POST /blogPosts
pub async fn create(
    state: web::Data<AppState>,
    input: web::Json<NewBlogPost>,
) -> AppResult<HttpResponse> {
    let input = input.into_inner();
    validate_new_post(&input).map_err(AppError::Validation)?;

    let author = match input.author {
        Some(id) => {
            ensure_author_exists(&state, id).await?;
            Some(id)
        }
        // Demo convenience: attach a random existing author when enabled.
        None if state.demo_random_author => {
            let authors = state.authors.all().await?;
            authors.choose(&mut rand::thread_rng()).map(|a| a.id)
        }
        None => None,
    };

    let post = state.posts.create(BlogPost::new(input, author)).await?;
    tracing::info!(id = %post.id, "blog post created");

    let lookup = super::author_lookup_for(&state, std::slice::from_ref(&post)).await?;
    Ok(HttpResponse::Created().json(BlogPostResponse::project(&post, &lookup)))
}

/// GET /blogPosts
pub async fn list(
    state: web::Data<AppState>,
    params: web::Query<PostListParams>,
) -> AppResult<HttpResponse> {
    let (skip, limit) = PageQuery {
        skip: params.skip,
        // ?recent=N takes precedence over an explicit limit
        limit: params.recent.or(params.limit),
    }
    .normalize();

    let query = PostQuery {
        title: params.title.clone(),
        skip,
        limit,
        newest_first: params.recent.is_some(),
    };
    let (posts, total) = state.posts.list(&query).await?;

    let lookup = super::author_lookup_for(&state, &posts).await?;
    let items: Vec<BlogPostResponse> = posts
        .iter()
        .map(|post| BlogPostResponse::project(post, &lookup))
        .collect();

    let base = format!("{}/blogPosts", state.public_url);
    Ok(HttpResponse::Ok().json(Page::new(items, total, &base, skip, limit)))
}

async fn fetch_post(state: &AppState, id: Uuid) -> AppResult<BlogPost> {
    state
        .posts
        .get(id)
        .await?
        .ok_or_else(|| DomainError::post_not_found(id).into())
}

/// GET /blogPosts/{id}
pub async fn get(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = fetch_post(&state, id.into_inner()).await?;
    let lookup = super::author_lookup_for(&state, std::slice::from_ref(&post)).await?;
    Ok(HttpResponse::Ok().json(BlogPostResponse::project(&post, &lookup)))
}

/// PUT /blogPosts/{id}
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    patch: web::Json<PostPatch>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let patch = patch.into_inner();
    validate_post_patch(&patch).map_err(AppError::Validation)?;
    if let Some(author_id) = patch.author {
        ensure_author_exists(&state, author_id).await?;
    }

    let post = state
        .posts
        .merge(id, &patch)
        .await?
        .ok_or_else(|| DomainError::post_not_found(id))?;
    let lookup = super::author_lookup_for(&state, std::slice::from_ref(&post)).await?;
    Ok(HttpResponse::Ok().json(BlogPostResponse::project(&post, &lookup)))
}

/// DELETE /blogPosts/{id}
pub async fn remove(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    state
        .posts
        .delete(id)
        .await?
        .ok_or_else(|| DomainError::post_not_found(id))?;
    tracing::info!(%id, "blog post deleted");
    Ok(HttpResponse::NoContent().finish())
}

/// POST /blogPosts/{id}/upload/cover
pub async fn upload_cover(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    fetch_post(&state, id).await?;

    let (filename, bytes) = super::read_upload(payload).await?;
    let cover = state
        .assets
        .save(AssetScope::Covers, id, &filename, bytes)
        .await?;

    let patch = PostPatch {
        cover: Some(cover),
        ..Default::default()
    };
    let post = state
        .posts
        .merge(id, &patch)
        .await?
        .ok_or_else(|| DomainError::post_not_found(id))?;
    let lookup = super::author_lookup_for(&state, std::slice::from_ref(&post)).await?;
    Ok(HttpResponse::Ok().json(BlogPostResponse::project(&post, &lookup)))
}

/// GET /blogPosts/{id}/download/pdf
pub async fn download_pdf(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = fetch_post(&state, id.into_inner()).await?;
    let pdf = state.renderer.render_pdf(&post).await?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(("Content-Disposition", "attachment; filename=blog-post.pdf"))
        .body(pdf))
}

/// GET /blogPosts/{id}/email
///
/// Renders the post to a transient PDF file, mails it to the post's author
/// and removes the file whatever the dispatch outcome.
pub async fn email(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = fetch_post(&state, id.into_inner()).await?;

    let author_id = post.author.ok_or_else(|| {
        AppError::BadRequest("Post has no author to send the email to".to_string())
    })?;
    let author = state.authors.get(author_id).await?.ok_or_else(|| {
        AppError::BadRequest("Post has no author to send the email to".to_string())
    })?;

    let pdf = state.renderer.render_pdf(&post).await?;

    tokio::fs::create_dir_all(&state.media_dir)
        .await
        .map_err(|err| AppError::Internal(err.to_string()))?;
    let pdf_path = state.media_dir.join(format!("{}.pdf", post.id));
    tokio::fs::write(&pdf_path, &pdf)
        .await
        .map_err(|err| AppError::Internal(err.to_string()))?;

    let outcome = state
        .mailer
        .send_post_pdf(&author.email, &post.title, &pdf_path)
        .await;

    if let Err(err) = tokio::fs::remove_file(&pdf_path).await {
        tracing::warn!(path = %pdf_path.display(), error = %err, "transient PDF not removed");
    }
    outcome?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "Email sent!")))
}
