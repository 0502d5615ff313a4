//! Author CRUD, avatar upload and CSV export.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::{Author, AuthorPatch, NewAuthor};
use blog_core::ports::{AssetScope, AuthorQuery};
use blog_core::validate::{validate_author_patch, validate_new_author};
use blog_shared::{Page, PageQuery};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AuthorListParams {
    pub name: Option<String>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

/// POST /authors
pub async fn create(
    state: web::Data<AppState>,
    input: web::Json<NewAuthor>,
) -> AppResult<HttpResponse> {
    let input = input.into_inner();
    validate_new_author(&input).map_err(AppError::Validation)?;

    let author = state.authors.create(Author::new(input)).await?;
    tracing::info!(id = %author.id, "author created");
    Ok(HttpResponse::Created().json(author))
}

/// GET /authors
pub async fn list(
    state: web::Data<AppState>,
    params: web::Query<AuthorListParams>,
) -> AppResult<HttpResponse> {
    let (skip, limit) = PageQuery {
        skip: params.skip,
        limit: params.limit,
    }
    .normalize();

    let query = AuthorQuery {
        name: params.name.clone(),
        skip,
        limit,
        newest_first: false,
    };
    let (authors, total) = state.authors.list(&query).await?;

    let base = format!("{}/authors", state.public_url);
    Ok(HttpResponse::Ok().json(Page::new(authors, total, &base, skip, limit)))
}

/// GET /authors/{id}
pub async fn get(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let author = state
        .authors
        .get(id)
        .await?
        .ok_or_else(|| DomainError::author_not_found(id))?;
    Ok(HttpResponse::Ok().json(author))
}

/// PUT /authors/{id}
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    patch: web::Json<AuthorPatch>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let patch = patch.into_inner();
    validate_author_patch(&patch).map_err(AppError::Validation)?;

    let author = state
        .authors
        .merge(id, &patch)
        .await?
        .ok_or_else(|| DomainError::author_not_found(id))?;
    Ok(HttpResponse::Ok().json(author))
}

/// DELETE /authors/{id}
pub async fn remove(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    state
        .authors
        .delete(id)
        .await?
        .ok_or_else(|| DomainError::author_not_found(id))?;
    tracing::info!(%id, "author deleted");
    Ok(HttpResponse::NoContent().finish())
}

/// POST /authors/{id}/upload/avatar
pub async fn upload_avatar(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    if state.authors.get(id).await?.is_none() {
        return Err(DomainError::author_not_found(id).into());
    }

    let (filename, bytes) = super::read_upload(payload).await?;
    let avatar = state
        .assets
        .save(AssetScope::Avatars, id, &filename, bytes)
        .await?;

    let patch = AuthorPatch {
        avatar: Some(avatar),
        ..Default::default()
    };
    let author = state
        .authors
        .merge(id, &patch)
        .await?
        .ok_or_else(|| DomainError::author_not_found(id))?;
    Ok(HttpResponse::Ok().json(author))
}

/// GET /authors/download/csv
pub async fn download_csv(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let authors = state.authors.all().await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["id", "name", "surname", "email", "birthDate", "avatar"])
        .map_err(|err| AppError::Internal(err.to_string()))?;
    for author in &authors {
        writer
            .write_record([
                author.id.to_string(),
                author.name.clone(),
                author.surname.clone(),
                author.email.clone(),
                author.birth_date.clone(),
                author.avatar.clone(),
            ])
            .map_err(|err| AppError::Internal(err.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| AppError::Internal(err.to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header(("Content-Disposition", "attachment; filename=Authors.csv"))
        .body(bytes))
}
