//! HTTP handlers and route configuration.

mod authors;
mod blog_posts;
mod comments;
mod health;

use actix_multipart::Multipart;
use actix_web::web;
use futures::{StreamExt, TryStreamExt};

use blog_core::domain::BlogPost;
use blog_core::query::{AuthorLookup, referenced_author_ids};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Configure all application routes.
///
/// Literal segments are registered before `{id}` so `/authors/download/csv`
/// is not swallowed by the id matcher.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/authors")
                .route("", web::get().to(authors::list))
                .route("", web::post().to(authors::create))
                .route("/download/csv", web::get().to(authors::download_csv))
                .route("/{id}", web::get().to(authors::get))
                .route("/{id}", web::put().to(authors::update))
                .route("/{id}", web::delete().to(authors::remove))
                .route("/{id}/upload/avatar", web::post().to(authors::upload_avatar)),
        )
        .service(
            web::scope("/blogPosts")
                .route("", web::get().to(blog_posts::list))
                .route("", web::post().to(blog_posts::create))
                .route("/{id}", web::get().to(blog_posts::get))
                .route("/{id}", web::put().to(blog_posts::update))
                .route("/{id}", web::delete().to(blog_posts::remove))
                .route("/{id}/upload/cover", web::post().to(blog_posts::upload_cover))
                .route("/{id}/download/pdf", web::get().to(blog_posts::download_pdf))
                .route("/{id}/email", web::get().to(blog_posts::email))
                .route("/{id}/comments", web::get().to(comments::list))
                .route("/{id}/comments", web::post().to(comments::create))
                .route("/{id}/comments/{comment_id}", web::get().to(comments::get))
                .route(
                    "/{id}/comments/{comment_id}",
                    web::delete().to(comments::remove),
                ),
        );
}

/// Drain the first file field of a multipart upload into memory.
pub(crate) async fn read_upload(mut payload: Multipart) -> AppResult<(String, Vec<u8>)> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|err| AppError::BadRequest(err.to_string()))?
    {
        // Plain text fields carry no filename; only file fields count.
        let Some(filename) = field
            .content_disposition()
            .get_filename()
            .map(str::to_owned)
        else {
            while let Some(chunk) = field.next().await {
                chunk.map_err(|err| AppError::BadRequest(err.to_string()))?;
            }
            continue;
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|err| AppError::BadRequest(err.to_string()))?;
            bytes.extend_from_slice(&chunk);
        }
        return Ok((filename, bytes));
    }
    Err(AppError::BadRequest(
        "Multipart upload contained no file".to_string(),
    ))
}

/// Batched author lookup for response population.
pub(crate) async fn author_lookup_for(
    state: &AppState,
    posts: &[BlogPost],
) -> AppResult<AuthorLookup> {
    let ids = referenced_author_ids(posts);
    let authors = state.authors.get_many(&ids).await?;
    Ok(AuthorLookup::new(&authors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web::Data};
    use std::path::PathBuf;
    use std::sync::Arc;

    use blog_infra::{FileAuthorStore, FilePostStore, FsAssetStore, LogMailer, PrintPdfRenderer};

    async fn test_state() -> (AppState, PathBuf) {
        let dir = std::env::temp_dir().join(format!("blog_api_{}", uuid::Uuid::new_v4()));
        let state = AppState {
            authors: Arc::new(FileAuthorStore::open(&dir).await.unwrap()),
            posts: Arc::new(FilePostStore::open(&dir).await.unwrap()),
            assets: Arc::new(FsAssetStore::new(dir.join("media"))),
            mailer: Arc::new(LogMailer),
            renderer: Arc::new(PrintPdfRenderer::new()),
            public_url: "http://localhost:8080".to_string(),
            media_dir: dir.join("media"),
            demo_random_author: false,
        };
        (state, dir)
    }

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(Data::new($state))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn health_endpoint_reports_ok() {
        let (state, dir) = test_state().await;
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[actix_web::test]
    async fn author_create_then_fetch() {
        let (state, dir) = test_state().await;
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/authors")
            .set_json(serde_json::json!({
                "name": "Jane",
                "surname": "Doe",
                "email": "jane@doe.com",
                "birthDate": "1990-01-01"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(created["avatar"], "https://ui-avatars.com/api/?name=Jane+Doe");

        let req = test::TestRequest::get()
            .uri(&format!("/authors/{}", created["id"].as_str().unwrap()))
            .to_request();
        let fetched: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched, created);
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[actix_web::test]
    async fn invalid_author_payload_is_rejected_with_field_list() {
        let (state, dir) = test_state().await;
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/authors")
            .set_json(serde_json::json!({ "email": "not-an-email" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0]["message"], "Name is a mandatory field!");
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[actix_web::test]
    async fn unknown_post_delete_is_404_with_message() {
        let (state, dir) = test_state().await;
        let app = test_app!(state);

        let id = uuid::Uuid::new_v4();
        let req = test::TestRequest::delete()
            .uri(&format!("/blogPosts/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], format!("Post with _id {id} Not Found!"));
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[actix_web::test]
    async fn post_response_inlines_author_projection() {
        let (state, dir) = test_state().await;
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/authors")
            .set_json(serde_json::json!({
                "name": "Jane",
                "surname": "Doe",
                "email": "jane@doe.com",
                "birthDate": "1990-01-01"
            }))
            .to_request();
        let author: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/blogPosts")
            .set_json(serde_json::json!({
                "category": "rust",
                "title": "Ownership",
                "content": "Moves and borrows.",
                "author": author["id"]
            }))
            .to_request();
        let post: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(post["author"]["name"], "Jane Doe");
        assert!(post["author"].get("id").is_none());
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[actix_web::test]
    async fn post_with_unknown_author_is_rejected() {
        let (state, dir) = test_state().await;
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/blogPosts")
            .set_json(serde_json::json!({
                "category": "rust",
                "title": "Ownership",
                "content": "Moves and borrows.",
                "author": uuid::Uuid::new_v4()
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[actix_web::test]
    async fn avatar_upload_skips_plain_text_fields() {
        let (state, dir) = test_state().await;
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/authors")
            .set_json(serde_json::json!({
                "name": "Jane",
                "surname": "Doe",
                "email": "jane@doe.com",
                "birthDate": "1990-01-01"
            }))
            .to_request();
        let author: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let id = author["id"].as_str().unwrap();

        // A text field precedes the actual file part; the file must win.
        let body = concat!(
            "--boundary\r\n",
            "Content-Disposition: form-data; name=\"caption\"\r\n\r\n",
            "holiday picture\r\n",
            "--boundary\r\n",
            "Content-Disposition: form-data; name=\"avatar\"; filename=\"selfie.png\"\r\n",
            "Content-Type: image/png\r\n\r\n",
            "not-really-a-png\r\n",
            "--boundary--\r\n"
        );
        let req = test::TestRequest::post()
            .uri(&format!("/authors/{id}/upload/avatar"))
            .insert_header(("content-type", "multipart/form-data; boundary=boundary"))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(updated["avatar"], format!("/media/authors/{id}.png"));
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[actix_web::test]
    async fn author_listing_carries_pagination_links() {
        let (state, dir) = test_state().await;
        let app = test_app!(state);

        for name in ["Anna", "Beth", "Cora"] {
            let req = test::TestRequest::post()
                .uri("/authors")
                .set_json(serde_json::json!({
                    "name": name,
                    "surname": "Doe",
                    "email": format!("{}@doe.com", name.to_lowercase()),
                    "birthDate": "1990-01-01"
                }))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get()
            .uri("/authors?limit=2")
            .to_request();
        let page: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page["total"], 3);
        assert_eq!(page["items"].as_array().unwrap().len(), 2);
        assert_eq!(
            page["links"]["next"],
            "http://localhost:8080/authors?skip=2&limit=2"
        );
        assert!(page["links"].get("previous").is_none());
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[actix_web::test]
    async fn comment_lifecycle_on_a_post() {
        let (state, dir) = test_state().await;
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/blogPosts")
            .set_json(serde_json::json!({
                "category": "rust",
                "title": "Ownership",
                "content": "Moves and borrows."
            }))
            .to_request();
        let post: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let post_id = post["id"].as_str().unwrap();

        let req = test::TestRequest::post()
            .uri(&format!("/blogPosts/{post_id}/comments"))
            .set_json(serde_json::json!({ "text": "great read" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let comment: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(comment["rating"], 1);

        let req = test::TestRequest::get()
            .uri(&format!("/blogPosts/{post_id}/comments"))
            .to_request();
        let comments: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(comments.as_array().unwrap().len(), 1);

        let comment_id = comment["id"].as_str().unwrap();
        let req = test::TestRequest::delete()
            .uri(&format!("/blogPosts/{post_id}/comments/{comment_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::delete()
            .uri(&format!("/blogPosts/{post_id}/comments/{comment_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
