//! Application state - shared across all handlers.

use std::path::PathBuf;
use std::sync::Arc;

use blog_core::ports::{AssetStore, AuthorStore, Mailer, PostRenderer, PostStore};
use blog_infra::{
    FileAuthorStore, FilePostStore, FsAssetStore, LogMailer, PostgresAuthorStore,
    PostgresPostStore, PrintPdfRenderer, SmtpMailer, connect,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authors: Arc<dyn AuthorStore>,
    pub posts: Arc<dyn PostStore>,
    pub assets: Arc<dyn AssetStore>,
    pub mailer: Arc<dyn Mailer>,
    pub renderer: Arc<dyn PostRenderer>,
    pub public_url: String,
    pub media_dir: PathBuf,
    pub demo_random_author: bool,
}

impl AppState {
    /// Build the application state with the backend the environment selects:
    /// PostgreSQL when DATABASE_URL is set, JSON flat files otherwise.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let (authors, posts): (Arc<dyn AuthorStore>, Arc<dyn PostStore>) = match &config.database {
            Some(db_config) => {
                let db = connect(db_config).await?;
                (
                    Arc::new(PostgresAuthorStore::new(db.clone())),
                    Arc::new(PostgresPostStore::new(db)),
                )
            }
            None => {
                tracing::warn!(
                    data_dir = %config.data_dir,
                    "DATABASE_URL not set. Persisting to JSON collection files."
                );
                let data_dir = PathBuf::from(&config.data_dir);
                (
                    Arc::new(FileAuthorStore::open(&data_dir).await?),
                    Arc::new(FilePostStore::open(&data_dir).await?),
                )
            }
        };

        let mailer: Arc<dyn Mailer> = match &config.smtp {
            Some(smtp) => Arc::new(SmtpMailer::new(smtp)?),
            None => {
                tracing::warn!("SMTP not configured. Outbound mail will only be logged.");
                Arc::new(LogMailer)
            }
        };

        tracing::info!("Application state initialized");

        Ok(Self {
            authors,
            posts,
            assets: Arc::new(FsAssetStore::new(&config.media_dir)),
            mailer,
            renderer: Arc::new(PrintPdfRenderer::new()),
            public_url: config.public_url.clone(),
            media_dir: PathBuf::from(&config.media_dir),
            demo_random_author: config.demo_random_author,
        })
    }
}
