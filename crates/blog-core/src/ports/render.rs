use async_trait::async_trait;
use thiserror::Error;

use crate::domain::BlogPost;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF layout failed: {0}")]
    Layout(String),
}

/// Renders a blog post (cover, title, body) into a PDF document.
///
/// Implementations must not starve unrelated requests; CPU-bound layout
/// belongs on a blocking pool.
#[async_trait]
pub trait PostRenderer: Send + Sync {
    async fn render_pdf(&self, post: &BlogPost) -> Result<Vec<u8>, RenderError>;
}
