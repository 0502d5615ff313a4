use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Failed to compose message: {0}")]
    Compose(String),

    #[error("Mail dispatch failed: {0}")]
    Transport(String),
}

/// Outbound mail collaborator. The caller owns the lifecycle of the
/// attachment file and removes it after dispatch, whatever the outcome.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_post_pdf(
        &self,
        to: &str,
        subject: &str,
        pdf_path: &Path,
    ) -> Result<(), MailError>;
}
