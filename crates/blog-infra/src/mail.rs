//! Outbound mail over SMTP with lettre.

use std::path::Path;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use blog_core::ports::{MailError, Mailer};

const ATTACHMENT_NAME: &str = "blog-post.pdf";

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|err| MailError::Transport(err.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        Ok(Self {
            transport,
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_post_pdf(
        &self,
        to: &str,
        subject: &str,
        pdf_path: &Path,
    ) -> Result<(), MailError> {
        let pdf = tokio::fs::read(pdf_path)
            .await
            .map_err(|err| MailError::Compose(err.to_string()))?;

        let content_type = ContentType::parse("application/pdf")
            .map_err(|err| MailError::Compose(err.to_string()))?;

        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|err: lettre::address::AddressError| {
                        MailError::Compose(err.to_string())
                    })?,
            )
            .to(to
                .parse()
                .map_err(|err: lettre::address::AddressError| {
                    MailError::Compose(err.to_string())
                })?)
            .subject(subject)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(
                        "Your requested blog post is attached as a PDF.".to_string(),
                    ))
                    .singlepart(
                        Attachment::new(ATTACHMENT_NAME.to_string()).body(pdf, content_type),
                    ),
            )
            .map_err(|err| MailError::Compose(err.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|err| MailError::Transport(err.to_string()))?;

        tracing::info!(%to, "sent post PDF by mail");
        Ok(())
    }
}

/// Dispatch sink used when SMTP is not configured. Logs instead of sending
/// so the endpoint stays usable in local development.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_post_pdf(
        &self,
        to: &str,
        subject: &str,
        pdf_path: &Path,
    ) -> Result<(), MailError> {
        tracing::warn!(
            %to,
            subject,
            attachment = %pdf_path.display(),
            "SMTP not configured, mail not actually sent"
        );
        Ok(())
    }
}
