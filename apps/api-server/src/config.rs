//! Application configuration loaded from environment variables.

use std::env;

use blog_infra::{DatabaseConfig, mail::SmtpConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Base URL used to build pagination links.
    pub public_url: String,
    /// Directory the JSON collections live in (file backend only).
    pub data_dir: String,
    /// Directory uploaded images are written to.
    pub media_dir: String,
    pub database: Option<DatabaseConfig>,
    pub smtp: Option<SmtpConfig>,
    /// Assign a random existing author to posts created without one.
    pub demo_random_author: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        // SMTP is optional: without it the email endpoint logs instead of
        // sending.
        let smtp = match (env::var("SMTP_HOST"), env::var("SMTP_USERNAME")) {
            (Ok(host), Ok(username)) => Some(SmtpConfig {
                host,
                port: env::var("SMTP_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(587),
                username,
                password: env::var("SMTP_PASSWORD").unwrap_or_default(),
                from: env::var("SMTP_FROM").unwrap_or_else(|_| "blog@localhost".to_string()),
            }),
            _ => None,
        };

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        Self {
            public_url: env::var("PUBLIC_URL").unwrap_or_else(|_| format!("http://{host}:{port}")),
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
            media_dir: env::var("MEDIA_DIR").unwrap_or_else(|_| "media".to_string()),
            demo_random_author: env::var("DEMO_RANDOM_AUTHOR")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            host,
            port,
            database,
            smtp,
        }
    }
}
