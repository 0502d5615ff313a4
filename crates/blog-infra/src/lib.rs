//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//! This crate contains the two Entity Store backends (JSON file and
//! PostgreSQL), filesystem asset storage, PDF rendering and outbound mail.

pub mod assets;
pub mod mail;
pub mod pdf;
pub mod store;

pub use assets::FsAssetStore;
pub use mail::{LogMailer, SmtpConfig, SmtpMailer};
pub use pdf::PrintPdfRenderer;
pub use store::file::{FileAuthorStore, FilePostStore};
pub use store::postgres::{DatabaseConfig, PostgresAuthorStore, PostgresPostStore, connect};
