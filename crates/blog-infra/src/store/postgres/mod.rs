//! PostgreSQL Entity Store backend (SeaORM).
//!
//! Index-qualified point operations: `find_by_id`, fetch-merge-update and
//! `delete_by_id`. Atomicity is per row; the author reference on posts is a
//! plain uuid column without a foreign key, so deleting an author leaves
//! dangling references that population resolves to "absent" at read time.

mod author_store;
pub mod entity;
mod post_store;


use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

pub use author_store::PostgresAuthorStore;
pub use post_store::PostgresPostStore;

/// Configuration for the database connection pool.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Initialize the database connection from configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Initializing database connection...");

    let opts = ConnectOptions::new(&config.url)
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .to_owned();

    let conn = Database::connect(opts).await?;
    tracing::info!("Database connected (pool: {})", config.max_connections);
    Ok(conn)
}
