//! PostgreSQL persistence for library panels.
//!
//! - [`models`] -- `FromRow` structs for each table.
//! - [`repositories`] -- zero-sized repos with async query methods.
//! - [`store::PgPanelStore`] -- the transactional panel store and connection tracker.
//! - [`access`] -- folder guard and user directory backed by the same database.

use sqlx::postgres::PgPoolOptions;

pub mod access;
pub mod error;
pub mod models;
pub mod repositories;
pub mod store;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all embedded migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
