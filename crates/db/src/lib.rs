//! Data layer: connection pool bootstrap, migrations, and the
//! model/repository pairs for each entity.
//!
//! Repositories are zero-sized structs with async methods. Plain reads
//! take `&SqlitePool`; steps that must compose into a larger atomic
//! operation take an open [`sqlx::Transaction`] owned by the caller.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

pub mod models;
pub mod repositories;

/// Embedded migrations from `db/migrations` at the workspace root.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../db/migrations");

/// Open a pool against `database_url`, creating the database file if
/// missing. WAL journaling and a busy timeout keep concurrent writers
/// queueing instead of failing fast; foreign keys are enforced so
/// membership rows follow their course/video on delete.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;
    tracing::debug!(database_url, "database pool created");
    Ok(pool)
}

/// Apply any pending migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Cheap connectivity probe for startup checks.
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}
