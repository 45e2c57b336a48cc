//! Embedded schema migrations.
//!
//! Migrations run on a plain synchronous `SqliteConnection` inside
//! `spawn_blocking`, separate from the async pool.

use diesel::Connection;
use diesel::migration::Migration;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::error::{AppError, AppResult};

/// Migrations compiled into the binary from the `migrations/` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applies all pending migrations and returns the applied versions.
///
/// Creating the `users` table is idempotent, so running this at every
/// startup is safe.
pub async fn run_migrations(database_path: &str) -> AppResult<Vec<String>> {
    let database_path = database_path.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = establish(&database_path, "establish connection for migrations")?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::Database {
                operation: "run pending migrations".to_string(),
                source: anyhow::anyhow!("Migration error: {}", e),
            })?;

        Ok(applied.iter().map(|m| m.to_string()).collect())
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })?
}

/// Lists migrations that have not been applied yet.
pub async fn pending_migrations(database_path: &str) -> AppResult<Vec<String>> {
    let database_path = database_path.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = establish(&database_path, "establish connection for migration check")?;

        let pending = conn
            .pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::Database {
                operation: "check pending migrations".to_string(),
                source: anyhow::anyhow!("Migration error: {}", e),
            })?;

        Ok(pending.iter().map(|m| m.name().to_string()).collect())
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })?
}

fn establish(database_path: &str, operation: &str) -> AppResult<SqliteConnection> {
    SqliteConnection::establish(database_path).map_err(|e| AppError::Database {
        operation: operation.to_string(),
        source: anyhow::anyhow!("Connection error: {}", e),
    })
}
