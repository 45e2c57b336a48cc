//! Async database connection pool implementation.
//!
//! Uses bb8 connection pool manager with diesel_async. SQLite has no native
//! async driver, so each connection is a `SyncConnectionWrapper` that runs
//! queries on tokio's blocking thread pool.

use std::time::Duration;

use diesel::ConnectionError;
use diesel::ConnectionResult;
use diesel::sqlite::SqliteConnection;
use diesel_async::pooled_connection::bb8::Pool;
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, SimpleAsyncConnection};
use futures::FutureExt;
use futures::future::BoxFuture;

use crate::config::DatabaseConfig;
use crate::error::AppError;

/// Connection type handed out by the pool.
pub type DbConnection = SyncConnectionWrapper<SqliteConnection>;

/// Async connection pool type alias.
///
/// bb8::Pool internally uses Arc, so Clone is cheap (just reference count increment).
pub type AsyncDbPool = Pool<DbConnection>;

/// Applied to every pooled connection right after it is opened.
///
/// WAL lets readers proceed while a writer holds the lock, and the busy
/// timeout makes concurrent writers wait instead of failing with SQLITE_BUSY.
const CONNECTION_PRAGMAS: &str = "PRAGMA journal_mode = WAL; PRAGMA busy_timeout = 5000;";

/// Creates an async database connection pool.
///
/// The pool eagerly opens `min_connections` connections, so an unreachable
/// database file fails here rather than on the first request.
///
/// # Errors
///
/// - `AppError::ConnectionPool` - If the initial connections cannot be established
///
/// # Example
///
/// ```ignore
/// let pool = establish_async_connection_pool(&settings.database).await?;
/// let mut conn = pool.get().await?;
/// ```
pub async fn establish_async_connection_pool(
    config: &DatabaseConfig,
) -> Result<AsyncDbPool, AppError> {
    let mut manager_config = ManagerConfig::<DbConnection>::default();
    manager_config.custom_setup = Box::new(establish_connection);

    let manager = AsyncDieselConnectionManager::<DbConnection>::new_with_config(
        config.connection_path(),
        manager_config,
    );

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await?;

    Ok(pool)
}

fn establish_connection(url: &str) -> BoxFuture<'_, ConnectionResult<DbConnection>> {
    async move {
        let mut conn = DbConnection::establish(url).await?;
        conn.batch_execute(CONNECTION_PRAGMAS)
            .await
            .map_err(ConnectionError::CouldntSetupConfiguration)?;
        Ok(conn)
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config(dir: &TempDir) -> DatabaseConfig {
        DatabaseConfig {
            url: dir.path().join("pool.db").to_string_lossy().into_owned(),
            max_connections: 2,
            ..DatabaseConfig::default()
        }
    }

    #[tokio::test]
    async fn test_pool_hands_out_working_connections() {
        let dir = TempDir::new().unwrap();
        let pool = establish_async_connection_pool(&temp_config(&dir))
            .await
            .expect("pool should build");

        let mut conn = pool.get().await.expect("connection should be available");
        conn.batch_execute("CREATE TABLE probe (id INTEGER PRIMARY KEY)")
            .await
            .expect("statement should run");
    }

    #[tokio::test]
    async fn test_pool_rejects_unopenable_path() {
        let dir = TempDir::new().unwrap();
        let config = DatabaseConfig {
            url: dir
                .path()
                .join("missing")
                .join("nested")
                .join("pool.db")
                .to_string_lossy()
                .into_owned(),
            connection_timeout: 1,
            ..DatabaseConfig::default()
        };

        let result = establish_async_connection_pool(&config).await;
        assert!(result.is_err());
    }
}
