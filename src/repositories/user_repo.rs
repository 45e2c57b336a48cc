//! User repository for async database operations.
//!
//! Provides CRUD operations for the users table using diesel_async.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};

/// Store operations the user service depends on.
///
/// Update and delete report the number of affected rows; neither checks
/// whether the id exists first.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Counts every row in the table.
    async fn count(&self) -> AppResult<i64>;

    /// Returns at most `limit` rows after skipping `offset`, ordered by id.
    async fn list_window(&self, offset: i64, limit: i64) -> AppResult<Vec<User>>;

    /// Inserts a row and returns it with the store-assigned id.
    async fn insert(&self, new_user: NewUser) -> AppResult<User>;

    /// Overwrites every column of the row with the given id.
    async fn update(&self, user_id: i64, values: NewUser) -> AppResult<usize>;

    /// Removes the row with the given id.
    async fn delete(&self, user_id: i64) -> AppResult<usize>;
}

/// User repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn count(&self) -> AppResult<i64> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(|e| AppError::database("count users", e))
    }

    async fn list_window(&self, offset: i64, limit: i64) -> AppResult<Vec<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .select(User::as_select())
            .order(id.asc())
            .limit(limit)
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(|e| AppError::database("list users", e))
    }

    async fn insert(&self, new_user: NewUser) -> AppResult<User> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(users)
            .values(new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| AppError::database("insert user", e))
    }

    async fn update(&self, user_id: i64, values: NewUser) -> AppResult<usize> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(users.filter(id.eq(user_id)))
            .set(values)
            .execute(&mut conn)
            .await
            .map_err(|e| AppError::database("update user", e))
    }

    async fn delete(&self, user_id: i64) -> AppResult<usize> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(users.filter(id.eq(user_id)))
            .execute(&mut conn)
            .await
            .map_err(|e| AppError::database("delete user", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::db::{establish_async_connection_pool, run_migrations};
    use tempfile::TempDir;

    async fn repository(dir: &TempDir) -> UserRepository {
        let config = DatabaseConfig {
            url: dir.path().join("repo.db").to_string_lossy().into_owned(),
            ..DatabaseConfig::default()
        };
        run_migrations(&config.connection_path()).await.unwrap();
        UserRepository::new(establish_async_connection_pool(&config).await.unwrap())
    }

    fn new_user(name: &str, age: i64) -> NewUser {
        NewUser {
            name: name.to_string(),
            age,
            class: "A".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let dir = TempDir::new().unwrap();
        let repo = repository(&dir).await;

        let first = repo.insert(new_user("Ann", 30)).await.unwrap();
        let second = repo.insert(new_user("Bob", 31)).await.unwrap();

        assert!(first.id > 0);
        assert!(second.id > first.id);
        assert_eq!(first.name, "Ann");
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let dir = TempDir::new().unwrap();
        let repo = repository(&dir).await;

        let first = repo.insert(new_user("Ann", 30)).await.unwrap();
        assert_eq!(repo.delete(first.id).await.unwrap(), 1);

        let second = repo.insert(new_user("Bob", 31)).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_list_window_applies_offset_and_limit() {
        let dir = TempDir::new().unwrap();
        let repo = repository(&dir).await;
        for (i, name) in ["a", "b", "c", "d"].iter().enumerate() {
            repo.insert(new_user(name, i as i64)).await.unwrap();
        }

        let window = repo.list_window(1, 2).await.unwrap();
        let names: Vec<_> = window.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);

        assert!(repo.list_window(10, 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_rows_affect_nothing() {
        let dir = TempDir::new().unwrap();
        let repo = repository(&dir).await;

        assert_eq!(repo.update(999, new_user("X", 1)).await.unwrap(), 0);
        assert_eq!(repo.delete(999).await.unwrap(), 0);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_overwrites_all_columns() {
        let dir = TempDir::new().unwrap();
        let repo = repository(&dir).await;
        let user = repo.insert(new_user("Ann", 30)).await.unwrap();

        let affected = repo
            .update(
                user.id,
                NewUser {
                    name: "Anne".to_string(),
                    age: 31,
                    class: "B".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let stored = repo.list_window(0, 10).await.unwrap();
        assert_eq!(
            stored,
            vec![User {
                id: user.id,
                name: "Anne".to_string(),
                age: 31,
                class: "B".to_string(),
            }]
        );
    }
}
