//! User service for business logic operations.
//!
//! Turns page requests into count + window queries and shapes the results
//! the handlers send back.

use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{NewUser, Page, PageRequest, User};
use crate::repositories::UserStore;

/// User service for handling user-related business logic.
///
/// The store is injected at construction, so tests can substitute their own.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    /// Creates a new UserService backed by the given store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Lists one page of users.
    ///
    /// Counts the whole table, then fetches the requested window. A failure
    /// in either query fails the whole call.
    pub async fn list_users(&self, request: PageRequest) -> AppResult<Page<User>> {
        let total = self.store.count().await?;
        let items = self
            .store
            .list_window(request.offset(), request.limit())
            .await?;
        Ok(Page::new(items, total, request))
    }

    /// Creates a new user and returns it with the assigned id.
    pub async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        let user = self.store.insert(new_user).await?;
        tracing::debug!(user_id = user.id, "User created");
        Ok(user)
    }

    /// Overwrites a user's fields.
    ///
    /// Returns the submitted values under the given id; the row is not
    /// re-read. Updating an id that does not exist is not an error.
    pub async fn update_user(&self, id: i64, values: NewUser) -> AppResult<User> {
        let affected = self.store.update(id, values.clone()).await?;
        if affected == 0 {
            tracing::debug!(user_id = id, "Update matched no rows");
        }
        Ok(values.with_id(id))
    }

    /// Deletes a user. Deleting an id that does not exist is not an error.
    pub async fn delete_user(&self, id: i64) -> AppResult<()> {
        let affected = self.store.delete(id).await?;
        if affected == 0 {
            tracing::debug!(user_id = id, "Delete matched no rows");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory store; `fail_with` makes every call return a database error.
    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<Vec<User>>,
        next_id: Mutex<i64>,
        fail_with: Option<&'static str>,
    }

    impl MemoryStore {
        fn failing(message: &'static str) -> Self {
            Self {
                fail_with: Some(message),
                ..Self::default()
            }
        }

        fn check(&self, operation: &str) -> AppResult<()> {
            match self.fail_with {
                Some(message) => Err(AppError::database(operation, anyhow::anyhow!(message))),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl UserStore for MemoryStore {
        async fn count(&self) -> AppResult<i64> {
            self.check("count users")?;
            Ok(self.rows.lock().unwrap().len() as i64)
        }

        async fn list_window(&self, offset: i64, limit: i64) -> AppResult<Vec<User>> {
            self.check("list users")?;
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn insert(&self, new_user: NewUser) -> AppResult<User> {
            self.check("insert user")?;
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let user = new_user.with_id(*next_id);
            self.rows.lock().unwrap().push(user.clone());
            Ok(user)
        }

        async fn update(&self, user_id: i64, values: NewUser) -> AppResult<usize> {
            self.check("update user")?;
            let mut rows = self.rows.lock().unwrap();
            match rows.iter_mut().find(|u| u.id == user_id) {
                Some(row) => {
                    *row = values.with_id(user_id);
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn delete(&self, user_id: i64) -> AppResult<usize> {
            self.check("delete user")?;
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|u| u.id != user_id);
            Ok(before - rows.len())
        }
    }

    fn user(name: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            age: 20,
            class: "C".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_users_builds_page_metadata() {
        let service = UserService::new(Arc::new(MemoryStore::default()));
        for name in ["a", "b", "c"] {
            service.create_user(user(name)).await.unwrap();
        }

        let page = service.list_users(PageRequest::new(2, 1)).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "b");
        assert_eq!(page.total, 3);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn test_list_users_past_the_end_is_empty() {
        let service = UserService::new(Arc::new(MemoryStore::default()));
        service.create_user(user("a")).await.unwrap();

        let page = service.list_users(PageRequest::new(5, 10)).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_update_echoes_submitted_values_for_missing_id() {
        let store = Arc::new(MemoryStore::default());
        let service = UserService::new(store.clone());

        let echoed = service.update_user(999, user("X")).await.unwrap();
        assert_eq!(echoed.id, 999);
        assert_eq!(echoed.name, "X");
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let service = UserService::new(Arc::new(MemoryStore::default()));
        let created = service.create_user(user("a")).await.unwrap();

        assert!(service.delete_user(created.id).await.is_ok());
        assert!(service.delete_user(created.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let service = UserService::new(Arc::new(MemoryStore::failing("disk I/O error")));

        let err = service.list_users(PageRequest::default()).await.unwrap_err();
        assert!(matches!(err, AppError::Database { .. }));
        assert_eq!(err.detail(), "disk I/O error");

        assert!(service.create_user(user("a")).await.is_err());
        assert!(service.update_user(1, user("a")).await.is_err());
        assert!(service.delete_user(1).await.is_err());
    }
}
