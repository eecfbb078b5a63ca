use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::models::{PhoneModel, UserModel};
use crate::shared::AppError;

/// Trait for user repository operations.
///
/// The store is the final authority on email uniqueness: `create_user` must
/// reject a duplicate email at insert time even when a concurrent request
/// slipped past the `exists_by_email` pre-check.
#[async_trait]
pub trait UserRepository {
    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError>;
    /// Persists the user and its phones as a single atomic unit.
    async fn create_user(&self, user: &UserModel) -> Result<(), AppError>;
    async fn list_users(&self) -> Result<Vec<UserModel>, AppError>;
}

/// In-memory implementation of UserRepository for development and testing
///
/// Uniqueness is enforced under the same lock as the insert, so the
/// insert-time conflict semantics match the database-backed implementation.
/// Data is lost when the application restarts.
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, UserModel>>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Creates an in-memory repository with pre-populated users
    pub fn with_users(users: Vec<UserModel>) -> Self {
        let mut user_map = HashMap::new();
        for user in users {
            user_map.insert(user.id, user);
        }

        Self {
            users: Mutex::new(user_map),
        }
    }

    /// Returns the current number of users in the repository
    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self))]
    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().any(|user| user.email == email))
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create_user(&self, user: &UserModel) -> Result<(), AppError> {
        debug!(user_id = %user.id, "Creating user in memory");

        let mut users = self.users.lock().unwrap();
        if users.values().any(|existing| existing.email == user.email) {
            warn!("Email already present at insert time");
            return Err(AppError::EmailTaken(user.email.clone()));
        }
        users.insert(user.id, user.clone());

        debug!(user_id = %user.id, "User created successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<UserModel>, AppError> {
        let users = self.users.lock().unwrap();
        debug!(user_count = users.len(), "Listing users from memory");
        Ok(users.values().cloned().collect())
    }
}

/// PostgreSQL implementation of the user repository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Maps an insert failure to the conflict error when the users email
    /// unique constraint rejected the row, otherwise to a database error.
    fn map_insert_error(email: &str, e: sqlx::Error) -> AppError {
        if let sqlx::Error::Database(db_error) = &e {
            if db_error.is_unique_violation() {
                warn!(email = %email, "Unique constraint rejected insert");
                return AppError::EmailTaken(email.to_string());
            }
        }
        warn!(error = %e, "Failed to insert user");
        AppError::Database(e.to_string())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self))]
    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    warn!(error = %e, "Failed to check email existence");
                    AppError::Database(e.to_string())
                })?;

        Ok(exists.0)
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create_user(&self, user: &UserModel) -> Result<(), AppError> {
        debug!(user_id = %user.id, "Creating user in database");

        let mut tx = self.pool.begin().await.map_err(|e| {
            warn!(error = %e, "Failed to begin transaction");
            AppError::Database(e.to_string())
        })?;

        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, is_active, token, created, modified, last_login) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(&user.token)
        .bind(user.created)
        .bind(user.modified)
        .bind(user.last_login)
        .execute(&mut *tx)
        .await
        .map_err(|e| Self::map_insert_error(&user.email, e))?;

        for phone in &user.phones {
            sqlx::query(
                "INSERT INTO phones (id, user_id, number, citycode, contrycode) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(phone.id)
            .bind(phone.user_id)
            .bind(&phone.number)
            .bind(&phone.citycode)
            .bind(&phone.contrycode)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to insert phone");
                AppError::Database(e.to_string())
            })?;
        }

        tx.commit().await.map_err(|e| {
            warn!(error = %e, "Failed to commit user transaction");
            AppError::Database(e.to_string())
        })?;

        debug!(user_id = %user.id, "User created successfully in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<UserModel>, AppError> {
        let mut users: Vec<UserModel> = sqlx::query_as(
            "SELECT id, name, email, password_hash, is_active, token, created, modified, last_login \
             FROM users",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list users");
            AppError::Database(e.to_string())
        })?;

        let phones: Vec<PhoneModel> =
            sqlx::query_as("SELECT id, user_id, number, citycode, contrycode FROM phones")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    warn!(error = %e, "Failed to list phones");
                    AppError::Database(e.to_string())
                })?;

        let mut phones_by_user: HashMap<Uuid, Vec<PhoneModel>> = HashMap::new();
        for phone in phones {
            phones_by_user.entry(phone.user_id).or_default().push(phone);
        }

        for user in &mut users {
            user.phones = phones_by_user.remove(&user.id).unwrap_or_default();
        }

        debug!(user_count = users.len(), "Users listed from database");
        Ok(users)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Test helper functions for creating test data
    mod helpers {
        use super::*;

        pub fn create_test_user(name: &str, email: &str) -> UserModel {
            let mut user = UserModel::new(
                name.to_string(),
                email.to_string(),
                "$argon2id$fake-hash".to_string(),
            );
            user.attach_phone("123456".to_string(), "1".to_string(), "57".to_string());
            user
        }
    }

    use helpers::*;

    #[tokio::test]
    async fn test_create_and_list_users() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("Test User", "test@example.com");

        repo.create_user(&user).await.unwrap();

        let users = repo.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, user.id);
        assert_eq!(users[0].email, "test@example.com");
        assert_eq!(users[0].phones.len(), 1);
    }

    #[tokio::test]
    async fn test_exists_by_email() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("Test User", "test@example.com");

        assert!(!repo.exists_by_email("test@example.com").await.unwrap());

        repo.create_user(&user).await.unwrap();

        assert!(repo.exists_by_email("test@example.com").await.unwrap());
        assert!(!repo.exists_by_email("other@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_at_insert_time() {
        let repo = InMemoryUserRepository::new();
        let first = create_test_user("First", "duplicate@example.com");
        let second = create_test_user("Second", "duplicate@example.com");

        repo.create_user(&first).await.unwrap();

        // Distinct IDs, same email: the store-level constraint must reject it
        let result = repo.create_user(&second).await;
        assert!(matches!(result, Err(AppError::EmailTaken(_))));
        assert_eq!(repo.user_count(), 1);
    }

    #[tokio::test]
    async fn test_with_preloaded_users() {
        let users = vec![
            create_test_user("One", "one@example.com"),
            create_test_user("Two", "two@example.com"),
        ];
        let repo = InMemoryUserRepository::with_users(users);

        assert_eq!(repo.user_count(), 2);
        assert!(repo.exists_by_email("one@example.com").await.unwrap());
        assert!(repo.exists_by_email("two@example.com").await.unwrap());
    }
}
