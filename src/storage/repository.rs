//! Repository layer for database operations.

use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

use crate::domain::User;
use crate::error::{IamError, IamResult};
use crate::storage::models::UserRow;

/// Repository for all IAM database operations.
#[derive(Clone)]
pub struct IamRepository {
    pool: SqlitePool,
}

impl IamRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the database schema.
    pub async fn init_schema(&self) -> IamResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ==================== Users ====================

    /// Persist a new user.
    ///
    /// A duplicate email surfaces as `IamError::Database` carrying the
    /// store's unique-violation error; see [`IamError::is_unique_violation`].
    pub async fn save_user(&self, user: &User) -> IamResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: Uuid) -> IamResult<User> {
        let row: UserRow = sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| IamError::NotFound(format!("User {} not found", id)))?;

        row.try_into()
    }

    /// Find a user by exact email.
    pub async fn find_user_by_email(&self, email: &str) -> IamResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.try_into()).transpose()
    }

    /// Count stored users.
    pub async fn count_users(&self) -> IamResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
