use chrono::{DateTime, Duration, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::domain::{NewUser, User};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Record was modified concurrently")]
    Conflict,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    version: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            lifecycle: row.deleted_at.into(),
            name: row.name,
            email: row.email,
            version: row.version,
        }
    }
}

/// Persistence gateway for `User` records.
///
/// Soft-deleted rows are invisible to every read.
#[derive(Clone, Debug)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// A store on a private in-memory database with the schema applied.
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Self {
        // A single connection keeps every query on the same in-memory database.
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open an in-memory database.");
        let store = Self::new(pool);
        store.migrate().await.expect("Failed to run migrations.");
        store
    }

    /// Create the `users` table if it does not exist yet.
    #[tracing::instrument(name = "Running database migrations", skip(self))]
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Inserting user", skip(self, new_user))]
    pub async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, email, created_at, updated_at, deleted_at, version
            "#,
        )
        .bind(new_user.name)
        .bind(new_user.email)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(name = "Fetching all users", skip(self))]
    pub async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, created_at, updated_at, deleted_at, version
            FROM users
            WHERE deleted_at IS NULL
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    /// Look up a live user by its primary key.
    ///
    /// `key` is taken as it arrives in the path; anything that is not an
    /// integer cannot match a row and yields `Ok(None)`.
    #[tracing::instrument(name = "Fetching user by id", skip(self))]
    pub async fn find_by_id(&self, key: &str) -> Result<Option<User>, StoreError> {
        let Ok(id) = key.parse::<i64>() else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, created_at, updated_at, deleted_at, version
            FROM users
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Persist `user`'s mutable fields.
    ///
    /// The write only lands if the row still carries the version `user` was
    /// loaded with, otherwise `StoreError::Conflict` is returned.
    #[tracing::instrument(name = "Saving user", skip(self, user), fields(user_id = user.id))]
    pub async fn save(&self, user: &User) -> Result<User, StoreError> {
        let updated_at = next_timestamp(user.updated_at);
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET name = ?, email = ?, updated_at = ?, version = version + 1
            WHERE id = ? AND version = ? AND deleted_at IS NULL
            RETURNING id, name, email, created_at, updated_at, deleted_at, version
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(updated_at)
        .bind(user.id)
        .bind(user.version)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::from).ok_or(StoreError::Conflict)
    }

    /// Mark `user` as deleted. The row stays in the table.
    #[tracing::instrument(name = "Soft-deleting user", skip(self, user), fields(user_id = user.id))]
    pub async fn soft_delete(&self, user: &User) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET deleted_at = ?, version = version + 1
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(Utc::now())
        .bind(user.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

// Keeps `updated_at` strictly increasing even if the clock has not moved.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    std::cmp::max(Utc::now(), previous + Duration::microseconds(1))
}
