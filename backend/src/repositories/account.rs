//! Account persistence
//!
//! Accounts sit behind the [`AccountStore`] trait so the identity layer can
//! run against PostgreSQL in production and against
//! [`InMemoryAccountStore`](super::memory::InMemoryAccountStore) in tests.
//! Uniqueness of username and email is ultimately enforced by the store: a
//! write that would duplicate either fails with
//! [`AccountStoreError::Duplicate`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use course_enrollment_shared::{AccountResponse, Role};
use sqlx::PgPool;
use thiserror::Error;

/// Account record
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            role: account.role,
            is_active: account.is_active,
            created_at: account.created_at,
        }
    }
}

/// Input for creating an account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Which unique field a write collided on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
}

impl UniqueField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UniqueField::Username => "username",
            UniqueField::Email => "email",
        }
    }
}

#[derive(Error, Debug)]
pub enum AccountStoreError {
    #[error("An account with this {} already exists", .0.as_str())]
    Duplicate(UniqueField),

    #[error("Account not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, AccountStoreError>;

/// Storage operations the identity layer needs
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new, active account
    async fn create(&self, account: NewAccount) -> StoreResult<Account>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Account>>;

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Account>>;

    /// Is `username` used by an account other than `exclude_id`?
    async fn username_taken(&self, username: &str, exclude_id: Option<i64>) -> StoreResult<bool>;

    /// Is `email` used by an account other than `exclude_id`?
    async fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> StoreResult<bool>;

    async fn list(&self) -> StoreResult<Vec<Account>>;

    /// Apply the provided profile fields, leaving absent ones untouched
    async fn update_profile(
        &self,
        id: i64,
        username: Option<&str>,
        email: Option<&str>,
    ) -> StoreResult<Account>;

    async fn set_password_hash(&self, id: i64, password_hash: &str) -> StoreResult<Account>;

    async fn set_role(&self, id: i64, role: Role) -> StoreResult<Account>;

    async fn set_active(&self, id: i64, is_active: bool) -> StoreResult<Account>;
}

/// PostgreSQL-backed account store
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

const ACCOUNT_COLUMNS: &str =
    "id, username, email, password_hash, role, is_active, created_at, updated_at";

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Map unique-index violations onto the field they protect
    fn map_write_error(err: sqlx::Error) -> AccountStoreError {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let field = match db_err.constraint() {
                    Some(c) if c.contains("email") => UniqueField::Email,
                    _ => UniqueField::Username,
                };
                return AccountStoreError::Duplicate(field);
            }
        }
        AccountStoreError::Database(err)
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create(&self, account: NewAccount) -> StoreResult<Account> {
        let sql = format!(
            r#"
            INSERT INTO users (username, email, password_hash, role, is_active)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Account>(&sql)
            .bind(&account.username)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(Self::map_write_error)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM users WHERE id = $1");
        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM users WHERE username = $1");
        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    async fn username_taken(&self, username: &str, exclude_id: Option<i64>) -> StoreResult<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE username = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(username)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> StoreResult<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE email = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn list(&self) -> StoreResult<Vec<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM users ORDER BY id");
        let accounts = sqlx::query_as::<_, Account>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(accounts)
    }

    async fn update_profile(
        &self,
        id: i64,
        username: Option<&str>,
        email: Option<&str>,
    ) -> StoreResult<Account> {
        let sql = format!(
            r#"
            UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .bind(username)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::map_write_error)?
            .ok_or(AccountStoreError::NotFound)
    }

    async fn set_password_hash(&self, id: i64, password_hash: &str) -> StoreResult<Account> {
        let sql = format!(
            r#"
            UPDATE users SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .bind(password_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::map_write_error)?
            .ok_or(AccountStoreError::NotFound)
    }

    async fn set_role(&self, id: i64, role: Role) -> StoreResult<Account> {
        let sql = format!(
            r#"
            UPDATE users SET role = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .bind(role.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::map_write_error)?
            .ok_or(AccountStoreError::NotFound)
    }

    async fn set_active(&self, id: i64, is_active: bool) -> StoreResult<Account> {
        let sql = format!(
            r#"
            UPDATE users SET is_active = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .bind(is_active)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::map_write_error)?
            .ok_or(AccountStoreError::NotFound)
    }
}
