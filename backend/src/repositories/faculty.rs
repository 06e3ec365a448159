//! Faculty repository for database operations

use anyhow::Result;
use course_enrollment_shared::{FacultyFilter, FacultyResponse, Pagination};
use sqlx::PgPool;

/// Faculty record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FacultyRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<FacultyRecord> for FacultyResponse {
    fn from(record: FacultyRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
        }
    }
}

/// Faculty repository for database operations
pub struct FacultyRepository;

impl FacultyRepository {
    /// Create a new faculty member
    pub async fn create(pool: &PgPool, name: &str, email: &str) -> Result<FacultyRecord> {
        let faculty = sqlx::query_as::<_, FacultyRecord>(
            r#"
            INSERT INTO faculties (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email
            "#,
        )
        .bind(name)
        .bind(email)
        .fetch_one(pool)
        .await?;

        Ok(faculty)
    }

    /// List faculty, optionally filtered by partial name/email (case-insensitive)
    pub async fn list(
        pool: &PgPool,
        filter: &FacultyFilter,
        page: Pagination,
    ) -> Result<Vec<FacultyRecord>> {
        let page = page.normalized();
        let faculty = sqlx::query_as::<_, FacultyRecord>(
            r#"
            SELECT id, name, email
            FROM faculties
            WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
              AND ($2::TEXT IS NULL OR email ILIKE '%' || $2 || '%')
            ORDER BY id
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(filter.name.as_deref().filter(|s| !s.is_empty()))
        .bind(filter.email.as_deref().filter(|s| !s.is_empty()))
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(pool)
        .await?;

        Ok(faculty)
    }

    /// Find faculty by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<FacultyRecord>> {
        let faculty = sqlx::query_as::<_, FacultyRecord>(
            r#"
            SELECT id, name, email
            FROM faculties
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(faculty)
    }

    /// Replace a faculty member's fields
    pub async fn update(
        pool: &PgPool,
        id: i64,
        name: &str,
        email: &str,
    ) -> Result<Option<FacultyRecord>> {
        let faculty = sqlx::query_as::<_, FacultyRecord>(
            r#"
            UPDATE faculties SET name = $2, email = $3
            WHERE id = $1
            RETURNING id, name, email
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(faculty)
    }

    /// Delete a faculty member
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM faculties WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
