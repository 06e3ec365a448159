//! Course repository for database operations

use anyhow::Result;
use course_enrollment_shared::CourseResponse;
use sqlx::PgPool;

/// Course record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CourseRecord {
    pub id: i64,
    pub name: String,
    pub credits: i32,
    pub faculty_id: i64,
}

impl From<CourseRecord> for CourseResponse {
    fn from(record: CourseRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            credits: record.credits,
            faculty_id: record.faculty_id,
        }
    }
}

/// Input for creating or replacing a course
#[derive(Debug, Clone)]
pub struct CourseFields<'a> {
    pub name: &'a str,
    pub credits: i32,
    pub faculty_id: i64,
}

/// Course repository for database operations
pub struct CourseRepository;

impl CourseRepository {
    /// Create a new course
    pub async fn create(pool: &PgPool, fields: CourseFields<'_>) -> Result<CourseRecord> {
        let course = sqlx::query_as::<_, CourseRecord>(
            r#"
            INSERT INTO courses (name, credits, faculty_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, credits, faculty_id
            "#,
        )
        .bind(fields.name)
        .bind(fields.credits)
        .bind(fields.faculty_id)
        .fetch_one(pool)
        .await?;

        Ok(course)
    }

    /// List courses, optionally restricted to one faculty member
    pub async fn list(pool: &PgPool, faculty_id: Option<i64>) -> Result<Vec<CourseRecord>> {
        let courses = sqlx::query_as::<_, CourseRecord>(
            r#"
            SELECT id, name, credits, faculty_id
            FROM courses
            WHERE ($1::BIGINT IS NULL OR faculty_id = $1)
            ORDER BY id
            "#,
        )
        .bind(faculty_id)
        .fetch_all(pool)
        .await?;

        Ok(courses)
    }

    /// Find course by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<CourseRecord>> {
        let course = sqlx::query_as::<_, CourseRecord>(
            r#"
            SELECT id, name, credits, faculty_id
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(course)
    }

    /// Replace a course's fields
    pub async fn update(
        pool: &PgPool,
        id: i64,
        fields: CourseFields<'_>,
    ) -> Result<Option<CourseRecord>> {
        let course = sqlx::query_as::<_, CourseRecord>(
            r#"
            UPDATE courses SET name = $2, credits = $3, faculty_id = $4
            WHERE id = $1
            RETURNING id, name, credits, faculty_id
            "#,
        )
        .bind(id)
        .bind(fields.name)
        .bind(fields.credits)
        .bind(fields.faculty_id)
        .fetch_optional(pool)
        .await?;

        Ok(course)
    }

    /// Delete a course
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
