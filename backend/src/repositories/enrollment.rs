//! Enrollment repository for database operations

use anyhow::Result;
use course_enrollment_shared::{EnrollmentFilter, EnrollmentResponse, Grade};
use sqlx::PgPool;

/// Enrollment record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EnrollmentRecord {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub grade: Option<String>,
}

impl From<EnrollmentRecord> for EnrollmentResponse {
    fn from(record: EnrollmentRecord) -> Self {
        Self {
            id: record.id,
            student_id: record.student_id,
            course_id: record.course_id,
            grade: record.grade,
        }
    }
}

/// Enrollment repository for database operations
pub struct EnrollmentRepository;

impl EnrollmentRepository {
    /// Enroll a student in a course
    pub async fn create(
        pool: &PgPool,
        student_id: i64,
        course_id: i64,
    ) -> Result<EnrollmentRecord> {
        let enrollment = sqlx::query_as::<_, EnrollmentRecord>(
            r#"
            INSERT INTO enrollments (student_id, course_id)
            VALUES ($1, $2)
            RETURNING id, student_id, course_id, grade
            "#,
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(pool)
        .await?;

        Ok(enrollment)
    }

    /// Check whether the student is already enrolled in the course
    pub async fn exists(pool: &PgPool, student_id: i64, course_id: i64) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM enrollments WHERE student_id = $1 AND course_id = $2
            )
            "#,
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    /// List enrollments matching every provided filter field
    pub async fn list(pool: &PgPool, filter: &EnrollmentFilter) -> Result<Vec<EnrollmentRecord>> {
        let enrollments = sqlx::query_as::<_, EnrollmentRecord>(
            r#"
            SELECT id, student_id, course_id, grade
            FROM enrollments
            WHERE ($1::BIGINT IS NULL OR student_id = $1)
              AND ($2::BIGINT IS NULL OR course_id = $2)
            ORDER BY id
            "#,
        )
        .bind(filter.student_id)
        .bind(filter.course_id)
        .fetch_all(pool)
        .await?;

        Ok(enrollments)
    }

    /// Find enrollment by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<EnrollmentRecord>> {
        let enrollment = sqlx::query_as::<_, EnrollmentRecord>(
            r#"
            SELECT id, student_id, course_id, grade
            FROM enrollments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(enrollment)
    }

    /// Set or replace the grade of an enrollment
    pub async fn set_grade(
        pool: &PgPool,
        id: i64,
        grade: Grade,
    ) -> Result<Option<EnrollmentRecord>> {
        let enrollment = sqlx::query_as::<_, EnrollmentRecord>(
            r#"
            UPDATE enrollments SET grade = $2
            WHERE id = $1
            RETURNING id, student_id, course_id, grade
            "#,
        )
        .bind(id)
        .bind(grade.as_str())
        .fetch_optional(pool)
        .await?;

        Ok(enrollment)
    }

    /// Delete an enrollment
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
