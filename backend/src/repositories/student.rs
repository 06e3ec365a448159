//! Student repository for database operations

use anyhow::Result;
use course_enrollment_shared::{GradeReportEntry, Pagination, StudentResponse};
use sqlx::PgPool;

/// Student record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StudentRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<StudentRecord> for StudentResponse {
    fn from(record: StudentRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
        }
    }
}

/// One row of a student's grade report
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GradeReportRow {
    pub course_id: i64,
    pub course_name: Option<String>,
    pub grade: Option<String>,
}

impl From<GradeReportRow> for GradeReportEntry {
    fn from(row: GradeReportRow) -> Self {
        Self {
            course_id: row.course_id,
            course_name: row.course_name,
            grade: row.grade,
        }
    }
}

/// Student repository for database operations
pub struct StudentRepository;

impl StudentRepository {
    /// Create a new student
    pub async fn create(pool: &PgPool, name: &str, email: &str) -> Result<StudentRecord> {
        let student = sqlx::query_as::<_, StudentRecord>(
            r#"
            INSERT INTO students (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email
            "#,
        )
        .bind(name)
        .bind(email)
        .fetch_one(pool)
        .await?;

        Ok(student)
    }

    /// List students ordered by id
    pub async fn list(pool: &PgPool, page: Pagination) -> Result<Vec<StudentRecord>> {
        let page = page.normalized();
        let students = sqlx::query_as::<_, StudentRecord>(
            r#"
            SELECT id, name, email
            FROM students
            ORDER BY id
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(pool)
        .await?;

        Ok(students)
    }

    /// Find student by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<StudentRecord>> {
        let student = sqlx::query_as::<_, StudentRecord>(
            r#"
            SELECT id, name, email
            FROM students
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(student)
    }

    /// Replace a student's fields
    pub async fn update(
        pool: &PgPool,
        id: i64,
        name: &str,
        email: &str,
    ) -> Result<Option<StudentRecord>> {
        let student = sqlx::query_as::<_, StudentRecord>(
            r#"
            UPDATE students SET name = $2, email = $3
            WHERE id = $1
            RETURNING id, name, email
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(student)
    }

    /// Delete a student
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Courses and grades for a student; empty for unknown students
    pub async fn grade_report(pool: &PgPool, student_id: i64) -> Result<Vec<GradeReportRow>> {
        let rows = sqlx::query_as::<_, GradeReportRow>(
            r#"
            SELECT e.course_id, c.name AS course_name, e.grade
            FROM enrollments e
            LEFT JOIN courses c ON c.id = e.course_id
            WHERE e.student_id = $1
            ORDER BY e.id
            "#,
        )
        .bind(student_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}
