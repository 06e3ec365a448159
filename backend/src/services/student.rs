//! Student records

use crate::error::ApiError;
use crate::repositories::{StudentRecord, StudentRepository};
use course_enrollment_shared::{
    validation::{validate_email, validate_name},
    GradeReportEntry, Pagination, PersonRequest,
};
use sqlx::PgPool;
use tracing::info;

const DUPLICATE_EMAIL: &str = "A student with this email already exists";

pub struct StudentService;

impl StudentService {
    pub async fn create(pool: &PgPool, req: &PersonRequest) -> Result<StudentRecord, ApiError> {
        validate_person(req)?;
        let student = StudentRepository::create(pool, &req.name, &req.email)
            .await
            .map_err(|e| ApiError::from_write(e, DUPLICATE_EMAIL))?;
        info!(student_id = student.id, "Student created");
        Ok(student)
    }

    pub async fn list(pool: &PgPool, page: Pagination) -> Result<Vec<StudentRecord>, ApiError> {
        Ok(StudentRepository::list(pool, page).await?)
    }

    pub async fn get(pool: &PgPool, id: i64) -> Result<StudentRecord, ApiError> {
        StudentRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        req: &PersonRequest,
    ) -> Result<StudentRecord, ApiError> {
        validate_person(req)?;
        StudentRepository::update(pool, id, &req.name, &req.email)
            .await
            .map_err(|e| ApiError::from_write(e, DUPLICATE_EMAIL))?
            .ok_or_else(not_found)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), ApiError> {
        if !StudentRepository::delete(pool, id).await? {
            return Err(not_found());
        }
        info!(student_id = id, "Student deleted");
        Ok(())
    }

    /// Courses and grades for a student; unknown students yield an empty report
    pub async fn grades(pool: &PgPool, id: i64) -> Result<Vec<GradeReportEntry>, ApiError> {
        let rows = StudentRepository::grade_report(pool, id).await?;
        Ok(rows.into_iter().map(GradeReportEntry::from).collect())
    }
}

/// Shared name/email checks for people records
pub(crate) fn validate_person(req: &PersonRequest) -> Result<(), ApiError> {
    validate_name(&req.name).map_err(ApiError::Validation)?;
    validate_email(&req.email).map_err(ApiError::Validation)
}

fn not_found() -> ApiError {
    ApiError::NotFound("Student not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_person() {
        let ok = PersonRequest {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        };
        assert!(validate_person(&ok).is_ok());

        let blank = PersonRequest {
            name: "  ".to_string(),
            ..ok.clone()
        };
        assert!(matches!(validate_person(&blank), Err(ApiError::Validation(_))));

        let bad_email = PersonRequest {
            email: "ada-at-example".to_string(),
            ..ok
        };
        assert!(matches!(validate_person(&bad_email), Err(ApiError::Validation(_))));
    }
}
