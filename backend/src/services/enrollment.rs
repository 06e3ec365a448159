//! Enrollments and grading

use crate::error::ApiError;
use crate::repositories::{
    CourseRepository, EnrollmentRecord, EnrollmentRepository, StudentRepository,
};
use course_enrollment_shared::{EnrollmentFilter, EnrollmentRequest, Grade};
use sqlx::PgPool;
use tracing::info;

const ALREADY_ENROLLED: &str = "Student is already enrolled in this course";

pub struct EnrollmentService;

impl EnrollmentService {
    /// Enroll an existing student in an existing course, at most once
    pub async fn create(
        pool: &PgPool,
        req: &EnrollmentRequest,
    ) -> Result<EnrollmentRecord, ApiError> {
        if StudentRepository::find_by_id(pool, req.student_id)
            .await?
            .is_none()
        {
            return Err(ApiError::NotFound("Student not found".to_string()));
        }
        if CourseRepository::find_by_id(pool, req.course_id)
            .await?
            .is_none()
        {
            return Err(super::course::not_found());
        }
        if EnrollmentRepository::exists(pool, req.student_id, req.course_id).await? {
            return Err(ApiError::Conflict(ALREADY_ENROLLED.to_string()));
        }

        let enrollment = EnrollmentRepository::create(pool, req.student_id, req.course_id)
            .await
            .map_err(|e| ApiError::from_write(e, ALREADY_ENROLLED))?;
        info!(
            enrollment_id = enrollment.id,
            student_id = enrollment.student_id,
            course_id = enrollment.course_id,
            "Student enrolled"
        );
        Ok(enrollment)
    }

    pub async fn list(
        pool: &PgPool,
        filter: &EnrollmentFilter,
    ) -> Result<Vec<EnrollmentRecord>, ApiError> {
        Ok(EnrollmentRepository::list(pool, filter).await?)
    }

    pub async fn get(pool: &PgPool, id: i64) -> Result<EnrollmentRecord, ApiError> {
        EnrollmentRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn assign_grade(
        pool: &PgPool,
        id: i64,
        grade: Grade,
    ) -> Result<EnrollmentRecord, ApiError> {
        let enrollment = EnrollmentRepository::set_grade(pool, id, grade)
            .await?
            .ok_or_else(not_found)?;
        info!(enrollment_id = id, grade = %grade, "Grade assigned");
        Ok(enrollment)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), ApiError> {
        if !EnrollmentRepository::delete(pool, id).await? {
            return Err(not_found());
        }
        info!(enrollment_id = id, "Enrollment deleted");
        Ok(())
    }
}

fn not_found() -> ApiError {
    ApiError::NotFound("Enrollment not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::fixtures::{write_error, Violation};

    #[test]
    fn test_concurrent_duplicate_enrollment_is_conflict() {
        match ApiError::from_write(write_error(Violation::Unique), ALREADY_ENROLLED) {
            ApiError::Conflict(msg) => {
                assert_eq!(msg, "Student is already enrolled in this course")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_missing_enrollment_is_404() {
        assert!(matches!(not_found(), ApiError::NotFound(msg) if msg == "Enrollment not found"));
    }
}
