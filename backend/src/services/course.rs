//! Courses and their faculty assignment

use crate::error::ApiError;
use crate::repositories::{CourseFields, CourseRecord, CourseRepository, FacultyRepository};
use course_enrollment_shared::{
    validation::{validate_credits, validate_name},
    CourseRequest,
};
use sqlx::PgPool;
use tracing::info;

pub struct CourseService;

impl CourseService {
    /// Create a course taught by an existing faculty member
    pub async fn create(pool: &PgPool, req: &CourseRequest) -> Result<CourseRecord, ApiError> {
        let fields = Self::checked_fields(pool, req).await?;
        let course = CourseRepository::create(pool, fields).await?;
        info!(course_id = course.id, faculty_id = course.faculty_id, "Course created");
        Ok(course)
    }

    pub async fn list(
        pool: &PgPool,
        faculty_id: Option<i64>,
    ) -> Result<Vec<CourseRecord>, ApiError> {
        Ok(CourseRepository::list(pool, faculty_id).await?)
    }

    pub async fn get(pool: &PgPool, id: i64) -> Result<CourseRecord, ApiError> {
        CourseRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(not_found)
    }

    /// Replace a course; both the course and the new faculty must exist
    pub async fn update(
        pool: &PgPool,
        id: i64,
        req: &CourseRequest,
    ) -> Result<CourseRecord, ApiError> {
        Self::get(pool, id).await?;
        let fields = Self::checked_fields(pool, req).await?;
        CourseRepository::update(pool, id, fields)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), ApiError> {
        if !CourseRepository::delete(pool, id).await? {
            return Err(not_found());
        }
        info!(course_id = id, "Course deleted");
        Ok(())
    }

    async fn checked_fields<'a>(
        pool: &PgPool,
        req: &'a CourseRequest,
    ) -> Result<CourseFields<'a>, ApiError> {
        validate_name(&req.name).map_err(ApiError::Validation)?;
        validate_credits(req.credits).map_err(ApiError::Validation)?;

        if FacultyRepository::find_by_id(pool, req.faculty_id)
            .await?
            .is_none()
        {
            return Err(super::faculty::not_found());
        }

        Ok(CourseFields {
            name: &req.name,
            credits: req.credits,
            faculty_id: req.faculty_id,
        })
    }
}

pub(crate) fn not_found() -> ApiError {
    ApiError::NotFound("Course not found".to_string())
}
