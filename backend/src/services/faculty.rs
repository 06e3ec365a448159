//! Faculty records

use crate::error::ApiError;
use crate::repositories::{FacultyRecord, FacultyRepository};
use crate::services::student::validate_person;
use course_enrollment_shared::{FacultyFilter, Pagination, PersonRequest};
use sqlx::PgPool;
use tracing::info;

const DUPLICATE_EMAIL: &str = "A faculty member with this email already exists";
const STILL_TEACHING: &str = "Faculty member still teaches courses";

pub struct FacultyService;

impl FacultyService {
    pub async fn create(pool: &PgPool, req: &PersonRequest) -> Result<FacultyRecord, ApiError> {
        validate_person(req)?;
        let faculty = FacultyRepository::create(pool, &req.name, &req.email)
            .await
            .map_err(|e| ApiError::from_write(e, DUPLICATE_EMAIL))?;
        info!(faculty_id = faculty.id, "Faculty created");
        Ok(faculty)
    }

    pub async fn list(
        pool: &PgPool,
        filter: &FacultyFilter,
        page: Pagination,
    ) -> Result<Vec<FacultyRecord>, ApiError> {
        Ok(FacultyRepository::list(pool, filter, page).await?)
    }

    pub async fn get(pool: &PgPool, id: i64) -> Result<FacultyRecord, ApiError> {
        FacultyRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        req: &PersonRequest,
    ) -> Result<FacultyRecord, ApiError> {
        validate_person(req)?;
        FacultyRepository::update(pool, id, &req.name, &req.email)
            .await
            .map_err(|e| ApiError::from_write(e, DUPLICATE_EMAIL))?
            .ok_or_else(not_found)
    }

    /// Remove a faculty member; fails while courses still reference them
    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), ApiError> {
        let deleted = FacultyRepository::delete(pool, id)
            .await
            .map_err(|e| ApiError::from_write(e, STILL_TEACHING))?;
        if !deleted {
            return Err(not_found());
        }
        info!(faculty_id = id, "Faculty deleted");
        Ok(())
    }
}

pub(crate) fn not_found() -> ApiError {
    ApiError::NotFound("Faculty not found".to_string())
}
