//! Course endpoints

use crate::auth::AdminAccount;
use crate::error::ApiResult;
use crate::services::CourseService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use course_enrollment_shared::{CourseFilter, CourseRequest, CourseResponse};

/// Create course routes
pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/filter", get(filter_courses))
        .route(
            "/:id",
            get(get_course).put(update_course).delete(delete_course),
        )
}

async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<CourseRequest>,
) -> ApiResult<(StatusCode, Json<CourseResponse>)> {
    let course = CourseService::create(state.db(), &req).await?;
    Ok((StatusCode::CREATED, Json(course.into())))
}

async fn list_courses(State(state): State<AppState>) -> ApiResult<Json<Vec<CourseResponse>>> {
    let courses = CourseService::list(state.db(), None).await?;
    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

/// GET /api/v1/courses/filter?faculty_id=
async fn filter_courses(
    State(state): State<AppState>,
    Query(filter): Query<CourseFilter>,
) -> ApiResult<Json<Vec<CourseResponse>>> {
    let courses = CourseService::list(state.db(), filter.faculty_id).await?;
    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CourseResponse>> {
    Ok(Json(CourseService::get(state.db(), id).await?.into()))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CourseRequest>,
) -> ApiResult<Json<CourseResponse>> {
    Ok(Json(CourseService::update(state.db(), id, &req).await?.into()))
}

/// DELETE /api/v1/courses/:id (admin)
async fn delete_course(
    State(state): State<AppState>,
    _admin: AdminAccount,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    CourseService::delete(state.db(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
