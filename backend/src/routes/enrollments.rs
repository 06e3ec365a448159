//! Enrollment endpoints

use crate::auth::AdminAccount;
use crate::error::ApiResult;
use crate::services::EnrollmentService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use course_enrollment_shared::{
    EnrollmentFilter, EnrollmentRequest, EnrollmentResponse, GradeAssignRequest,
};

/// Create enrollment routes
pub fn enrollment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_enrollments).post(create_enrollment))
        .route("/filter", get(filter_enrollments))
        .route("/:id", get(get_enrollment).delete(delete_enrollment))
        .route("/:id/grade", put(assign_grade))
}

async fn create_enrollment(
    State(state): State<AppState>,
    Json(req): Json<EnrollmentRequest>,
) -> ApiResult<(StatusCode, Json<EnrollmentResponse>)> {
    let enrollment = EnrollmentService::create(state.db(), &req).await?;
    Ok((StatusCode::CREATED, Json(enrollment.into())))
}

async fn list_enrollments(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<EnrollmentResponse>>> {
    let enrollments = EnrollmentService::list(state.db(), &EnrollmentFilter::default()).await?;
    Ok(Json(
        enrollments.into_iter().map(EnrollmentResponse::from).collect(),
    ))
}

/// GET /api/v1/enrollments/filter?student_id=&course_id=
async fn filter_enrollments(
    State(state): State<AppState>,
    Query(filter): Query<EnrollmentFilter>,
) -> ApiResult<Json<Vec<EnrollmentResponse>>> {
    let enrollments = EnrollmentService::list(state.db(), &filter).await?;
    Ok(Json(
        enrollments.into_iter().map(EnrollmentResponse::from).collect(),
    ))
}

async fn get_enrollment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<EnrollmentResponse>> {
    Ok(Json(EnrollmentService::get(state.db(), id).await?.into()))
}

/// PUT /api/v1/enrollments/:id/grade
async fn assign_grade(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<GradeAssignRequest>,
) -> ApiResult<Json<EnrollmentResponse>> {
    let enrollment = EnrollmentService::assign_grade(state.db(), id, req.grade).await?;
    Ok(Json(enrollment.into()))
}

/// DELETE /api/v1/enrollments/:id (admin)
async fn delete_enrollment(
    State(state): State<AppState>,
    _admin: AdminAccount,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    EnrollmentService::delete(state.db(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
