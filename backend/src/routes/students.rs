//! Student record endpoints

use crate::auth::AdminAccount;
use crate::error::ApiResult;
use crate::services::StudentService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use course_enrollment_shared::{GradeReportEntry, Pagination, PersonRequest, StudentResponse};

/// Create student routes
pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route(
            "/:id",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/:id/grades", get(student_grades))
}

async fn create_student(
    State(state): State<AppState>,
    Json(req): Json<PersonRequest>,
) -> ApiResult<(StatusCode, Json<StudentResponse>)> {
    let student = StudentService::create(state.db(), &req).await?;
    Ok((StatusCode::CREATED, Json(student.into())))
}

/// GET /api/v1/students?skip=&limit=
async fn list_students(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<StudentResponse>>> {
    let students = StudentService::list(state.db(), page).await?;
    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<StudentResponse>> {
    Ok(Json(StudentService::get(state.db(), id).await?.into()))
}

async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<PersonRequest>,
) -> ApiResult<Json<StudentResponse>> {
    Ok(Json(StudentService::update(state.db(), id, &req).await?.into()))
}

/// DELETE /api/v1/students/:id (admin)
async fn delete_student(
    State(state): State<AppState>,
    _admin: AdminAccount,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    StudentService::delete(state.db(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/students/:id/grades
async fn student_grades(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<GradeReportEntry>>> {
    Ok(Json(StudentService::grades(state.db(), id).await?))
}
