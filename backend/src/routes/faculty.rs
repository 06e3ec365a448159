//! Faculty record endpoints

use crate::auth::AdminAccount;
use crate::error::ApiResult;
use crate::services::FacultyService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use course_enrollment_shared::{FacultyFilter, FacultyResponse, Pagination, PersonRequest};

/// Create faculty routes
pub fn faculty_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_faculty).post(create_faculty))
        .route(
            "/:id",
            get(get_faculty).put(update_faculty).delete(delete_faculty),
        )
}

async fn create_faculty(
    State(state): State<AppState>,
    Json(req): Json<PersonRequest>,
) -> ApiResult<(StatusCode, Json<FacultyResponse>)> {
    let faculty = FacultyService::create(state.db(), &req).await?;
    Ok((StatusCode::CREATED, Json(faculty.into())))
}

/// GET /api/v1/faculty?skip=&limit=&name=&email=
async fn list_faculty(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
    Query(filter): Query<FacultyFilter>,
) -> ApiResult<Json<Vec<FacultyResponse>>> {
    let faculty = FacultyService::list(state.db(), &filter, page).await?;
    Ok(Json(faculty.into_iter().map(FacultyResponse::from).collect()))
}

async fn get_faculty(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<FacultyResponse>> {
    Ok(Json(FacultyService::get(state.db(), id).await?.into()))
}

async fn update_faculty(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<PersonRequest>,
) -> ApiResult<Json<FacultyResponse>> {
    Ok(Json(FacultyService::update(state.db(), id, &req).await?.into()))
}

/// DELETE /api/v1/faculty/:id (admin)
async fn delete_faculty(
    State(state): State<AppState>,
    _admin: AdminAccount,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    FacultyService::delete(state.db(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
