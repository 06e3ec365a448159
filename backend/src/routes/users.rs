//! Account endpoints
//!
//! Registration is open. Everything else requires a bearer token; role and
//! ownership rules are enforced by the extractors and `AccountService`.

use crate::auth::{AdminAccount, CurrentAccount};
use crate::error::ApiResult;
use crate::services::AccountService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use course_enrollment_shared::{
    AccountResponse, ChangePasswordRequest, RegisterRequest, RoleUpdateRequest,
    UpdateProfileRequest,
};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(register).get(list_users))
        .route("/me", get(me))
        .route("/:id", get(get_user).patch(update_profile))
        .route("/:id/change-password", post(change_password))
        .route("/:id/role", patch(set_role))
        .route("/:id/disable", post(disable))
        .route("/:id/enable", post(enable))
}

/// POST /api/v1/users
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AccountResponse>)> {
    let account = AccountService::register(state.accounts(), &state.hasher, req).await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

/// GET /api/v1/users (admin)
async fn list_users(
    State(state): State<AppState>,
    _admin: AdminAccount,
) -> ApiResult<Json<Vec<AccountResponse>>> {
    let accounts = AccountService::list(state.accounts()).await?;
    Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
}

/// GET /api/v1/users/me
async fn me(CurrentAccount(account): CurrentAccount) -> Json<AccountResponse> {
    Json(account.into())
}

/// GET /api/v1/users/:id (self or admin)
async fn get_user(
    State(state): State<AppState>,
    CurrentAccount(actor): CurrentAccount,
    Path(id): Path<i64>,
) -> ApiResult<Json<AccountResponse>> {
    let account = AccountService::get(state.accounts(), &actor, id).await?;
    Ok(Json(account.into()))
}

/// PATCH /api/v1/users/:id (self or admin)
async fn update_profile(
    State(state): State<AppState>,
    CurrentAccount(actor): CurrentAccount,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<AccountResponse>> {
    let account = AccountService::update_profile(state.accounts(), &actor, id, req).await?;
    Ok(Json(account.into()))
}

/// POST /api/v1/users/:id/change-password (self or admin)
async fn change_password(
    State(state): State<AppState>,
    CurrentAccount(actor): CurrentAccount,
    Path(id): Path<i64>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Json<AccountResponse>> {
    let account =
        AccountService::change_password(state.accounts(), &state.hasher, &actor, id, req).await?;
    Ok(Json(account.into()))
}

/// PATCH /api/v1/users/:id/role (admin)
async fn set_role(
    State(state): State<AppState>,
    _admin: AdminAccount,
    Path(id): Path<i64>,
    Json(req): Json<RoleUpdateRequest>,
) -> ApiResult<Json<AccountResponse>> {
    let account = AccountService::set_role(state.accounts(), id, req.role).await?;
    Ok(Json(account.into()))
}

/// POST /api/v1/users/:id/disable (admin)
async fn disable(
    State(state): State<AppState>,
    _admin: AdminAccount,
    Path(id): Path<i64>,
) -> ApiResult<Json<AccountResponse>> {
    let account = AccountService::disable(state.accounts(), id).await?;
    Ok(Json(account.into()))
}

/// POST /api/v1/users/:id/enable (admin)
async fn enable(
    State(state): State<AppState>,
    _admin: AdminAccount,
    Path(id): Path<i64>,
) -> ApiResult<Json<AccountResponse>> {
    let account = AccountService::enable(state.accounts(), id).await?;
    Ok(Json(account.into()))
}
