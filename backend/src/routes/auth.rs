//! Token endpoint
//!
//! `POST /api/v1/token` takes form-encoded credentials, matching the OAuth2
//! password-flow shape most clients already speak.

use crate::error::ApiResult;
use crate::services::AccountService;
use crate::state::AppState;
use axum::{extract::State, routing::post, Form, Json, Router};
use course_enrollment_shared::{AccessToken, LoginForm};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/token", post(login))
}

/// Exchange username and password for a bearer token
///
/// Any failure is a 400 with the same message.
async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Json<AccessToken>> {
    let token = AccountService::login(
        state.accounts(),
        &state.hasher,
        state.tokens(),
        &form.username,
        &form.password,
    )
    .await?;
    Ok(Json(token))
}
