//! Health probes
//!
//! `/health` and `/health/live` answer as long as the process is serving;
//! `/health/ready` also round-trips the database and reports 503 when it
//! cannot.

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DependencyStatus>,
}

#[derive(Debug, Serialize)]
pub struct DependencyStatus {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthResponse {
    fn new(status: &'static str) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database: None,
        }
    }
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy"))
}

pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("alive"))
}

pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = match db::health_check(state.db()).await {
        Ok(()) => DependencyStatus {
            healthy: true,
            message: None,
        },
        Err(_) => DependencyStatus {
            healthy: false,
            message: Some("database unavailable".to_string()),
        },
    };

    let (code, status) = if database.healthy {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    let mut response = HealthResponse::new(status);
    response.database = Some(database);
    (code, Json(response))
}
