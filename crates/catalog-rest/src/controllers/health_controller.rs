//! Health check controller.

use crate::state::AppState;
use catalog_core::HealthStatus;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use futures::future::join_all;
use serde::Serialize;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall status: `healthy`, `degraded` or `unhealthy`.
    pub status: String,
    /// Application version.
    pub version: String,
    /// Per-dependency results.
    pub checks: Vec<ComponentHealth>,
}

/// Health of a single dependency.
#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
}

/// Runs every registered check concurrently.
///
/// The overall status is the worst one reported. Only an unhealthy
/// dependency makes the service unavailable; a degraded cache does not.
async fn run_checks(state: &AppState) -> (StatusCode, HealthResponse) {
    let results = join_all(state.health_checks.iter().map(|check| async move {
        let status = check.check().await;
        (check.name().to_string(), status)
    }))
    .await;

    let overall = if results.iter().any(|(_, s)| s.is_unhealthy()) {
        HealthStatus::Unhealthy(String::new())
    } else if results.iter().any(|(_, s)| !s.is_healthy()) {
        HealthStatus::Degraded(String::new())
    } else {
        HealthStatus::Healthy
    };

    let code = if overall.is_unhealthy() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    let checks = results
        .into_iter()
        .map(|(name, status)| ComponentHealth {
            name,
            status: status.label().to_string(),
            detail: status.detail().map(str::to_string),
        })
        .collect();

    (
        code,
        HealthResponse {
            status: overall.label().to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            checks,
        },
    )
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy or degraded", body = HealthResponse),
        (status = 503, description = "A required dependency is down", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (code, body) = run_checks(&state).await;
    (code, Json(body))
}

/// Readiness check endpoint.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready"),
        (status = 503, description = "Service is not ready")
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    run_checks(&state).await.0
}

/// Liveness check endpoint.
#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive")
    )
)]
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
