//! Health check endpoints.
//!
//! Used by load balancers and orchestrators to probe the service.

use crate::state::AppState;
use crate::error::AppError;
use axum::{Json, extract::State};
use serde::Serialize;

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}

/// Liveness check.
///
/// Always 200 while the process is serving. Does not touch the store.
///
/// ```bash
/// curl http://localhost:5000/health
/// # {"status":"ok","version":"0.1.0"}
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    /// Overall readiness
    pub ready: bool,
    /// Store reachability
    pub store: bool,
}

/// Readiness check.
///
/// # Errors
///
/// 503 `SERVICE_UNAVAILABLE` while the store cannot serve requests.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, AppError> {
    state.store().health_check().await.map_err(|error| {
        AppError::unavailable("Store is not reachable").with_source(error)
    })?;

    Ok(Json(ReadinessResponse {
        ready: true,
        store: true,
    }))
}
