//! Health, liveness and readiness endpoints.
//!
//! - `GET /health`: service summary with a database check
//! - `GET /livez`: process is up, never touches dependencies
//! - `GET /readyz`: accepts traffic only when the database answers and no
//!   shutdown is in progress

use std::time::{Duration, Instant};

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Upper bound on a single database health probe.
pub const DB_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Overall or per-dependency health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Unhealthy,
}

/// Result of probing one dependency.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DependencyCheck {
    pub status: HealthState,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: HealthState,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: DependencyCheck,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LivenessResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
    pub ready: bool,
    pub shutting_down: bool,
    pub database: DependencyCheck,
}

async fn check_database(state: &AppState) -> DependencyCheck {
    let start = Instant::now();
    let outcome = tokio::time::timeout(DB_CHECK_TIMEOUT, state.db.ping()).await;
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    let error = match outcome {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(_) => Some(format!(
            "timed out after {}ms",
            DB_CHECK_TIMEOUT.as_millis()
        )),
    };

    if let Some(ref e) = error {
        tracing::warn!(error = %e, latency_ms, "Database health check failed");
    }

    DependencyCheck {
        status: if error.is_none() {
            HealthState::Healthy
        } else {
            HealthState::Unhealthy
        },
        latency_ms,
        error,
    }
}

/// Service health summary.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse),
    ),
    tag = "Health"
)]
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = check_database(&state).await;
    let status = database.status;
    let code = match status {
        HealthState::Healthy => StatusCode::OK,
        HealthState::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: state.version.to_string(),
            uptime_seconds: state.uptime_seconds(),
            database,
            timestamp: Utc::now(),
        }),
    )
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/livez",
    responses(
        (status = 200, description = "Process is alive", body = LivenessResponse),
    ),
    tag = "Health"
)]
pub async fn livez_handler() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "alive".to_string(),
    })
}

/// Readiness probe. Reports 503 while draining even if the database is up.
#[utoipa::path(
    get,
    path = "/readyz",
    responses(
        (status = 200, description = "Ready for traffic", body = ReadinessResponse),
        (status = 503, description = "Draining or database unreachable", body = ReadinessResponse),
    ),
    tag = "Health"
)]
pub async fn readyz_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let shutting_down = state.is_shutting_down();
    let database = check_database(&state).await;
    let ready = !shutting_down && database.status == HealthState::Healthy;

    let code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        code,
        Json(ReadinessResponse {
            ready,
            shutting_down,
            database,
        }),
    )
}
