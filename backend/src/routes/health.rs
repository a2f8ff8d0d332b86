//! Liveness and readiness endpoints
//!
//! `/health` and `/health/live` answer as long as the process is serving.
//! `/health/ready` also pings the document store and answers 503 when it
//! cannot be reached.

use crate::state::AppState;
use crate::store::StoreResult;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub store: CheckStatus,
}

#[derive(Serialize)]
pub struct CheckStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatus {
    fn from_result(result: StoreResult<()>) -> Self {
        match result {
            Ok(()) => Self {
                status: "healthy",
                message: None,
            },
            Err(err) => Self {
                status: "unhealthy",
                message: Some(err.to_string()),
            },
        }
    }

    fn is_healthy(&self) -> bool {
        self.message.is_none()
    }
}

fn respond(status: &'static str, checks: Option<HealthChecks>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks,
    })
}

pub async fn health_check() -> Json<HealthResponse> {
    respond("healthy", None)
}

pub async fn liveness_check() -> Json<HealthResponse> {
    respond("alive", None)
}

pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store = CheckStatus::from_result(state.store().health_check().await);
    if store.is_healthy() {
        (StatusCode::OK, respond("ready", Some(HealthChecks { store })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            respond("not_ready", Some(HealthChecks { store })),
        )
    }
}
