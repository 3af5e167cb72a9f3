//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use core_kernel::{AdapterHealth, HealthCheckResult};

use crate::AppState;

pub const SERVICE_NAME: &str = "insurance-api";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub service: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub adapters: Vec<HealthCheckResult>,
}

impl HealthResponse {
    fn up() -> Self {
        Self {
            status: "UP",
            timestamp: Utc::now(),
            service: SERVICE_NAME,
            version: None,
            adapters: Vec::new(),
        }
    }
}

/// Liveness: answers without touching storage
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::up())
}

/// Liveness plus build version
pub async fn health_details() -> Json<HealthResponse> {
    Json(HealthResponse {
        version: Some(env!("CARGO_PKG_VERSION")),
        ..HealthResponse::up()
    })
}

/// Readiness: every storage adapter must answer
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let mut adapters = state.policies.health_check().await;
    adapters.push(state.products.health_check().await);
    adapters.push(state.images.health_check().await);
    adapters.push(state.reviews.health_check().await);

    let ready = adapters
        .iter()
        .all(|result| result.status == AdapterHealth::Healthy);

    let (status_code, status) = if ready {
        (StatusCode::OK, "UP")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "DOWN")
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            adapters,
            ..HealthResponse::up()
        }),
    )
}
