//! Health check handlers for Kubernetes probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses for Kubernetes liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "degraded".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Number of labs loaded (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labs_loaded: Option<usize>,

    /// Whether outgoing mail goes to a provider rather than the log (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail_delivery_enabled: Option<bool>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            labs_loaded: None,
            mail_delivery_enabled: None,
        }
    }

    /// Create a ready status with dataset information.
    pub fn ready(service: &str, version: &str, labs: usize, mail_enabled: bool) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            labs_loaded: Some(labs),
            mail_delivery_enabled: Some(mail_enabled),
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            labs_loaded: None,
            mail_delivery_enabled: None,
        }
    }
}

/// Liveness probe handler.
///
/// Returns 200 OK if the service is running. This is a simple check that does
/// not depend on external resources.
///
/// # Example
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"labfinder-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Returns 200 OK once the lab directory holds at least one record, and 503
/// otherwise.
///
/// # Example
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"labfinder-service-shared","version":"0.1.0","labs_loaded":2150,"mail_delivery_enabled":true}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let lab_count = state.directory().len();
    let mail_enabled = state
        .mail_config()
        .api_key
        .as_deref()
        .is_some_and(|key| !key.is_empty());

    if lab_count == 0 {
        let status = HealthStatus::not_ready(service, version, "no labs loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(service, version, lab_count, mail_enabled);
    (StatusCode::OK, Json(status)).into_response()
}


#[cfg(test)]
mod handler_tests {
    use super::*;
    use crate::test_utils::test_state;
    use labfinder_lib::LabDirectory;

    #[tokio::test]
    async fn test_health_ready_with_fixture() {
        let response = health_ready(State(test_state())).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_empty_directory() {
        let state = AppState::with_directory(LabDirectory::default());
        let response = health_ready(State(state)).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
