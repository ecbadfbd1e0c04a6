use crate::state::{ServerMetadata, ServerState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::SystemTime;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

fn uptime_seconds() -> u64 {
    SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Liveness response body
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: String,
    #[serde(flatten)]
    pub metadata: ServerMetadata,
}

/// Health check endpoint (liveness)
/// Returns 200 if server is running
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        service: "prankweb-server",
        timestamp: chrono::Utc::now().to_rfc3339(),
        metadata: ServerMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime_seconds(),
        },
    })
}

/// Readiness check endpoint
/// Returns 200 when every configured artifact directory exists, 503 otherwise
pub async fn readiness_check(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let missing = state.missing_directories();
    let ready = missing.is_empty();

    let components: serde_json::Map<String, serde_json::Value> = state
        .config
        .data
        .entries()
        .into_iter()
        .map(|(name, _)| {
            let status = if missing.contains(&name) { "missing" } else { "ready" };
            (name.to_string(), json!(status))
        })
        .collect();

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if ready { "ready" } else { "unavailable" },
            "service": "prankweb-server",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "uptime_seconds": uptime_seconds(),
            "components": components,
        })),
    )
}
