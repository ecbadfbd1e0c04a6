//! API route handlers
//!
//! Routes are organized by functionality:
//!
//! - `health`: Liveness and readiness
//! - `artifacts`: Structure, sequence, legacy mmCIF and pocket retrieval

pub mod artifacts;
pub mod health;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
/// This is the root endpoint (GET /).
///
/// # Response
///
/// ```json
/// {
///   "name": "PrankWeb Artifact Server",
///   "version": "0.1.0",
///   "modes": ["id", "upload"],
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "PrankWeb Artifact Server",
        "version": env!("CARGO_PKG_VERSION"),
        "modes": ["id", "upload"],
        "endpoints": [
            "/api/{mode}/pdb/{id}",
            "/api/{mode}/seq/{id}",
            "/api/{mode}/mmcif/{id}",
            "/api/{mode}/csv/{id}",
            "/health",
            "/ready"
        ]
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
