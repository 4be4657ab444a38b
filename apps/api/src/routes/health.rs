use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-analyzer-api"
    }))
}

/// GET /
pub async fn root_handler() -> &'static str {
    "Resume Analyzer API is running..."
}

/// GET /api
pub async fn api_status_handler() -> Json<Value> {
    Json(json!({ "status": "Backend running" }))
}
