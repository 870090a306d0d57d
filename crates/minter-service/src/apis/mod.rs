//! HTTP API handlers for the minter service.

pub mod mint;

use axum::response::Json;
use serde_json::{json, Value};

/// Handles GET /health requests.
pub async fn health() -> Json<Value> {
	Json(json!({ "status": "ok" }))
}
