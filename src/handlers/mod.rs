pub mod catalog;
pub mod fitness;
pub mod ledger;
pub mod stats;
pub mod users;

use axum::Json;
use serde_json::{Value, json};

/// GET /health -> liveness probe, no key required.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
