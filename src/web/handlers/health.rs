//! Health check endpoint.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::web::AppState;

/// Basic liveness plus a store connectivity probe.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    match state.database.ping().await {
        Ok(()) => Json(json!({ "status": "healthy", "database": "connected" })),
        Err(e) => {
            tracing::warn!("Health check failed to reach the database: {}", e);
            Json(json!({ "status": "unhealthy", "database": "unavailable" }))
        }
    }
}
