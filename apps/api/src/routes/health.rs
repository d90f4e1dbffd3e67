use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Reports service version and whether the record store answers a ping.
/// Always 200; a store outage shows up as `"status": "degraded"`.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let store_up = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Health check: store unreachable: {e}");
            false
        }
    };

    Json(json!({
        "status": if store_up { "ok" } else { "degraded" },
        "store": if store_up { "up" } else { "down" },
        "version": env!("CARGO_PKG_VERSION"),
        "service": "review-api"
    }))
}
