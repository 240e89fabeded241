//! API routes module

pub mod timesheet;

use std::sync::Arc;

use axum::{Router, response::Json};
use serde_json::{Value, json};

use crate::api::state::AppState;

type SharedState = Arc<AppState>;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Timesheet routes
        .merge(timesheet::router())
        // Liveness check
        .route("/health", axum::routing::get(health))
}
