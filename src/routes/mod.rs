use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::store::Store;

pub mod chat;
pub mod cycle;
pub mod cycle_stats;
pub mod gynecologists;
pub mod hygiene;
pub mod period_logs;
pub mod profile;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

/// Every resource mounted under `/api`.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(profile::routes(state.clone()))
        .merge(period_logs::routes(state.clone()))
        .merge(cycle::routes(state.clone()))
        .merge(cycle_stats::routes(state.clone()))
        .merge(hygiene::routes(state.clone()))
        .merge(chat::routes(state))
        .merge(gynecologists::routes())
        .route("/health", get(health));

    Router::new().nest("/api", api).fallback(not_found)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Luna Backend API is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Endpoint not found" })))
}
