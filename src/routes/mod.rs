//! Rutas HTTP
//!
//! Router de consultas sobre el dataset enriquecido más el health check.

pub mod car_routes;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_from_config;
use crate::state::AppState;

/// Crear la aplicación completa con CORS y trazas HTTP
pub fn create_app(state: AppState) -> Router {
    let cors = cors_from_config(&state.config);

    Router::new()
        .route("/health", get(health_check))
        .merge(car_routes::create_car_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check simple
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "ecocar-backend",
        "cars": state.catalog.len(),
        "baseline": state.baseline,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
