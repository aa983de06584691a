pub mod fare_routes;
pub mod fleet_routes;
pub mod passenger_routes;
pub mod queue_routes;
pub mod report_routes;

use axum::{routing::get, Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Router completo de la terminal, sin estado aplicado todavía.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/fares", get(fare_routes::fare_table))
        .nest("/api/passengers", passenger_routes::create_passenger_router())
        .nest("/api/queues", queue_routes::create_queue_router())
        .nest("/api/fleet", fleet_routes::create_fleet_router())
        .nest("/api/reports", report_routes::create_report_router())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "transit-queue",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
