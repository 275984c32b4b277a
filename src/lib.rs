//! Vehicle Registry - API REST de vehículos
//!
//! CRUD de vehículos con validación por campo y VIN único sin distinguir
//! mayúsculas. El binario (`main.rs`) sólo carga configuración, abre el
//! store y sirve el router que construye `create_app`.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{routing::get, Json, Router};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::dto::vehicle_dto::HealthResponse;
use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Construir el router completo de la API
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health_check))
        .merge(routes::vehicle_routes::create_vehicle_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

/// Health check simple
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "vehicle-registry",
    })
}
