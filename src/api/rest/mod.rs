pub mod activities;
pub mod analytics;
pub mod drivers;
pub mod fuel;
pub mod incidents;
pub mod maintenance;
pub mod trips;
pub mod vehicles;
pub mod ws;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(vehicles::router())
        .merge(drivers::router())
        .merge(trips::router())
        .merge(maintenance::router())
        .merge(fuel::router())
        .merge(incidents::router())
        .merge(activities::router())
        .merge(analytics::router())
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/ws", get(ws::ws_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
        .fallback_service(ServeDir::new("static"))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    vehicles: usize,
    drivers: usize,
    trips: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (vehicles, drivers, trips) = state.store.counts();
    Json(HealthResponse {
        status: "ok",
        vehicles,
        drivers,
        trips,
    })
}

async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}
