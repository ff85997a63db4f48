use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::Json;
use axum::Router;
use serde::Deserialize;

use crate::dispatch::lifecycle::DraftTrip;
use crate::error::AppError;
use crate::models::trip::{Trip, TripStatus};
use crate::state::AppState;
use crate::store::EntityStore;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trips", post(create_trip).get(list_trips))
        .route("/trips/:id", get(get_trip))
        .route("/trips/:id/status", patch(transition_trip))
}

async fn create_trip(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DraftTrip>,
) -> Result<(StatusCode, Json<Trip>), AppError> {
    let trip = state.lifecycle.create_draft(payload)?;
    state.metrics.trips_created_total.inc();
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn list_trips(State(state): State<Arc<AppState>>) -> Json<Vec<Trip>> {
    Json(state.store.list_trips())
}

async fn get_trip(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Trip>, AppError> {
    Ok(Json(state.store.get_trip(&id)?))
}

#[derive(Deserialize)]
pub struct TransitionRequest {
    pub status: TripStatus,
}

async fn transition_trip(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<TransitionRequest>,
) -> Result<Json<Trip>, AppError> {
    let start = Instant::now();
    let result = state.lifecycle.request_transition(&id, payload.status).await;

    let outcome = if result.is_ok() { "success" } else { "rejected" };
    state
        .metrics
        .transition_latency_seconds
        .with_label_values(&[outcome])
        .observe(start.elapsed().as_secs_f64());
    state
        .metrics
        .transitions_total
        .with_label_values(&[outcome])
        .inc();

    let trip = result?;
    state
        .metrics
        .dispatched_trips
        .set(state.store.dispatched_trip_count() as i64);

    Ok(Json(trip))
}
