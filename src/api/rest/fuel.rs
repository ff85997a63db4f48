use std::sync::Arc;

use crate::activity::ActivitySink;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{post, put};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::activity::ActivityCategory;
use crate::models::fuel::{cost_per_liter, FuelEntry, FuelPatch};
use crate::state::AppState;
use crate::store::EntityStore;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/fuel", post(create_fuel).get(list_fuel))
        .route("/fuel/:id", put(update_fuel))
}

#[derive(Deserialize)]
pub struct FuelQuery {
    pub vehicle_id: Option<String>,
}

async fn list_fuel(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FuelQuery>,
) -> Json<Vec<FuelEntry>> {
    Json(state.store.list_fuel(query.vehicle_id.as_deref()))
}

#[derive(Deserialize)]
pub struct CreateFuelRequest {
    pub vehicle_id: String,
    pub liters: f64,
    pub cost: f64,
    pub odometer_reading: Option<u32>,
}

async fn create_fuel(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateFuelRequest>,
) -> Result<(StatusCode, Json<FuelEntry>), AppError> {
    if payload.liters <= 0.0 {
        return Err(AppError::BadRequest("liters must be > 0".to_string()));
    }
    if payload.cost < 0.0 {
        return Err(AppError::BadRequest("cost cannot be negative".to_string()));
    }
    state.store.get_vehicle(&payload.vehicle_id)?;

    let entry = state.store.insert_fuel(FuelEntry {
        id: String::new(),
        vehicle_id: payload.vehicle_id,
        liters: payload.liters,
        cost: payload.cost,
        cost_per_liter: cost_per_liter(payload.cost, payload.liters),
        date: Utc::now().date_naive(),
        odometer_reading: payload.odometer_reading,
    });

    state.activity.record(
        &format!("Fuel entry added for vehicle {}", entry.vehicle_id),
        ActivityCategory::Fuel,
    );

    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_fuel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<FuelPatch>,
) -> Result<Json<FuelEntry>, AppError> {
    if patch.liters.is_some_and(|liters| liters <= 0.0) {
        return Err(AppError::BadRequest("liters must be > 0".to_string()));
    }
    Ok(Json(state.store.update_fuel(&id, patch)?))
}
