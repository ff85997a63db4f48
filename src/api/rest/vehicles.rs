use std::sync::Arc;

use crate::activity::ActivitySink;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, post};
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::activity::ActivityCategory;
use crate::models::vehicle::{Vehicle, VehiclePatch, VehicleStatus, VehicleType};
use crate::state::AppState;
use crate::store::EntityStore;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/vehicles", post(create_vehicle).get(list_vehicles))
        .route("/vehicles/:id", delete(delete_vehicle).put(update_vehicle))
}

#[derive(Deserialize)]
pub struct CreateVehicleRequest {
    pub name: String,
    pub plate: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub capacity: u32,
    pub odometer: Option<u32>,
    pub region: String,
    pub acq_cost: f64,
    pub revenue: Option<f64>,
}

async fn create_vehicle(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }
    if payload.plate.trim().is_empty() {
        return Err(AppError::BadRequest("plate cannot be empty".to_string()));
    }
    if payload.region.trim().is_empty() {
        return Err(AppError::BadRequest("region cannot be empty".to_string()));
    }
    if payload.capacity == 0 {
        return Err(AppError::BadRequest("capacity must be > 0".to_string()));
    }
    if state.store.plate_exists(payload.plate.trim()) {
        return Err(AppError::Conflict(format!(
            "plate {} is already registered",
            payload.plate.trim()
        )));
    }

    let vehicle = state.store.insert_vehicle(Vehicle {
        id: String::new(),
        name: payload.name.trim().to_string(),
        plate: payload.plate.trim().to_string(),
        vehicle_type: payload.vehicle_type,
        capacity: payload.capacity,
        status: VehicleStatus::Available,
        odometer: payload.odometer.unwrap_or(0),
        region: payload.region.trim().to_string(),
        acq_cost: payload.acq_cost,
        revenue: payload.revenue.unwrap_or(0.0),
    });

    state.activity.record(
        &format!("New vehicle {} added to registry", vehicle.name),
        ActivityCategory::Vehicle,
    );

    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn list_vehicles(State(state): State<Arc<AppState>>) -> Json<Vec<Vehicle>> {
    Json(state.store.list_vehicles())
}

async fn update_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<VehiclePatch>,
) -> Result<Json<Vehicle>, AppError> {
    if patch.capacity == Some(0) {
        return Err(AppError::BadRequest("capacity must be > 0".to_string()));
    }

    let current = state.store.get_vehicle(&id)?;
    if let Some(plate) = &patch.plate {
        if plate != &current.plate && state.store.plate_exists(plate) {
            return Err(AppError::Conflict(format!(
                "plate {plate} is already registered"
            )));
        }
    }

    Ok(Json(state.store.update_vehicle(&id, patch)?))
}

#[derive(Serialize)]
struct DeletedVehicle {
    id: String,
    name: String,
}

#[derive(Serialize)]
struct DeleteVehicleResponse {
    message: &'static str,
    vehicle: DeletedVehicle,
}

async fn delete_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteVehicleResponse>, AppError> {
    let vehicle = state
        .store
        .delete_vehicle(&id)
        .ok_or_else(|| AppError::NotFound(format!("vehicle {id} not found")))?;

    Ok(Json(DeleteVehicleResponse {
        message: "Vehicle deleted",
        vehicle: DeletedVehicle {
            id: vehicle.id,
            name: vehicle.name,
        },
    }))
}
