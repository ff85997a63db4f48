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
use crate::models::maintenance::{Maintenance, MaintenancePatch};
use crate::state::AppState;
use crate::store::EntityStore;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/maintenance", post(create_maintenance).get(list_maintenance))
        .route("/maintenance/:id", put(update_maintenance))
}

#[derive(Deserialize)]
pub struct MaintenanceQuery {
    pub vehicle_id: Option<String>,
}

async fn list_maintenance(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MaintenanceQuery>,
) -> Json<Vec<Maintenance>> {
    Json(state.store.list_maintenance(query.vehicle_id.as_deref()))
}

#[derive(Deserialize)]
pub struct CreateMaintenanceRequest {
    pub vehicle_id: String,
    pub service_type: String,
    pub cost: f64,
    pub notes: Option<String>,
    pub odometer_reading: Option<u32>,
}

async fn create_maintenance(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateMaintenanceRequest>,
) -> Result<(StatusCode, Json<Maintenance>), AppError> {
    if payload.service_type.trim().is_empty() {
        return Err(AppError::BadRequest(
            "service type cannot be empty".to_string(),
        ));
    }
    if payload.cost < 0.0 {
        return Err(AppError::BadRequest("cost cannot be negative".to_string()));
    }
    state.store.get_vehicle(&payload.vehicle_id)?;

    let record = state.store.insert_maintenance(Maintenance {
        id: String::new(),
        vehicle_id: payload.vehicle_id,
        service_type: payload.service_type.trim().to_string(),
        cost: payload.cost,
        date: Utc::now().date_naive(),
        notes: payload.notes,
        odometer_reading: payload.odometer_reading,
    });

    state.activity.record(
        &format!("Vehicle {} sent for {}", record.vehicle_id, record.service_type),
        ActivityCategory::Maintenance,
    );

    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_maintenance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<MaintenancePatch>,
) -> Result<Json<Maintenance>, AppError> {
    Ok(Json(state.store.update_maintenance(&id, patch)?))
}
