use std::sync::Arc;

use crate::activity::ActivitySink;

use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::Json;
use axum::Router;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::activity::ActivityCategory;
use crate::models::driver::{Driver, DriverPatch, DutyStatus, LicenseCategory};
use crate::state::AppState;
use crate::store::EntityStore;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/drivers", get(list_drivers))
        .route("/drivers/:id", get(get_driver).put(update_driver))
        .route("/drivers/:id/safety-score", put(update_safety_score))
}

async fn list_drivers(State(state): State<Arc<AppState>>) -> Json<Vec<Driver>> {
    Json(state.store.list_drivers())
}

async fn get_driver(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Driver>, AppError> {
    Ok(Json(state.store.get_driver(&id)?))
}

/// The subset of driver fields callers may edit directly; trip counters
/// belong to the lifecycle controller.
#[derive(Deserialize)]
pub struct UpdateDriverRequest {
    pub name: Option<String>,
    pub license_number: Option<String>,
    pub license_category: Option<LicenseCategory>,
    pub license_expiry: Option<NaiveDate>,
    pub status: Option<DutyStatus>,
    pub phone: Option<String>,
}

async fn update_driver(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateDriverRequest>,
) -> Result<Json<Driver>, AppError> {
    let status_change = payload.status;
    let driver = state.store.update_driver(
        &id,
        DriverPatch {
            name: payload.name,
            license_number: payload.license_number,
            license_category: payload.license_category,
            license_expiry: payload.license_expiry,
            status: payload.status,
            phone: payload.phone,
            ..Default::default()
        },
    )?;

    if let Some(status) = status_change {
        state.activity.record(
            &format!("Driver {} status changed to {}", driver.name, status),
            ActivityCategory::Driver,
        );
    }

    Ok(Json(driver))
}

#[derive(Deserialize)]
pub struct SafetyScoreRequest {
    pub score: u8,
    #[serde(default)]
    pub incident: bool,
}

async fn update_safety_score(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<SafetyScoreRequest>,
) -> Result<Json<Driver>, AppError> {
    let current = state.store.get_driver(&id)?;

    let mut patch = DriverPatch {
        safety_score: Some(payload.score),
        ..Default::default()
    };
    if payload.incident {
        patch.incidents = Some(current.incidents + 1);
        patch.last_incident_date = Some(Utc::now().date_naive());
    }

    let driver = state.store.update_driver(&id, patch)?;
    state.activity.record(
        &format!(
            "Driver {} safety score updated to {}",
            driver.name, driver.safety_score
        ),
        ActivityCategory::Safety,
    );

    Ok(Json(driver))
}
