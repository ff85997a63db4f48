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
use crate::models::driver::DriverPatch;
use crate::models::incident::{Incident, IncidentPatch, IncidentSeverity, IncidentType};
use crate::state::AppState;
use crate::store::EntityStore;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/incidents", post(create_incident).get(list_incidents))
        .route("/incidents/:id", put(update_incident))
}

#[derive(Deserialize)]
pub struct IncidentQuery {
    pub driver_id: Option<String>,
}

async fn list_incidents(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IncidentQuery>,
) -> Json<Vec<Incident>> {
    Json(state.store.list_incidents(query.driver_id.as_deref()))
}

#[derive(Deserialize)]
pub struct CreateIncidentRequest {
    pub driver_id: String,
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    pub severity: IncidentSeverity,
    pub description: String,
}

async fn create_incident(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateIncidentRequest>,
) -> Result<(StatusCode, Json<Incident>), AppError> {
    if payload.description.trim().is_empty() {
        return Err(AppError::BadRequest(
            "description cannot be empty".to_string(),
        ));
    }
    let driver = state.store.get_driver(&payload.driver_id)?;

    let today = Utc::now().date_naive();
    let incident = state.store.insert_incident(Incident {
        id: String::new(),
        driver_id: payload.driver_id,
        date: today,
        incident_type: payload.incident_type,
        severity: payload.severity,
        description: payload.description.trim().to_string(),
        resolved: false,
    });

    state.store.update_driver(
        &driver.id,
        DriverPatch {
            incidents: Some(driver.incidents + 1),
            last_incident_date: Some(today),
            ..Default::default()
        },
    )?;

    state.activity.record(
        &format!("Incident reported for driver {}", driver.name),
        ActivityCategory::Incident,
    );

    Ok((StatusCode::CREATED, Json(incident)))
}

async fn update_incident(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<IncidentPatch>,
) -> Result<Json<Incident>, AppError> {
    Ok(Json(state.store.update_incident(&id, patch)?))
}
