use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Json;
use axum::Router;

use crate::models::activity::Activity;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/activities", get(list_activities))
}

async fn list_activities(State(state): State<Arc<AppState>>) -> Json<Vec<Activity>> {
    Json(state.store.list_activities())
}
