use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Days, Utc};
use fleetflow::api::rest::router;
use fleetflow::models::driver::{Driver, DutyStatus, LicenseCategory};
use fleetflow::state::AppState;
use serde_json::{json, Value};
use tower::ServiceExt;

fn setup() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(1024));
    (router(state.clone()), state)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Drivers are provisioned by back-office tooling, not the HTTP surface,
/// so tests insert them straight into the store.
fn seed_driver(state: &AppState, status: DutyStatus, expiry_days_from_now: i64) -> Driver {
    let today = Utc::now().date_naive();
    let expiry = if expiry_days_from_now >= 0 {
        today + Days::new(expiry_days_from_now as u64)
    } else {
        today - Days::new(expiry_days_from_now.unsigned_abs())
    };

    state.store.insert_driver(Driver {
        id: String::new(),
        name: "Ramesh Kumar".to_string(),
        license_number: "DL-01-2019-0012345".to_string(),
        license_category: LicenseCategory::HeavyVehicle,
        license_expiry: expiry,
        status,
        safety_score: 92,
        trip_completion_rate: 0.0,
        total_trips: 0,
        completed_trips: 0,
        incidents: 0,
        last_incident_date: None,
        phone: "+91 98765 43210".to_string(),
        join_date: today,
    })
}

async fn create_vehicle(app: &axum::Router, capacity: u32) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/vehicles",
            json!({
                "name": "Ashok Leyland 3118",
                "plate": "MH-02-CD-5678",
                "type": "Truck",
                "capacity": capacity,
                "region": "Pune",
                "acq_cost": 5200000.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn create_trip(app: &axum::Router, vehicle_id: &str, driver_id: &str, cargo: u32) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/trips",
            json!({
                "vehicle_id": vehicle_id,
                "driver_id": driver_id,
                "cargo_weight": cargo,
                "pickup": "Mumbai",
                "delivery": "Pune"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn transition(app: &axum::Router, trip_id: &str, status: &str) -> axum::response::Response {
    app.clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/trips/{trip_id}/status"),
            json!({ "status": status }),
        ))
        .await
        .unwrap()
}

async fn vehicle_status(app: &axum::Router, vehicle_id: &str) -> String {
    let response = app.clone().oneshot(get_request("/vehicles")).await.unwrap();
    let vehicles = body_json(response).await;
    vehicles
        .as_array()
        .unwrap()
        .iter()
        .find(|v| v["id"] == vehicle_id)
        .unwrap()["status"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn driver_json(app: &axum::Router, driver_id: &str) -> Value {
    let response = app
        .clone()
        .oneshot(get_request(&format!("/drivers/{driver_id}")))
        .await
        .unwrap();
    body_json(response).await
}

#[tokio::test]
async fn health_returns_ok() {
    let (app, _state) = setup();
    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["vehicles"], 0);
    assert_eq!(body["drivers"], 0);
    assert_eq!(body["trips"], 0);
}

#[tokio::test]
async fn metrics_returns_prometheus_format() {
    let (app, _state) = setup();
    let response = app.oneshot(get_request("/metrics")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.contains("text/plain"));

    let body = body_string(response).await;
    assert!(body.contains("dispatched_trips"));
    assert!(body.contains("trips_created_total"));
}

#[tokio::test]
async fn create_vehicle_defaults_to_available() {
    let (app, _state) = setup();
    let vehicle = create_vehicle(&app, 18_000).await;

    assert_eq!(vehicle["id"], "V1");
    assert_eq!(vehicle["status"], "Available");
    assert_eq!(vehicle["capacity"], 18_000);
    assert_eq!(vehicle["odometer"], 0);
    assert_eq!(vehicle["revenue"], 0.0);
}

#[tokio::test]
async fn create_vehicle_empty_name_returns_400() {
    let (app, _state) = setup();
    let response = app
        .oneshot(json_request(
            "POST",
            "/vehicles",
            json!({
                "name": "  ",
                "plate": "MH-01-AB-1234",
                "type": "Truck",
                "capacity": 18000,
                "region": "Mumbai",
                "acq_cost": 4500000.0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_vehicle_duplicate_plate_returns_409() {
    let (app, _state) = setup();
    create_vehicle(&app, 18_000).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/vehicles",
            json!({
                "name": "Another Truck",
                "plate": "MH-02-CD-5678",
                "type": "Truck",
                "capacity": 20000,
                "region": "Pune",
                "acq_cost": 100000.0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn create_trip_starts_in_draft() {
    let (app, state) = setup();
    let vehicle = create_vehicle(&app, 18_000).await;
    let driver = seed_driver(&state, DutyStatus::OffDuty, 365);

    let trip = create_trip(&app, vehicle["id"].as_str().unwrap(), &driver.id, 14_000).await;
    assert_eq!(trip["id"], "TR-001");
    assert_eq!(trip["status"], "Draft");
    assert_eq!(trip["cargo_weight"], 14_000);
}

#[tokio::test]
async fn create_trip_unknown_vehicle_returns_404() {
    let (app, state) = setup();
    let driver = seed_driver(&state, DutyStatus::OffDuty, 365);

    let response = app
        .oneshot(json_request(
            "POST",
            "/trips",
            json!({
                "vehicle_id": "V9",
                "driver_id": driver.id,
                "cargo_weight": 1000,
                "pickup": "Mumbai",
                "delivery": "Pune"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_trip_over_capacity_returns_400() {
    let (app, state) = setup();
    let vehicle = create_vehicle(&app, 18_000).await;
    let driver = seed_driver(&state, DutyStatus::OffDuty, 365);

    let response = app
        .oneshot(json_request(
            "POST",
            "/trips",
            json!({
                "vehicle_id": vehicle["id"],
                "driver_id": driver.id,
                "cargo_weight": 20_000,
                "pickup": "Mumbai",
                "delivery": "Pune"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dispatch_then_complete_walks_the_full_lifecycle() {
    let (app, state) = setup();
    let vehicle = create_vehicle(&app, 18_000).await;
    let vehicle_id = vehicle["id"].as_str().unwrap().to_string();
    let driver = seed_driver(&state, DutyStatus::OffDuty, 365);

    let trip = create_trip(&app, &vehicle_id, &driver.id, 14_000).await;
    let trip_id = trip["id"].as_str().unwrap().to_string();

    let response = transition(&app, &trip_id, "Dispatched").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "Dispatched");

    assert_eq!(vehicle_status(&app, &vehicle_id).await, "On Trip");
    let d = driver_json(&app, &driver.id).await;
    assert_eq!(d["status"], "On Duty");
    assert_eq!(d["total_trips"], 1);

    let response = transition(&app, &trip_id, "Completed").await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(vehicle_status(&app, &vehicle_id).await, "Available");
    let d = driver_json(&app, &driver.id).await;
    assert_eq!(d["status"], "Off Duty");
    assert_eq!(d["completed_trips"], 1);
}

#[tokio::test]
async fn capacity_shrink_blocks_dispatch_with_reason() {
    let (app, state) = setup();
    let vehicle = create_vehicle(&app, 18_000).await;
    let vehicle_id = vehicle["id"].as_str().unwrap().to_string();
    let driver = seed_driver(&state, DutyStatus::OffDuty, 365);

    let trip = create_trip(&app, &vehicle_id, &driver.id, 14_000).await;
    let trip_id = trip["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/vehicles/{vehicle_id}"),
            json!({ "capacity": 10_000 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = transition(&app, &trip_id, "Dispatched").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["reason"], "capacity_exceeded");

    let response = app
        .clone()
        .oneshot(get_request(&format!("/trips/{trip_id}")))
        .await
        .unwrap();
    let trip = body_json(response).await;
    assert_eq!(trip["status"], "Draft");
    assert_eq!(vehicle_status(&app, &vehicle_id).await, "Available");
}

#[tokio::test]
async fn expired_license_blocks_dispatch_with_reason() {
    let (app, state) = setup();
    let vehicle = create_vehicle(&app, 18_000).await;
    let vehicle_id = vehicle["id"].as_str().unwrap().to_string();
    let driver = seed_driver(&state, DutyStatus::OffDuty, -30);

    let trip = create_trip(&app, &vehicle_id, &driver.id, 14_000).await;
    let response = transition(&app, trip["id"].as_str().unwrap(), "Dispatched").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["reason"], "license_expired");
    assert_eq!(vehicle_status(&app, &vehicle_id).await, "Available");
}

#[tokio::test]
async fn suspended_driver_blocks_dispatch_with_reason() {
    let (app, state) = setup();
    let vehicle = create_vehicle(&app, 18_000).await;
    let driver = seed_driver(&state, DutyStatus::Suspended, 365);

    let trip = create_trip(&app, vehicle["id"].as_str().unwrap(), &driver.id, 14_000).await;
    let response = transition(&app, trip["id"].as_str().unwrap(), "Dispatched").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["reason"], "driver_suspended");
}

#[tokio::test]
async fn vehicle_in_shop_blocks_dispatch_with_reason() {
    let (app, state) = setup();
    let vehicle = create_vehicle(&app, 18_000).await;
    let vehicle_id = vehicle["id"].as_str().unwrap().to_string();
    let driver = seed_driver(&state, DutyStatus::OffDuty, 365);

    let trip = create_trip(&app, &vehicle_id, &driver.id, 14_000).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/vehicles/{vehicle_id}"),
            json!({ "status": "In Shop" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = transition(&app, trip["id"].as_str().unwrap(), "Dispatched").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["reason"], "vehicle_unavailable");
}

#[tokio::test]
async fn second_dispatch_returns_409() {
    let (app, state) = setup();
    let vehicle = create_vehicle(&app, 18_000).await;
    let driver = seed_driver(&state, DutyStatus::OffDuty, 365);
    let trip = create_trip(&app, vehicle["id"].as_str().unwrap(), &driver.id, 14_000).await;
    let trip_id = trip["id"].as_str().unwrap().to_string();

    let response = transition(&app, &trip_id, "Dispatched").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = transition(&app, &trip_id, "Dispatched").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn completed_trip_is_terminal() {
    let (app, state) = setup();
    let vehicle = create_vehicle(&app, 18_000).await;
    let driver = seed_driver(&state, DutyStatus::OffDuty, 365);
    let trip = create_trip(&app, vehicle["id"].as_str().unwrap(), &driver.id, 14_000).await;
    let trip_id = trip["id"].as_str().unwrap().to_string();

    transition(&app, &trip_id, "Dispatched").await;
    transition(&app, &trip_id, "Completed").await;

    let response = transition(&app, &trip_id, "Cancelled").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .clone()
        .oneshot(get_request(&format!("/trips/{trip_id}")))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["status"], "Completed");
}

#[tokio::test]
async fn cancelling_a_draft_leaves_vehicle_and_driver_alone() {
    let (app, state) = setup();
    let vehicle = create_vehicle(&app, 18_000).await;
    let vehicle_id = vehicle["id"].as_str().unwrap().to_string();
    let driver = seed_driver(&state, DutyStatus::OffDuty, 365);
    let trip = create_trip(&app, &vehicle_id, &driver.id, 14_000).await;

    let response = transition(&app, trip["id"].as_str().unwrap(), "Cancelled").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "Cancelled");

    assert_eq!(vehicle_status(&app, &vehicle_id).await, "Available");
    let d = driver_json(&app, &driver.id).await;
    assert_eq!(d["status"], "Off Duty");
}

#[tokio::test]
async fn transition_on_unknown_trip_returns_404() {
    let (app, _state) = setup();
    let response = transition(&app, "TR-999", "Dispatched").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dispatch_lands_in_the_activity_feed() {
    let (app, state) = setup();
    let vehicle = create_vehicle(&app, 18_000).await;
    let driver = seed_driver(&state, DutyStatus::OffDuty, 365);
    let trip = create_trip(&app, vehicle["id"].as_str().unwrap(), &driver.id, 14_000).await;
    transition(&app, trip["id"].as_str().unwrap(), "Dispatched").await;

    let response = app.oneshot(get_request("/activities")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let feed = body_json(response).await;
    let entries = feed.as_array().unwrap();
    assert!(!entries.is_empty());
    assert_eq!(entries[0]["category"], "dispatch");
    assert!(entries[0]["msg"].as_str().unwrap().contains("dispatched"));
}

#[tokio::test]
async fn fuel_entry_derives_cost_per_liter() {
    let (app, _state) = setup();
    let vehicle = create_vehicle(&app, 18_000).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/fuel",
            json!({
                "vehicle_id": vehicle["id"],
                "liters": 150.0,
                "cost": 15150.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["id"], "F1");
    assert_eq!(body["cost_per_liter"], 101.0);
}

#[tokio::test]
async fn maintenance_list_filters_by_vehicle() {
    let (app, state) = setup();
    let v1 = create_vehicle(&app, 18_000).await;
    let v2 = state.store.insert_vehicle(fleetflow::models::vehicle::Vehicle {
        id: String::new(),
        name: "Force Traveller 3350".to_string(),
        plate: "MH-03-EF-9012".to_string(),
        vehicle_type: fleetflow::models::vehicle::VehicleType::Van,
        capacity: 2_000,
        status: fleetflow::models::vehicle::VehicleStatus::Available,
        odometer: 45_600,
        region: "Mumbai".to_string(),
        acq_cost: 4_800_000.0,
        revenue: 950_000.0,
    });

    for vehicle_id in [v1["id"].as_str().unwrap(), v2.id.as_str()] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/maintenance",
                json!({
                    "vehicle_id": vehicle_id,
                    "service_type": "Oil Change",
                    "cost": 3500.0
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(get_request(&format!(
            "/maintenance?vehicle_id={}",
            v2.id
        )))
        .await
        .unwrap();
    let body = body_json(response).await;
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["vehicle_id"], v2.id);
}

#[tokio::test]
async fn safety_score_update_records_an_incident() {
    let (app, state) = setup();
    let driver = seed_driver(&state, DutyStatus::OffDuty, 365);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/drivers/{}/safety-score", driver.id),
            json!({ "score": 70, "incident": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["safety_score"], 70);
    assert_eq!(body["incidents"], 1);
    assert!(!body["last_incident_date"].is_null());
}

#[tokio::test]
async fn incident_report_bumps_driver_counters() {
    let (app, state) = setup();
    let driver = seed_driver(&state, DutyStatus::OffDuty, 365);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/incidents",
            json!({
                "driver_id": driver.id,
                "type": "Traffic Violation",
                "severity": "Low",
                "description": "Signal jumped at Andheri junction"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["id"], "INC-001");
    assert_eq!(body["resolved"], false);

    let d = driver_json(&app, &driver.id).await;
    assert_eq!(d["incidents"], 1);
}

#[tokio::test]
async fn financial_analytics_aggregates_per_vehicle_costs() {
    let (app, state) = setup();
    let vehicle = state.store.insert_vehicle(fleetflow::models::vehicle::Vehicle {
        id: String::new(),
        name: "Tata Prima 4028.S".to_string(),
        plate: "MH-01-AB-1234".to_string(),
        vehicle_type: fleetflow::models::vehicle::VehicleType::Truck,
        capacity: 25_000,
        status: fleetflow::models::vehicle::VehicleStatus::Available,
        odometer: 50_000,
        region: "Mumbai".to_string(),
        acq_cost: 1_000_000.0,
        revenue: 300_000.0,
    });

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/fuel",
            json!({ "vehicle_id": vehicle.id, "liters": 100.0, "cost": 10000.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/maintenance",
            json!({ "vehicle_id": vehicle.id, "service_type": "Tyre Rotation", "cost": 5000.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(get_request("/analytics/financial"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["summary"]["total_fuel_cost"], 10000.0);
    assert_eq!(body["summary"]["total_maintenance_cost"], 5000.0);
    assert_eq!(body["summary"]["total_operational_cost"], 15000.0);
    assert_eq!(body["summary"]["net_profit"], 285000.0);

    let per_vehicle = &body["vehicle_analytics"][0];
    assert_eq!(per_vehicle["total_cost"], 15000.0);
    assert_eq!(per_vehicle["roi"], 28.5);
    assert_eq!(per_vehicle["fuel_efficiency"], 500.0);
}

#[tokio::test]
async fn driver_status_change_logs_activity() {
    let (app, state) = setup();
    let driver = seed_driver(&state, DutyStatus::OffDuty, 365);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/drivers/{}", driver.id),
            json!({ "status": "Suspended" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "Suspended");

    let response = app.oneshot(get_request("/activities")).await.unwrap();
    let feed = body_json(response).await;
    assert_eq!(feed[0]["category"], "driver");
}

#[tokio::test]
async fn delete_vehicle_returns_summary() {
    let (app, _state) = setup();
    let vehicle = create_vehicle(&app, 18_000).await;
    let vehicle_id = vehicle["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/vehicles/{vehicle_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Vehicle deleted");
    assert_eq!(body["vehicle"]["id"], vehicle_id);

    let response = app.oneshot(get_request("/vehicles")).await.unwrap();
    let vehicles = body_json(response).await;
    assert_eq!(vehicles.as_array().unwrap().len(), 0);
}
