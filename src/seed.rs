use chrono::NaiveDate;
use tracing::info;

use crate::dispatch::lifecycle::DraftTrip;
use crate::error::AppError;
use crate::models::driver::{Driver, DutyStatus, LicenseCategory};
use crate::models::fuel::{cost_per_liter, FuelEntry};
use crate::models::incident::{Incident, IncidentSeverity, IncidentType};
use crate::models::maintenance::Maintenance;
use crate::models::trip::TripStatus;
use crate::models::vehicle::{Vehicle, VehicleStatus, VehicleType};
use crate::state::AppState;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

fn vehicle(
    name: &str,
    plate: &str,
    vehicle_type: VehicleType,
    capacity: u32,
    status: VehicleStatus,
    odometer: u32,
    region: &str,
    acq_cost: f64,
    revenue: f64,
) -> Vehicle {
    Vehicle {
        id: String::new(),
        name: name.to_string(),
        plate: plate.to_string(),
        vehicle_type,
        capacity,
        status,
        odometer,
        region: region.to_string(),
        acq_cost,
        revenue,
    }
}

fn driver(
    name: &str,
    license_number: &str,
    license_category: LicenseCategory,
    license_expiry: NaiveDate,
    status: DutyStatus,
    safety_score: u8,
    incidents: u32,
    phone: &str,
    join_date: NaiveDate,
) -> Driver {
    Driver {
        id: String::new(),
        name: name.to_string(),
        license_number: license_number.to_string(),
        license_category,
        license_expiry,
        status,
        safety_score,
        trip_completion_rate: 0.0,
        total_trips: 0,
        completed_trips: 0,
        incidents,
        last_incident_date: None,
        phone: phone.to_string(),
        join_date,
    }
}

/// Loads a small demo fleet for local runs. The dispatched trip goes
/// through the lifecycle controller so the status coupling holds.
pub async fn seed_demo_fleet(state: &AppState) -> Result<(), AppError> {
    let v1 = state.store.insert_vehicle(vehicle(
        "Tata Prima 4028.S",
        "MH-01-AB-1234",
        VehicleType::Truck,
        25_000,
        VehicleStatus::Available,
        125_400,
        "Mumbai",
        4_500_000.0,
        850_000.0,
    ));
    state.store.insert_vehicle(vehicle(
        "Ashok Leyland 3118",
        "MH-02-CD-5678",
        VehicleType::Truck,
        18_000,
        VehicleStatus::Available,
        82_100,
        "Pune",
        5_200_000.0,
        1_200_000.0,
    ));
    let v3 = state.store.insert_vehicle(vehicle(
        "Force Traveller 3350",
        "MH-03-EF-9012",
        VehicleType::Van,
        2_000,
        VehicleStatus::Available,
        45_600,
        "Mumbai",
        4_800_000.0,
        950_000.0,
    ));
    let v4 = state.store.insert_vehicle(vehicle(
        "Mahindra Bolero Pik-Up",
        "MH-04-GH-3456",
        VehicleType::Van,
        1_500,
        VehicleStatus::InShop,
        95_200,
        "Nagpur",
        3_800_000.0,
        600_000.0,
    ));

    let d1 = state.store.insert_driver(driver(
        "Ramesh Kumar",
        "DL-01-2019-0012345",
        LicenseCategory::HeavyVehicle,
        date(2027, 8, 15),
        DutyStatus::OffDuty,
        92,
        1,
        "+91 98765 43210",
        date(2019, 3, 15),
    ));
    let d2 = state.store.insert_driver(driver(
        "Suresh Yadav",
        "DL-02-2018-0098765",
        LicenseCategory::LightVehicle,
        date(2024, 3, 10),
        DutyStatus::OffDuty,
        45,
        8,
        "+91 98765 43211",
        date(2018, 7, 22),
    ));
    let d3 = state.store.insert_driver(driver(
        "Ajay Singh",
        "DL-03-2020-0054321",
        LicenseCategory::HeavyVehicle,
        date(2028, 6, 22),
        DutyStatus::Suspended,
        38,
        12,
        "+91 98765 43212",
        date(2020, 1, 10),
    ));

    let trip = state.lifecycle.create_draft(DraftTrip {
        vehicle_id: v1.id.clone(),
        driver_id: d1.id.clone(),
        cargo_weight: 14_000,
        pickup: "Mumbai".to_string(),
        delivery: "Pune".to_string(),
    })?;
    state
        .lifecycle
        .request_transition(&trip.id, TripStatus::Dispatched)
        .await?;

    // A second draft left undispatched; D2's expired license will block it.
    state.lifecycle.create_draft(DraftTrip {
        vehicle_id: v3.id.clone(),
        driver_id: d2.id.clone(),
        cargo_weight: 1_200,
        pickup: "Mumbai".to_string(),
        delivery: "Nashik".to_string(),
    })?;

    state.store.insert_maintenance(Maintenance {
        id: String::new(),
        vehicle_id: v4.id.clone(),
        service_type: "Brake Pad Replacement".to_string(),
        cost: 12_500.0,
        date: date(2026, 8, 1),
        notes: Some("Front axle pads worn below limit".to_string()),
        odometer_reading: Some(95_100),
    });

    state.store.insert_fuel(FuelEntry {
        id: String::new(),
        vehicle_id: v1.id,
        liters: 150.0,
        cost: 15_150.0,
        cost_per_liter: cost_per_liter(15_150.0, 150.0),
        date: date(2026, 8, 3),
        odometer_reading: Some(125_100),
    });

    state.store.insert_incident(Incident {
        id: String::new(),
        driver_id: d3.id,
        date: date(2026, 2, 15),
        incident_type: IncidentType::MajorCollision,
        severity: IncidentSeverity::High,
        description: "Rear-ended a parked trailer at the depot gate".to_string(),
        resolved: false,
    });

    let (vehicles, drivers, trips) = state.store.counts();
    info!(vehicles, drivers, trips, "demo fleet seeded");
    Ok(())
}
