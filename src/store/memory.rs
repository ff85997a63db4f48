use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use dashmap::DashMap;

use crate::models::activity::{Activity, ActivityCategory};
use crate::models::driver::{Driver, DriverPatch};
use crate::models::fuel::{FuelEntry, FuelPatch};
use crate::models::incident::{Incident, IncidentPatch};
use crate::models::maintenance::{Maintenance, MaintenancePatch};
use crate::models::trip::{NewTrip, Trip, TripPatch, TripStatus};
use crate::models::vehicle::{Vehicle, VehiclePatch};
use crate::store::{EntityStore, StoreError};

/// In-memory document store keyed by the human-facing sequential ids the
/// original records carry (`V1`, `D1`, `TR-001`, ...).
pub struct MemoryStore {
    vehicles: DashMap<String, Vehicle>,
    drivers: DashMap<String, Driver>,
    trips: DashMap<String, Trip>,
    maintenance: DashMap<String, Maintenance>,
    fuel: DashMap<String, FuelEntry>,
    incidents: DashMap<String, Incident>,
    activities: DashMap<String, Activity>,
    next_vehicle: AtomicU64,
    next_driver: AtomicU64,
    next_trip: AtomicU64,
    next_maintenance: AtomicU64,
    next_fuel: AtomicU64,
    next_incident: AtomicU64,
    next_activity: AtomicU64,
}

fn next(counter: &AtomicU64) -> u64 {
    counter.fetch_add(1, Ordering::SeqCst) + 1
}

// Sorts V1-style ids numerically without parsing: shorter ids first,
// lexicographic within a length.
fn id_key(id: &str) -> (usize, String) {
    (id.len(), id.to_owned())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            vehicles: DashMap::new(),
            drivers: DashMap::new(),
            trips: DashMap::new(),
            maintenance: DashMap::new(),
            fuel: DashMap::new(),
            incidents: DashMap::new(),
            activities: DashMap::new(),
            next_vehicle: AtomicU64::new(0),
            next_driver: AtomicU64::new(0),
            next_trip: AtomicU64::new(0),
            next_maintenance: AtomicU64::new(0),
            next_fuel: AtomicU64::new(0),
            next_incident: AtomicU64::new(0),
            next_activity: AtomicU64::new(0),
        }
    }

    // ── vehicles ──

    pub fn insert_vehicle(&self, mut vehicle: Vehicle) -> Vehicle {
        vehicle.id = format!("V{}", next(&self.next_vehicle));
        self.vehicles.insert(vehicle.id.clone(), vehicle.clone());
        vehicle
    }

    pub fn list_vehicles(&self) -> Vec<Vehicle> {
        let mut vehicles: Vec<_> = self
            .vehicles
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        vehicles.sort_by_key(|v| id_key(&v.id));
        vehicles
    }

    pub fn plate_exists(&self, plate: &str) -> bool {
        self.vehicles.iter().any(|entry| entry.value().plate == plate)
    }

    pub fn delete_vehicle(&self, id: &str) -> Option<Vehicle> {
        self.vehicles.remove(id).map(|(_, vehicle)| vehicle)
    }

    // ── drivers ──

    pub fn insert_driver(&self, mut driver: Driver) -> Driver {
        driver.id = format!("D{}", next(&self.next_driver));
        self.drivers.insert(driver.id.clone(), driver.clone());
        driver
    }

    pub fn list_drivers(&self) -> Vec<Driver> {
        let mut drivers: Vec<_> = self
            .drivers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        drivers.sort_by_key(|d| id_key(&d.id));
        drivers
    }

    // ── trips ──

    pub fn list_trips(&self) -> Vec<Trip> {
        let mut trips: Vec<_> = self
            .trips
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        trips.sort_by_key(|t| id_key(&t.id));
        trips
    }

    pub fn dispatched_trip_count(&self) -> usize {
        self.trips
            .iter()
            .filter(|entry| entry.value().status == TripStatus::Dispatched)
            .count()
    }

    // ── maintenance ──

    pub fn insert_maintenance(&self, mut record: Maintenance) -> Maintenance {
        record.id = format!("M{}", next(&self.next_maintenance));
        self.maintenance.insert(record.id.clone(), record.clone());
        record
    }

    pub fn list_maintenance(&self, vehicle_id: Option<&str>) -> Vec<Maintenance> {
        let mut records: Vec<_> = self
            .maintenance
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|m| vehicle_id.is_none_or(|id| m.vehicle_id == id))
            .collect();
        records.sort_by_key(|m| id_key(&m.id));
        records
    }

    pub fn update_maintenance(
        &self,
        id: &str,
        patch: MaintenancePatch,
    ) -> Result<Maintenance, StoreError> {
        let mut record = self
            .maintenance
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("maintenance record", id))?;
        record.apply(patch);
        Ok(record.clone())
    }

    // ── fuel ──

    pub fn insert_fuel(&self, mut entry: FuelEntry) -> FuelEntry {
        entry.id = format!("F{}", next(&self.next_fuel));
        self.fuel.insert(entry.id.clone(), entry.clone());
        entry
    }

    pub fn list_fuel(&self, vehicle_id: Option<&str>) -> Vec<FuelEntry> {
        let mut entries: Vec<_> = self
            .fuel
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|f| vehicle_id.is_none_or(|id| f.vehicle_id == id))
            .collect();
        entries.sort_by_key(|f| id_key(&f.id));
        entries
    }

    pub fn update_fuel(&self, id: &str, patch: FuelPatch) -> Result<FuelEntry, StoreError> {
        let mut entry = self
            .fuel
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("fuel record", id))?;
        entry.apply(patch);
        Ok(entry.clone())
    }

    // ── incidents ──

    pub fn insert_incident(&self, mut incident: Incident) -> Incident {
        incident.id = format!("INC-{:03}", next(&self.next_incident));
        self.incidents.insert(incident.id.clone(), incident.clone());
        incident
    }

    pub fn list_incidents(&self, driver_id: Option<&str>) -> Vec<Incident> {
        let mut incidents: Vec<_> = self
            .incidents
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|i| driver_id.is_none_or(|id| i.driver_id == id))
            .collect();
        incidents.sort_by_key(|i| id_key(&i.id));
        incidents
    }

    pub fn update_incident(&self, id: &str, patch: IncidentPatch) -> Result<Incident, StoreError> {
        let mut incident = self
            .incidents
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("incident", id))?;
        incident.apply(patch);
        Ok(incident.clone())
    }

    // ── activities ──

    pub fn create_activity(&self, msg: &str, category: ActivityCategory) -> Activity {
        let now = Utc::now();
        let activity = Activity {
            id: format!("A{}", next(&self.next_activity)),
            time: now.format("%H:%M").to_string(),
            msg: msg.to_owned(),
            category,
            created_at: now,
        };
        self.activities
            .insert(activity.id.clone(), activity.clone());
        activity
    }

    pub fn list_activities(&self) -> Vec<Activity> {
        let mut activities: Vec<_> = self
            .activities
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        activities.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        activities
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        (self.vehicles.len(), self.drivers.len(), self.trips.len())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore for MemoryStore {
    fn get_trip(&self, id: &str) -> Result<Trip, StoreError> {
        self.trips
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::not_found("trip", id))
    }

    fn get_vehicle(&self, id: &str) -> Result<Vehicle, StoreError> {
        self.vehicles
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::not_found("vehicle", id))
    }

    fn get_driver(&self, id: &str) -> Result<Driver, StoreError> {
        self.drivers
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::not_found("driver", id))
    }

    fn create_trip(&self, new: NewTrip) -> Trip {
        let trip = Trip {
            id: format!("TR-{:03}", next(&self.next_trip)),
            vehicle_id: new.vehicle_id,
            driver_id: new.driver_id,
            cargo_weight: new.cargo_weight,
            pickup: new.pickup,
            delivery: new.delivery,
            status: TripStatus::Draft,
            date: new.date,
        };
        self.trips.insert(trip.id.clone(), trip.clone());
        trip
    }

    fn update_trip(&self, id: &str, patch: TripPatch) -> Result<Trip, StoreError> {
        let mut trip = self
            .trips
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("trip", id))?;
        trip.apply(patch);
        Ok(trip.clone())
    }

    fn update_vehicle(&self, id: &str, patch: VehiclePatch) -> Result<Vehicle, StoreError> {
        let mut vehicle = self
            .vehicles
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("vehicle", id))?;
        vehicle.apply(patch);
        Ok(vehicle.clone())
    }

    fn update_driver(&self, id: &str, patch: DriverPatch) -> Result<Driver, StoreError> {
        let mut driver = self
            .drivers
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("driver", id))?;
        driver.apply(patch);
        Ok(driver.clone())
    }
}
