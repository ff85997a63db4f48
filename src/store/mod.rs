pub mod memory;

pub use memory::MemoryStore;

use thiserror::Error;

use crate::models::driver::{Driver, DriverPatch};
use crate::models::trip::{NewTrip, Trip, TripPatch};
use crate::models::vehicle::{Vehicle, VehiclePatch};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: &str) -> Self {
        StoreError::NotFound {
            kind,
            id: id.to_owned(),
        }
    }
}

/// The lifecycle controller's view of persistence. Kept to lookup-by-id,
/// update-by-id, and draft creation so the controller stays
/// storage-agnostic and testable against the in-memory implementation.
pub trait EntityStore: Send + Sync {
    fn get_trip(&self, id: &str) -> Result<Trip, StoreError>;
    fn get_vehicle(&self, id: &str) -> Result<Vehicle, StoreError>;
    fn get_driver(&self, id: &str) -> Result<Driver, StoreError>;
    fn create_trip(&self, new: NewTrip) -> Trip;
    fn update_trip(&self, id: &str, patch: TripPatch) -> Result<Trip, StoreError>;
    fn update_vehicle(&self, id: &str, patch: VehiclePatch) -> Result<Vehicle, StoreError>;
    fn update_driver(&self, id: &str, patch: DriverPatch) -> Result<Driver, StoreError>;
}
