use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::activity::ActivitySink;
use crate::dispatch::eligibility::{cargo_fits, check_dispatch, IneligibleReason};
use crate::models::activity::ActivityCategory;
use crate::models::driver::{DriverPatch, DutyStatus};
use crate::models::trip::{NewTrip, Trip, TripPatch, TripStatus};
use crate::models::vehicle::{VehiclePatch, VehicleStatus};
use crate::store::{EntityStore, StoreError};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("invalid transition from {from} to {to}")]
    InvalidTransition { from: TripStatus, to: TripStatus },

    #[error(transparent)]
    Ineligible(#[from] IneligibleReason),

    #[error("{0}")]
    Validation(String),
}

impl From<StoreError> for DispatchError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, id } => DispatchError::NotFound { kind, id },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftTrip {
    pub vehicle_id: String,
    pub driver_id: String,
    pub cargo_weight: u32,
    pub pickup: String,
    pub delivery: String,
}

/// Owns the trip state machine and the coupled vehicle/driver status
/// updates. All validation runs before the first write, so a rejected
/// request leaves every record untouched.
pub struct TripLifecycle {
    store: Arc<dyn EntityStore>,
    activity: Arc<dyn ActivitySink>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

fn status_patch(status: TripStatus) -> TripPatch {
    TripPatch {
        status: Some(status),
    }
}

impl TripLifecycle {
    pub fn new(store: Arc<dyn EntityStore>, activity: Arc<dyn ActivitySink>) -> Self {
        Self {
            store,
            activity,
            locks: DashMap::new(),
        }
    }

    /// Trips always start in `Draft`. The capacity check here repeats at
    /// dispatch time against the vehicle's then-current capacity.
    pub fn create_draft(&self, draft: DraftTrip) -> Result<Trip, DispatchError> {
        let pickup = draft.pickup.trim().to_owned();
        let delivery = draft.delivery.trim().to_owned();
        if pickup.is_empty() {
            return Err(DispatchError::Validation("pickup cannot be empty".to_owned()));
        }
        if delivery.is_empty() {
            return Err(DispatchError::Validation(
                "delivery cannot be empty".to_owned(),
            ));
        }
        if draft.cargo_weight == 0 {
            return Err(DispatchError::Validation(
                "cargo weight must be greater than 0".to_owned(),
            ));
        }

        let vehicle = self.store.get_vehicle(&draft.vehicle_id)?;
        self.store.get_driver(&draft.driver_id)?;
        if !cargo_fits(draft.cargo_weight, vehicle.capacity) {
            return Err(DispatchError::Validation(format!(
                "cargo weight {}kg exceeds vehicle capacity {}kg",
                draft.cargo_weight, vehicle.capacity
            )));
        }

        let trip = self.store.create_trip(NewTrip {
            vehicle_id: draft.vehicle_id,
            driver_id: draft.driver_id,
            cargo_weight: draft.cargo_weight,
            pickup,
            delivery,
            date: Utc::now().date_naive(),
        });

        self.activity.record(
            &format!("New trip draft {} created", trip.id),
            ActivityCategory::Dispatch,
        );
        info!(trip_id = %trip.id, vehicle_id = %trip.vehicle_id, driver_id = %trip.driver_id, "trip draft created");
        Ok(trip)
    }

    /// Applies one edge of the state machine. Serialized per trip id, so at
    /// most one transition is in flight for a given trip (and, through the
    /// one-active-trip invariant, for its vehicle and driver).
    pub async fn request_transition(
        &self,
        trip_id: &str,
        target: TripStatus,
    ) -> Result<Trip, DispatchError> {
        let lock = self.locks.entry(trip_id.to_owned()).or_default().clone();
        let _guard = lock.lock().await;

        let trip = self.store.get_trip(trip_id)?;
        let vehicle = self.store.get_vehicle(&trip.vehicle_id)?;
        let driver = self.store.get_driver(&trip.driver_id)?;

        if trip.status.is_terminal() {
            return Err(DispatchError::InvalidTransition {
                from: trip.status,
                to: target,
            });
        }

        match (trip.status, target) {
            (TripStatus::Draft, TripStatus::Dispatched) => {
                let today = Utc::now().date_naive();
                if let Err(reason) = check_dispatch(&vehicle, &driver, trip.cargo_weight, today) {
                    warn!(trip_id = %trip.id, %reason, "dispatch rejected");
                    return Err(reason.into());
                }

                let updated = self
                    .store
                    .update_trip(trip_id, status_patch(TripStatus::Dispatched))?;
                self.store.update_vehicle(
                    &trip.vehicle_id,
                    VehiclePatch {
                        status: Some(VehicleStatus::OnTrip),
                        ..Default::default()
                    },
                )?;
                self.store.update_driver(
                    &trip.driver_id,
                    DriverPatch {
                        status: Some(DutyStatus::OnDuty),
                        total_trips: Some(driver.total_trips + 1),
                        ..Default::default()
                    },
                )?;

                self.activity.record(
                    &format!(
                        "Trip {} dispatched: vehicle {} and driver {} allocated",
                        trip.id, trip.vehicle_id, trip.driver_id
                    ),
                    ActivityCategory::Dispatch,
                );
                info!(
                    trip_id = %trip.id,
                    vehicle_id = %trip.vehicle_id,
                    driver_id = %trip.driver_id,
                    "trip dispatched"
                );
                Ok(updated)
            }

            (TripStatus::Draft, TripStatus::Cancelled) => {
                // Nothing was allocated yet; only the trip record changes.
                let updated = self
                    .store
                    .update_trip(trip_id, status_patch(TripStatus::Cancelled))?;
                self.activity.record(
                    &format!("Trip {} cancelled", trip.id),
                    ActivityCategory::Dispatch,
                );
                info!(trip_id = %trip.id, "draft trip cancelled");
                Ok(updated)
            }

            (TripStatus::Dispatched, TripStatus::Completed) => {
                let updated = self
                    .store
                    .update_trip(trip_id, status_patch(TripStatus::Completed))?;
                self.release(&trip, Some(driver.completed_trips + 1))?;
                self.activity.record(
                    &format!(
                        "Trip {} completed: vehicle {} now available",
                        trip.id, trip.vehicle_id
                    ),
                    ActivityCategory::Dispatch,
                );
                info!(trip_id = %trip.id, vehicle_id = %trip.vehicle_id, "trip completed");
                Ok(updated)
            }

            (TripStatus::Dispatched, TripStatus::Cancelled) => {
                let updated = self
                    .store
                    .update_trip(trip_id, status_patch(TripStatus::Cancelled))?;
                self.release(&trip, None)?;
                self.activity.record(
                    &format!(
                        "Trip {} cancelled: vehicle {} now available",
                        trip.id, trip.vehicle_id
                    ),
                    ActivityCategory::Dispatch,
                );
                info!(trip_id = %trip.id, vehicle_id = %trip.vehicle_id, "dispatched trip cancelled");
                Ok(updated)
            }

            (from, to) => Err(DispatchError::InvalidTransition { from, to }),
        }
    }

    fn release(&self, trip: &Trip, completed_trips: Option<u32>) -> Result<(), DispatchError> {
        self.store.update_vehicle(
            &trip.vehicle_id,
            VehiclePatch {
                status: Some(VehicleStatus::Available),
                ..Default::default()
            },
        )?;
        self.store.update_driver(
            &trip.driver_id,
            DriverPatch {
                status: Some(DutyStatus::OffDuty),
                completed_trips,
                ..Default::default()
            },
        )?;
        Ok(())
    }
}
