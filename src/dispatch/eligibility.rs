use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::models::driver::{Driver, DutyStatus};
use crate::models::vehicle::{Vehicle, VehicleStatus};

/// Why a vehicle/driver pair may not be dispatched. Carried up to the API
/// layer so the caller can render an actionable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibleReason {
    #[error("vehicle is not available for dispatch")]
    VehicleUnavailable,
    #[error("driver license has expired")]
    LicenseExpired,
    #[error("driver is suspended")]
    DriverSuspended,
    #[error("cargo weight exceeds vehicle capacity")]
    CapacityExceeded,
}

pub fn vehicle_eligible(vehicle: &Vehicle) -> bool {
    vehicle.status == VehicleStatus::Available
}

/// Calendar-date comparison; a license expiring today is already expired.
pub fn license_valid(driver: &Driver, as_of: NaiveDate) -> bool {
    driver.license_expiry > as_of
}

pub fn driver_eligible(driver: &Driver, as_of: NaiveDate) -> bool {
    license_valid(driver, as_of) && driver.status != DutyStatus::Suspended
}

pub fn cargo_fits(cargo_weight: u32, capacity: u32) -> bool {
    cargo_weight <= capacity
}

/// The combined precondition for the `Draft -> Dispatched` edge. The cargo
/// check runs here again even though creation already enforced it; the
/// vehicle's capacity may have changed since the draft was written.
pub fn check_dispatch(
    vehicle: &Vehicle,
    driver: &Driver,
    cargo_weight: u32,
    as_of: NaiveDate,
) -> Result<(), IneligibleReason> {
    if !vehicle_eligible(vehicle) {
        return Err(IneligibleReason::VehicleUnavailable);
    }
    if !license_valid(driver, as_of) {
        return Err(IneligibleReason::LicenseExpired);
    }
    if driver.status == DutyStatus::Suspended {
        return Err(IneligibleReason::DriverSuspended);
    }
    if !cargo_fits(cargo_weight, vehicle.capacity) {
        return Err(IneligibleReason::CapacityExceeded);
    }
    Ok(())
}
