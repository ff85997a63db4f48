use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Terminal states are `Completed` and `Cancelled`; the valid edges are
/// owned by the lifecycle controller, not by this type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TripStatus {
    Draft,
    Dispatched,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, TripStatus::Completed | TripStatus::Cancelled)
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TripStatus::Draft => "Draft",
            TripStatus::Dispatched => "Dispatched",
            TripStatus::Completed => "Completed",
            TripStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub vehicle_id: String,
    pub driver_id: String,
    pub cargo_weight: u32,
    pub pickup: String,
    pub delivery: String,
    pub status: TripStatus,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripPatch {
    pub status: Option<TripStatus>,
}

impl Trip {
    pub fn apply(&mut self, patch: TripPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Creation shape handed to the store, which assigns the `TR-NNN` id.
#[derive(Debug, Clone)]
pub struct NewTrip {
    pub vehicle_id: String,
    pub driver_id: String,
    pub cargo_weight: u32,
    pub pickup: String,
    pub delivery: String,
    pub date: NaiveDate,
}
