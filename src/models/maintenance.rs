use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maintenance {
    pub id: String,
    pub vehicle_id: String,
    pub service_type: String,
    pub cost: f64,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub odometer_reading: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaintenancePatch {
    pub service_type: Option<String>,
    pub cost: Option<f64>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub odometer_reading: Option<u32>,
}

impl Maintenance {
    pub fn apply(&mut self, patch: MaintenancePatch) {
        if let Some(service_type) = patch.service_type {
            self.service_type = service_type;
        }
        if let Some(cost) = patch.cost {
            self.cost = cost;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
        if let Some(odometer_reading) = patch.odometer_reading {
            self.odometer_reading = Some(odometer_reading);
        }
    }
}
