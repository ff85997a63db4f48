use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelEntry {
    pub id: String,
    pub vehicle_id: String,
    pub liters: f64,
    pub cost: f64,
    pub cost_per_liter: f64,
    pub date: NaiveDate,
    pub odometer_reading: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FuelPatch {
    pub liters: Option<f64>,
    pub cost: Option<f64>,
    pub date: Option<NaiveDate>,
    pub odometer_reading: Option<u32>,
}

pub fn cost_per_liter(cost: f64, liters: f64) -> f64 {
    (cost / liters * 100.0).round() / 100.0
}

impl FuelEntry {
    pub fn apply(&mut self, patch: FuelPatch) {
        if let Some(liters) = patch.liters {
            self.liters = liters;
        }
        if let Some(cost) = patch.cost {
            self.cost = cost;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(odometer_reading) = patch.odometer_reading {
            self.odometer_reading = Some(odometer_reading);
        }
        if self.liters > 0.0 {
            self.cost_per_liter = cost_per_liter(self.cost, self.liters);
        }
    }
}
