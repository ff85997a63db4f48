use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum VehicleType {
    Truck,
    Van,
    Trailer,
}

/// Operational status. `On Trip` is owned by the trip lifecycle; `In Shop`
/// and `Out of Service` are set through maintenance workflows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum VehicleStatus {
    Available,
    #[serde(rename = "On Trip")]
    OnTrip,
    #[serde(rename = "In Shop")]
    InShop,
    #[serde(rename = "Out of Service")]
    OutOfService,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    pub plate: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub capacity: u32,
    pub status: VehicleStatus,
    pub odometer: u32,
    pub region: String,
    pub acq_cost: f64,
    pub revenue: f64,
}

/// Typed update shape. Route handlers build one of these from a validated
/// request body; nothing loosely-shaped reaches the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehiclePatch {
    pub name: Option<String>,
    pub plate: Option<String>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,
    pub capacity: Option<u32>,
    pub status: Option<VehicleStatus>,
    pub odometer: Option<u32>,
    pub region: Option<String>,
    pub acq_cost: Option<f64>,
    pub revenue: Option<f64>,
}

impl Vehicle {
    pub fn apply(&mut self, patch: VehiclePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(plate) = patch.plate {
            self.plate = plate;
        }
        if let Some(vehicle_type) = patch.vehicle_type {
            self.vehicle_type = vehicle_type;
        }
        if let Some(capacity) = patch.capacity {
            self.capacity = capacity;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(odometer) = patch.odometer {
            self.odometer = odometer;
        }
        if let Some(region) = patch.region {
            self.region = region;
        }
        if let Some(acq_cost) = patch.acq_cost {
            self.acq_cost = acq_cost;
        }
        if let Some(revenue) = patch.revenue {
            self.revenue = revenue;
        }
    }
}
