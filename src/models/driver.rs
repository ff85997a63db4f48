use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum LicenseCategory {
    #[serde(rename = "Light Vehicle")]
    LightVehicle,
    #[serde(rename = "Heavy Vehicle")]
    HeavyVehicle,
    Hazmat,
}

/// Duty status is distinct from license validity: a driver with a valid
/// license can still be `Suspended` by the safety workflow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum DutyStatus {
    #[serde(rename = "On Duty")]
    OnDuty,
    #[serde(rename = "Off Duty")]
    OffDuty,
    Suspended,
}

impl std::fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DutyStatus::OnDuty => "On Duty",
            DutyStatus::OffDuty => "Off Duty",
            DutyStatus::Suspended => "Suspended",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub license_number: String,
    pub license_category: LicenseCategory,
    pub license_expiry: NaiveDate,
    pub status: DutyStatus,
    pub safety_score: u8,
    pub trip_completion_rate: f64,
    pub total_trips: u32,
    pub completed_trips: u32,
    pub incidents: u32,
    pub last_incident_date: Option<NaiveDate>,
    pub phone: String,
    pub join_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriverPatch {
    pub name: Option<String>,
    pub license_number: Option<String>,
    pub license_category: Option<LicenseCategory>,
    pub license_expiry: Option<NaiveDate>,
    pub status: Option<DutyStatus>,
    pub safety_score: Option<u8>,
    pub total_trips: Option<u32>,
    pub completed_trips: Option<u32>,
    pub incidents: Option<u32>,
    pub last_incident_date: Option<NaiveDate>,
    pub phone: Option<String>,
}

impl Driver {
    pub fn apply(&mut self, patch: DriverPatch) {
        let counters_changed = patch.total_trips.is_some() || patch.completed_trips.is_some();
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(license_number) = patch.license_number {
            self.license_number = license_number;
        }
        if let Some(license_category) = patch.license_category {
            self.license_category = license_category;
        }
        if let Some(license_expiry) = patch.license_expiry {
            self.license_expiry = license_expiry;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(safety_score) = patch.safety_score {
            self.safety_score = safety_score.min(100);
        }
        if let Some(total_trips) = patch.total_trips {
            self.total_trips = total_trips;
        }
        if let Some(completed_trips) = patch.completed_trips {
            self.completed_trips = completed_trips;
        }
        if let Some(incidents) = patch.incidents {
            self.incidents = incidents;
        }
        if let Some(last_incident_date) = patch.last_incident_date {
            self.last_incident_date = Some(last_incident_date);
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if counters_changed {
            self.trip_completion_rate = if self.total_trips == 0 {
                0.0
            } else {
                (self.completed_trips as f64 / self.total_trips as f64 * 100.0 * 100.0).round()
                    / 100.0
            };
        }
    }
}
