use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum IncidentType {
    #[serde(rename = "Minor Collision")]
    MinorCollision,
    #[serde(rename = "Major Collision")]
    MajorCollision,
    #[serde(rename = "Traffic Violation")]
    TrafficViolation,
    #[serde(rename = "Equipment Damage")]
    EquipmentDamage,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum IncidentSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    pub driver_id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    pub severity: IncidentSeverity,
    pub description: String,
    pub resolved: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncidentPatch {
    #[serde(rename = "type")]
    pub incident_type: Option<IncidentType>,
    pub severity: Option<IncidentSeverity>,
    pub description: Option<String>,
    pub resolved: Option<bool>,
}

impl Incident {
    pub fn apply(&mut self, patch: IncidentPatch) {
        if let Some(incident_type) = patch.incident_type {
            self.incident_type = incident_type;
        }
        if let Some(severity) = patch.severity {
            self.severity = severity;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(resolved) = patch.resolved {
            self.resolved = resolved;
        }
    }
}
