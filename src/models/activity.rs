use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Dispatch,
    Maintenance,
    Fuel,
    Driver,
    Vehicle,
    Incident,
    Safety,
    Info,
    Alert,
}

/// One audit entry. `time` carries the wall-clock label shown in the feed;
/// `created_at` is what the listing sorts on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub time: String,
    pub msg: String,
    pub category: ActivityCategory,
    pub created_at: DateTime<Utc>,
}
