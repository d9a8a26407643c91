use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{Display, EnumString};

use super::employee::Employee;

/// Normalized per-day status values sent by the HR API.
///
/// Deserialization is lenient: a status string the enum does not know yet
/// folds to `NotYetRecorded`, which the matrix builder counts as an absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,
    Late,
    OnLeave,
    Sick,
    Absent,
    NotYetRecorded,
}

impl<'de> Deserialize<'de> for AttendanceStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(AttendanceStatus::NotYetRecorded))
    }
}

/// One raw attendance event for one employee on one calendar day.
///
/// Absence of a record for a working day is itself meaningful: the matrix
/// builder treats the day as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: u64,
    pub employee: Employee,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}
