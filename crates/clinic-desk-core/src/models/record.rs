//! Appointment/lead records and their lifecycle enumerations.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Primary lifecycle stage of a record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// First contact, nothing arranged yet
    New,
    /// Front desk is following up
    InProgress,
    /// Visit booked
    Scheduled,
    /// Visit cycle closed
    Finished,
}

impl RecordStatus {
    /// All statuses in pipeline order.
    pub const ALL: [RecordStatus; 4] = [
        RecordStatus::New,
        RecordStatus::InProgress,
        RecordStatus::Scheduled,
        RecordStatus::Finished,
    ];

    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::New => "new",
            RecordStatus::InProgress => "in_progress",
            RecordStatus::Scheduled => "scheduled",
            RecordStatus::Finished => "finished",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a status string is not one of the four lifecycle stages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown record status: {0:?}")]
pub struct ParseStatusError(pub String);

impl FromStr for RecordStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "new" => Ok(RecordStatus::New),
            "in_progress" => Ok(RecordStatus::InProgress),
            "scheduled" => Ok(RecordStatus::Scheduled),
            "finished" => Ok(RecordStatus::Finished),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Secondary result/event flag set alongside a status change.
///
/// Values outside the known vocabulary are kept verbatim in `Unknown` so a
/// record read from upstream storage serializes back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Outcome {
    Attended,
    NoShow,
    Cancelled,
    Rescheduled,
    Unknown(String),
}

impl Outcome {
    /// Wire name of the outcome.
    pub fn as_str(&self) -> &str {
        match self {
            Outcome::Attended => "attended",
            Outcome::NoShow => "no_show",
            Outcome::Cancelled => "cancelled",
            Outcome::Rescheduled => "rescheduled",
            Outcome::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for Outcome {
    fn from(s: &str) -> Self {
        match s.trim() {
            "attended" => Outcome::Attended,
            "no_show" => Outcome::NoShow,
            "cancelled" => Outcome::Cancelled,
            "rescheduled" => Outcome::Rescheduled,
            _ => Outcome::Unknown(s.to_string()),
        }
    }
}

impl From<String> for Outcome {
    fn from(s: String) -> Self {
        Outcome::from(s.as_str())
    }
}

impl From<Outcome> for String {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A patient appointment/lead tracked from first contact to completed visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Unique record ID
    pub id: String,
    /// Patient name
    pub name: String,
    /// Patient phone
    pub phone: String,
    /// Lifecycle stage
    pub status: RecordStatus,
    /// Result or reschedule flag, if one was recorded
    #[serde(default)]
    pub outcome: Option<Outcome>,
    /// Scheduled visit (clinic-local time)
    #[serde(default)]
    pub appointment_time: Option<NaiveDateTime>,
    /// Practitioner label
    #[serde(default)]
    pub practitioner: Option<String>,
    /// Free-text or structured category (see [`CategoryLabel`](super::CategoryLabel))
    #[serde(default)]
    pub category: String,
    /// Free-text notes, possibly carrying an embedded financial block
    #[serde(default)]
    pub annotations: String,
    /// Creation timestamp (clinic-local time)
    pub created_at: NaiveDateTime,
}

impl Record {
    /// Create a new record in status `new`.
    pub fn new(name: String, phone: String, category: String, created_at: NaiveDateTime) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            phone,
            status: RecordStatus::New,
            outcome: None,
            appointment_time: None,
            practitioner: None,
            category,
            annotations: String::new(),
            created_at,
        }
    }

    /// Coarse time elapsed since the record was created.
    pub fn elapsed_since(&self, now: NaiveDateTime) -> Elapsed {
        Elapsed::between(self.created_at, now)
    }

    /// Whether the record is assigned to the given practitioner.
    ///
    /// Comparison ignores surrounding whitespace and case.
    pub fn is_with_practitioner(&self, practitioner: &str) -> bool {
        self.practitioner
            .as_deref()
            .map(|p| p.trim().eq_ignore_ascii_case(practitioner.trim()))
            .unwrap_or(false)
    }
}

/// Time since creation, rounded down to the largest whole unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "unit", content = "value")]
pub enum Elapsed {
    JustNow,
    Minutes(i64),
    Hours(i64),
    Days(i64),
}

impl Elapsed {
    /// Elapsed time from `from` to `now`; a future `from` counts as just now.
    pub fn between(from: NaiveDateTime, now: NaiveDateTime) -> Self {
        let minutes = (now - from).num_minutes();
        match minutes {
            m if m < 1 => Elapsed::JustNow,
            m if m < 60 => Elapsed::Minutes(m),
            m if m < 24 * 60 => Elapsed::Hours(m / 60),
            m => Elapsed::Days(m / (24 * 60)),
        }
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Elapsed::JustNow => f.write_str("just now"),
            Elapsed::Minutes(n) => write!(f, "{}m", n),
            Elapsed::Hours(n) => write!(f, "{}h", n),
            Elapsed::Days(n) => write!(f, "{}d", n),
        }
    }
}
