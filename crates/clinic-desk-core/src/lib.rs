//! Clinic Desk Core Library
//!
//! Front-desk appointment tracking: a record pipeline from first contact to
//! completed visit, plus the day-by-day time-slot agenda.
//!
//! # Architecture
//!
//! ```text
//!   Records (fetched by the caller)      day, window, now, practitioner
//!               │                                   │
//!               └─────────────────┬─────────────────┘
//!                                 ▼
//!                      ┌─────────────────────┐
//!                      │  Slot grid + exact  │
//!                      │  minute assignment  │
//!                      └──────────┬──────────┘
//!                                 │ per assigned record
//!                 ┌───────────────┼───────────────┐
//!                 ▼               ▼               ▼
//!           Badge rules    Annotation codec   Elapsed time
//!                 └───────────────┼───────────────┘
//!                                 ▼
//!                            Agenda view
//! ```
//!
//! # Core Principle
//!
//! **Everything here is a pure function of its inputs.** No I/O, no clock
//! reads, no persistence: the caller fetches records, supplies "now" and
//! commits status changes.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Record, RecordStatus, Outcome, FinancialRecord, etc.)
//! - [`codec`]: Financial sub-record embedded in free-text notes
//! - [`rules`]: Badge legality and status pipeline
//! - [`schedule`]: Slot grid generation and record assignment
//! - [`agenda`]: Agenda view builder

pub mod agenda;
pub mod codec;
pub mod models;
pub mod rules;
pub mod schedule;

// Re-export commonly used types
pub use agenda::{build_agenda_view, AgendaRequest, AgendaView, RecordCard, SlotEntry};
pub use codec::{decode, encode, DecodedAnnotations};
pub use models::{
    CategoryLabel, Elapsed, FinancialRecord, Outcome, ParseStatusError, Record, RecordStatus,
};
pub use rules::{compute_badges, record_badges, transition_status, Badge, BadgeKind, BadgeTone};
pub use schedule::{
    assign_records, generate_slots, Assignment, ScheduleConfig, Slot, SlotCollision, SlotState,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicDeskError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ClinicDeskError {
    fn from(e: serde_json::Error) -> Self {
        ClinicDeskError::SerializationError(e.to_string())
    }
}

impl From<schedule::ConfigError> for ClinicDeskError {
    fn from(e: schedule::ConfigError) -> Self {
        ClinicDeskError::InvalidInput(e.to_string())
    }
}

impl From<ParseStatusError> for ClinicDeskError {
    fn from(e: ParseStatusError) -> Self {
        ClinicDeskError::InvalidInput(e.to_string())
    }
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DAY_FORMAT: &str = "%Y-%m-%d";

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ClinicDeskError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|e| ClinicDeskError::InvalidInput(format!("timestamp {:?}: {}", value, e)))
}

fn parse_day(value: &str) -> Result<NaiveDate, ClinicDeskError> {
    NaiveDate::parse_from_str(value.trim(), DAY_FORMAT)
        .map_err(|e| ClinicDeskError::InvalidInput(format!("day {:?}: {}", value, e)))
}

fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Treat a blank string from the caller as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// snake_case wire name of a unit enum variant.
fn wire_name<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create a desk with the agenda window from `config_json`, or the default
/// window (07:00-20:00, 30 minute slots) when none is given.
#[uniffi::export]
pub fn open_desk(config_json: Option<String>) -> Result<Arc<ClinicDeskCore>, ClinicDeskError> {
    let config = match config_json {
        Some(json) => ScheduleConfig::from_json_str(&json)?,
        None => ScheduleConfig::default(),
    };
    Ok(Arc::new(ClinicDeskCore { config }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Stateless entry point for the presentation layer.
#[derive(uniffi::Object)]
pub struct ClinicDeskCore {
    config: ScheduleConfig,
}

#[uniffi::export]
impl ClinicDeskCore {
    // =========================================================================
    // Status Operations
    // =========================================================================

    /// Move a record to a new status. The caller persists the result.
    pub fn transition_status(
        &self,
        record: FfiRecord,
        new_status: String,
    ) -> Result<FfiRecord, ClinicDeskError> {
        let record = Record::try_from(record)?;
        let status: RecordStatus = new_status.parse()?;
        Ok(rules::transition_status(&record, status).into())
    }

    /// Badges legal for a status/outcome pair. Unknown statuses get none.
    pub fn compute_badges(&self, status: String, outcome: Option<String>) -> Vec<FfiBadge> {
        let Ok(status) = status.parse::<RecordStatus>() else {
            return Vec::new();
        };
        let outcome = non_blank(outcome).map(Outcome::from);
        rules::compute_badges(status, outcome.as_ref())
            .into_iter()
            .map(|b| b.into())
            .collect()
    }

    // =========================================================================
    // Annotation Operations
    // =========================================================================

    /// Embed a financial sub-record in notes, replacing any existing one.
    pub fn encode_annotations(&self, text: String, financial: FfiFinancialRecord) -> String {
        codec::encode(&text, &financial.into())
    }

    /// Split notes into clean text and the embedded financial sub-record.
    pub fn decode_annotations(&self, text: String) -> FfiDecodedAnnotations {
        codec::decode(&text).into()
    }

    // =========================================================================
    // Schedule Operations
    // =========================================================================

    /// Slot grid for a day (`YYYY-MM-DD`).
    pub fn generate_slots(
        &self,
        day: String,
        start_hour: u32,
        end_hour: u32,
        slot_minutes: u32,
    ) -> Result<Vec<FfiSlot>, ClinicDeskError> {
        let day = parse_day(&day)?;
        Ok(schedule::generate_slots(day, start_hour, end_hour, slot_minutes)
            .into_iter()
            .map(|s| s.into())
            .collect())
    }

    /// Agenda for a day with an explicit window.
    pub fn build_agenda_view(
        &self,
        day: String,
        records: Vec<FfiRecord>,
        start_hour: u32,
        end_hour: u32,
        slot_minutes: u32,
        now: String,
        practitioner: Option<String>,
    ) -> Result<FfiAgendaView, ClinicDeskError> {
        let request = AgendaRequest {
            day: parse_day(&day)?,
            now: parse_timestamp(&now)?,
            window: ScheduleConfig {
                start_hour,
                end_hour,
                slot_minutes,
            },
            practitioner: non_blank(practitioner),
        };
        self.agenda(&request, records)
    }

    /// Agenda for `now`'s day using the desk's configured window.
    pub fn build_today_agenda(
        &self,
        records: Vec<FfiRecord>,
        now: String,
        practitioner: Option<String>,
    ) -> Result<FfiAgendaView, ClinicDeskError> {
        let now = parse_timestamp(&now)?;
        let request = AgendaRequest {
            day: now.date(),
            now,
            window: self.config,
            practitioner: non_blank(practitioner),
        };
        self.agenda(&request, records)
    }
}

impl ClinicDeskCore {
    fn agenda(
        &self,
        request: &AgendaRequest,
        records: Vec<FfiRecord>,
    ) -> Result<FfiAgendaView, ClinicDeskError> {
        let records = records
            .into_iter()
            .map(Record::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(agenda::build_agenda_view(request, &records).into())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe record. Timestamps are `YYYY-MM-DDTHH:MM[:SS]`.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecord {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub status: String,
    pub outcome: Option<String>,
    pub appointment_time: Option<String>,
    pub practitioner: Option<String>,
    pub category: String,
    pub annotations: String,
    pub created_at: String,
}

impl From<Record> for FfiRecord {
    fn from(record: Record) -> Self {
        Self {
            id: record.id,
            name: record.name,
            phone: record.phone,
            status: record.status.to_string(),
            outcome: record.outcome.map(String::from),
            appointment_time: record.appointment_time.map(format_timestamp),
            practitioner: record.practitioner,
            category: record.category,
            annotations: record.annotations,
            created_at: format_timestamp(record.created_at),
        }
    }
}

impl TryFrom<FfiRecord> for Record {
    type Error = ClinicDeskError;

    fn try_from(record: FfiRecord) -> Result<Self, Self::Error> {
        Ok(Record {
            status: record.status.parse()?,
            outcome: non_blank(record.outcome).map(Outcome::from),
            appointment_time: non_blank(record.appointment_time)
                .as_deref()
                .map(parse_timestamp)
                .transpose()?,
            created_at: parse_timestamp(&record.created_at)?,
            id: record.id,
            name: record.name,
            phone: record.phone,
            practitioner: non_blank(record.practitioner),
            category: record.category,
            annotations: record.annotations,
        })
    }
}

/// FFI-safe badge.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBadge {
    pub kind: String,
    pub label: String,
    pub icon: String,
    pub tone: String,
}

impl From<Badge> for FfiBadge {
    fn from(badge: Badge) -> Self {
        Self {
            kind: wire_name(&badge.kind),
            label: badge.label,
            icon: badge.icon,
            tone: wire_name(&badge.tone),
        }
    }
}

/// FFI-safe financial sub-record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFinancialRecord {
    pub payment_type: Option<String>,
    pub insurance_name: Option<String>,
    pub amount: Option<String>,
}

impl From<FinancialRecord> for FfiFinancialRecord {
    fn from(financial: FinancialRecord) -> Self {
        Self {
            payment_type: financial.payment_type,
            insurance_name: financial.insurance_name,
            amount: financial.amount,
        }
    }
}

impl From<FfiFinancialRecord> for FinancialRecord {
    fn from(financial: FfiFinancialRecord) -> Self {
        FinancialRecord {
            payment_type: financial.payment_type,
            insurance_name: financial.insurance_name,
            amount: financial.amount,
        }
    }
}

/// FFI-safe decoded annotations.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDecodedAnnotations {
    pub clean_text: String,
    pub financial: Option<FfiFinancialRecord>,
}

impl From<DecodedAnnotations> for FfiDecodedAnnotations {
    fn from(decoded: DecodedAnnotations) -> Self {
        Self {
            clean_text: decoded.clean_text,
            financial: decoded.financial.map(|f| f.into()),
        }
    }
}

/// FFI-safe slot.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSlot {
    pub start: String,
    pub label: String,
}

impl From<Slot> for FfiSlot {
    fn from(slot: Slot) -> Self {
        Self {
            start: format_timestamp(slot.start),
            label: slot.label,
        }
    }
}

/// FFI-safe record card.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecordCard {
    pub record_id: String,
    pub name: String,
    pub phone: String,
    pub status: String,
    pub practitioner: Option<String>,
    pub category: String,
    pub notes: String,
    pub financial: Option<FfiFinancialRecord>,
    pub badges: Vec<FfiBadge>,
    pub elapsed: String,
}

impl From<RecordCard> for FfiRecordCard {
    fn from(card: RecordCard) -> Self {
        Self {
            record_id: card.record_id,
            name: card.name,
            phone: card.phone,
            status: card.status.to_string(),
            practitioner: card.practitioner,
            category: card.category.to_string(),
            notes: card.notes,
            financial: card.financial.map(|f| f.into()),
            badges: card.badges.into_iter().map(|b| b.into()).collect(),
            elapsed: card.elapsed.to_string(),
        }
    }
}

/// FFI-safe agenda row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSlotEntry {
    pub label: String,
    pub start: String,
    pub state: String,
    pub allows_quick_schedule: bool,
    pub card: Option<FfiRecordCard>,
}

impl From<SlotEntry> for FfiSlotEntry {
    fn from(entry: SlotEntry) -> Self {
        Self {
            allows_quick_schedule: entry.allows_quick_schedule(),
            label: entry.label,
            start: format_timestamp(entry.start),
            state: wire_name(&entry.state),
            card: entry.card.map(|c| c.into()),
        }
    }
}

/// FFI-safe slot collision.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSlotCollision {
    pub slot_label: String,
    pub assigned_id: String,
    pub displaced_id: String,
}

impl From<SlotCollision> for FfiSlotCollision {
    fn from(collision: SlotCollision) -> Self {
        Self {
            slot_label: collision.slot_label,
            assigned_id: collision.assigned_id,
            displaced_id: collision.displaced_id,
        }
    }
}

/// FFI-safe agenda view.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAgendaView {
    pub day: String,
    pub entries: Vec<FfiSlotEntry>,
    pub collisions: Vec<FfiSlotCollision>,
    pub off_grid: Vec<String>,
}

impl From<AgendaView> for FfiAgendaView {
    fn from(view: AgendaView) -> Self {
        Self {
            day: view.day.format(DAY_FORMAT).to_string(),
            entries: view.entries.into_iter().map(|e| e.into()).collect(),
            collisions: view.collisions.into_iter().map(|c| c.into()).collect(),
            off_grid: view.off_grid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ffi_record(id: &str, status: &str, appointment_time: Option<&str>) -> FfiRecord {
        FfiRecord {
            id: id.into(),
            name: "Ana".into(),
            phone: "555-0100".into(),
            status: status.into(),
            outcome: None,
            appointment_time: appointment_time.map(str::to_string),
            practitioner: None,
            category: String::new(),
            annotations: String::new(),
            created_at: "2024-03-11T06:00:00".into(),
        }
    }

    #[test]
    fn test_open_desk_config() {
        let desk = open_desk(None).unwrap();
        assert_eq!(desk.config, ScheduleConfig::default());

        let desk = open_desk(Some(r#"{"start_hour": 8, "end_hour": 12}"#.into())).unwrap();
        assert_eq!(desk.config.end_hour, 12);

        assert!(matches!(
            open_desk(Some(r#"{"slot_minutes": 0}"#.into())),
            Err(ClinicDeskError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_transition_status_ffi() {
        let desk = open_desk(None).unwrap();
        let record = ffi_record("a", "new", None);

        let moved = desk.transition_status(record.clone(), "scheduled".into()).unwrap();
        assert_eq!(moved.status, "scheduled");
        assert_eq!(moved.created_at, "2024-03-11T06:00:00");

        assert!(matches!(
            desk.transition_status(record, "archived".into()),
            Err(ClinicDeskError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_compute_badges_ffi_is_total() {
        let desk = open_desk(None).unwrap();

        let badges = desk.compute_badges("finished".into(), Some("attended".into()));
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].kind, "attended");
        assert_eq!(badges[0].tone, "success");

        assert!(desk.compute_badges("".into(), Some("attended".into())).is_empty());
        assert!(desk.compute_badges("finished".into(), None).is_empty());
        assert_eq!(
            desk.compute_badges("scheduled".into(), Some("postponed".into()))[0].kind,
            "unknown"
        );
    }

    #[test]
    fn test_blank_strings_are_absent() {
        let desk = open_desk(None).unwrap();
        assert!(desk.compute_badges("scheduled".into(), Some("".into())).is_empty());
        assert!(desk.compute_badges("in_progress".into(), Some("  ".into())).is_empty());

        let mut record = ffi_record("a", "scheduled", Some("2024-03-11T09:00"));
        record.outcome = Some(String::new());
        record.practitioner = Some(" ".into());
        let converted = Record::try_from(record.clone()).unwrap();
        assert!(converted.outcome.is_none());
        assert!(converted.practitioner.is_none());

        let view = desk
            .build_agenda_view(
                "2024-03-11".into(),
                vec![record.clone()],
                9,
                10,
                30,
                "2024-03-11T07:00".into(),
                Some(String::new()),
            )
            .unwrap();
        let card = view.entries[0].card.as_ref().unwrap();
        assert!(card.badges.is_empty());

        let today = desk
            .build_today_agenda(vec![record], "2024-03-11T07:00".into(), Some("".into()))
            .unwrap();
        assert_eq!(today.entries.iter().filter(|e| e.card.is_some()).count(), 1);
    }

    #[test]
    fn test_annotations_ffi_round_trip() {
        let desk = open_desk(None).unwrap();
        let financial = FfiFinancialRecord {
            payment_type: Some("insurance".into()),
            insurance_name: Some("Acme".into()),
            amount: Some("250.00".into()),
        };
        let encoded = desk.encode_annotations("Patient is anxious".into(), financial);
        let decoded = desk.decode_annotations(encoded);

        assert_eq!(decoded.clean_text, "Patient is anxious");
        assert_eq!(decoded.financial.unwrap().insurance_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_generate_slots_ffi() {
        let desk = open_desk(None).unwrap();
        let slots = desk.generate_slots("2024-03-11".into(), 7, 20, 30).unwrap();
        assert_eq!(slots.len(), 26);
        assert_eq!(slots[1].start, "2024-03-11T07:30:00");

        assert!(desk.generate_slots("11/03/2024".into(), 7, 20, 30).is_err());
    }

    #[test]
    fn test_build_agenda_view_ffi() {
        let desk = open_desk(None).unwrap();
        let records = vec![ffi_record("a", "scheduled", Some("2024-03-11T09:30"))];

        let view = desk
            .build_agenda_view(
                "2024-03-11".into(),
                records.clone(),
                9,
                10,
                30,
                "2024-03-11T07:00".into(),
                None,
            )
            .unwrap();

        assert_eq!(view.day, "2024-03-11");
        assert_eq!(view.entries.len(), 2);
        assert_eq!(view.entries[0].state, "free");
        assert!(view.entries[0].allows_quick_schedule);
        assert_eq!(view.entries[1].state, "occupied");
        assert_eq!(view.entries[1].card.as_ref().unwrap().elapsed, "1h");

        let today = desk
            .build_today_agenda(records, "2024-03-11T07:00:00".into(), None)
            .unwrap();
        assert_eq!(today.entries.len(), 26);
    }
}
