//! Agenda view builder.
//!
//! Composes the slot grid, record assignment, badge rules and annotation
//! decoding into plain renderable data. All inputs (day, "now", window,
//! practitioner filter) are explicit so results are reproducible.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::codec;
use crate::models::{CategoryLabel, Elapsed, FinancialRecord, Record, RecordStatus};
use crate::rules::{record_badges, Badge};
use crate::schedule::{
    assign_records, classify_slot, generate_slots_for, ScheduleConfig, SlotCollision, SlotState,
};

/// Parameters of an agenda query.
#[derive(Debug, Clone)]
pub struct AgendaRequest {
    /// Day to render
    pub day: NaiveDate,
    /// Current clinic-local time
    pub now: NaiveDateTime,
    /// Opening hours and slot width
    pub window: ScheduleConfig,
    /// Only show this practitioner's records
    pub practitioner: Option<String>,
}

impl AgendaRequest {
    /// Request for `day` with the default window and no filter.
    pub fn new(day: NaiveDate, now: NaiveDateTime) -> Self {
        Self {
            day,
            now,
            window: ScheduleConfig::default(),
            practitioner: None,
        }
    }
}

/// Display data for a record occupying a slot.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecordCard {
    pub record_id: String,
    pub name: String,
    pub phone: String,
    pub status: RecordStatus,
    pub practitioner: Option<String>,
    pub category: CategoryLabel,
    /// Notes without the financial block
    pub notes: String,
    pub financial: Option<FinancialRecord>,
    /// Payment type badge first, then the legal outcome badge
    pub badges: Vec<Badge>,
    pub elapsed: Elapsed,
}

impl RecordCard {
    /// Build the card for `record` as seen at `now`.
    pub fn from_record(record: &Record, now: NaiveDateTime) -> Self {
        let decoded = codec::decode(&record.annotations);
        let badges = record_badges(record, decoded.financial.as_ref());

        Self {
            record_id: record.id.clone(),
            name: record.name.clone(),
            phone: record.phone.clone(),
            status: record.status,
            practitioner: record.practitioner.clone(),
            category: CategoryLabel::parse(&record.category),
            notes: decoded.clean_text,
            financial: decoded.financial,
            badges,
            elapsed: record.elapsed_since(now),
        }
    }
}

/// One row of the agenda.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SlotEntry {
    /// "HH:MM"
    pub label: String,
    pub start: NaiveDateTime,
    pub state: SlotState,
    pub card: Option<RecordCard>,
}

impl SlotEntry {
    /// Whether the caller may offer a quick-schedule action here.
    pub fn allows_quick_schedule(&self) -> bool {
        self.state.allows_quick_schedule()
    }
}

/// Renderable agenda for one day.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AgendaView {
    pub day: NaiveDate,
    /// Slot rows in time order
    pub entries: Vec<SlotEntry>,
    /// Double bookings resolved first-wins
    pub collisions: Vec<SlotCollision>,
    /// Ids of records scheduled between displayed slots
    pub off_grid: Vec<String>,
}

impl AgendaView {
    /// Entries that hold a record.
    pub fn occupied(&self) -> impl Iterator<Item = &SlotEntry> {
        self.entries.iter().filter(|e| e.card.is_some())
    }

    /// Whether any booking anomaly needs the caller's attention.
    pub fn has_anomalies(&self) -> bool {
        !self.collisions.is_empty() || !self.off_grid.is_empty()
    }
}

/// Build the agenda for `request.day` from the full, unfiltered record set.
pub fn build_agenda_view(request: &AgendaRequest, records: &[Record]) -> AgendaView {
    let slots = generate_slots_for(request.day, &request.window);
    let assignment = assign_records(
        slots,
        records,
        request.day,
        request.practitioner.as_deref(),
    );

    let entries: Vec<SlotEntry> = assignment
        .slots
        .iter()
        .map(|assigned| SlotEntry {
            label: assigned.slot.label.clone(),
            start: assigned.slot.start,
            state: classify_slot(
                &assigned.slot,
                assigned.record.is_some(),
                request.day,
                request.now,
            ),
            card: assigned
                .record
                .map(|record| RecordCard::from_record(record, request.now)),
        })
        .collect();

    log::debug!(
        "Agenda {}: {} slots, {} occupied, {} collisions, {} off-grid",
        request.day,
        entries.len(),
        assignment.occupied_count(),
        assignment.collisions.len(),
        assignment.off_grid.len()
    );

    AgendaView {
        day: request.day,
        entries,
        collisions: assignment.collisions,
        off_grid: assignment.off_grid.iter().map(|r| r.id.clone()).collect(),
    }
}
