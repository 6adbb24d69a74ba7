//! Slot grid generation and slot classification.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::ScheduleConfig;

/// A fixed interval in the daily grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Slot {
    /// Slot start (clinic-local time)
    pub start: NaiveDateTime,
    /// Zero-padded clock label, e.g. "09:30"
    pub label: String,
}

impl Slot {
    fn at(day: NaiveDate, minute_of_day: u32) -> Option<Self> {
        let (hour, minute) = (minute_of_day / 60, minute_of_day % 60);
        Some(Self {
            start: day.and_hms_opt(hour, minute, 0)?,
            label: clock_label(hour, minute),
        })
    }

    /// Whether `time` falls on this slot's exact hour and minute.
    pub fn matches(&self, time: NaiveDateTime) -> bool {
        time.date() == self.start.date()
            && time.hour() == self.start.hour()
            && time.minute() == self.start.minute()
    }
}

/// Zero-padded "HH:MM".
pub fn clock_label(hour: u32, minute: u32) -> String {
    format!("{:02}:{:02}", hour, minute)
}

/// Slots of `slot_minutes` from `start_hour:00` up to, not including,
/// `end_hour:00`.
///
/// An empty window or a zero width yields no slots; `end_hour` is capped
/// at midnight.
pub fn generate_slots(day: NaiveDate, start_hour: u32, end_hour: u32, slot_minutes: u32) -> Vec<Slot> {
    let end = end_hour.min(24) * 60;
    let start = start_hour.saturating_mul(60);
    if slot_minutes == 0 || start >= end {
        return Vec::new();
    }

    (start..end)
        .step_by(slot_minutes as usize)
        .filter_map(|minute| Slot::at(day, minute))
        .collect()
}

/// [`generate_slots`] for a configured window.
pub fn generate_slots_for(day: NaiveDate, config: &ScheduleConfig) -> Vec<Slot> {
    generate_slots(day, config.start_hour, config.end_hour, config.slot_minutes)
}

/// Availability of a slot relative to "now".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    /// Slot time has already passed today
    Past,
    /// Open for booking
    Free,
    /// A record is assigned
    Occupied,
}

impl SlotState {
    /// Whether the caller may offer a quick-schedule action.
    pub fn allows_quick_schedule(&self) -> bool {
        matches!(self, SlotState::Free)
    }
}

/// Classify a slot. `Past` only applies when `day` is `now`'s date.
pub fn classify_slot(slot: &Slot, has_record: bool, day: NaiveDate, now: NaiveDateTime) -> SlotState {
    if has_record {
        SlotState::Occupied
    } else if day == now.date() && slot.start < now {
        SlotState::Past
    } else {
        SlotState::Free
    }
}
