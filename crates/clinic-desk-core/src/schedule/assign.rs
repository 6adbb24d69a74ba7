//! Record-to-slot assignment.
//!
//! Assignment is exact-minute: a record lands in the slot whose label equals
//! its appointment's hour and minute, never the nearest one. Records that
//! miss every slot are reported as off-grid rather than snapped.

use chrono::NaiveDate;
use serde::Serialize;

use super::Slot;
use crate::models::Record;

/// A slot together with the record assigned to it.
#[derive(Debug, Clone, Serialize)]
pub struct AssignedSlot<'a> {
    pub slot: Slot,
    pub record: Option<&'a Record>,
}

/// A record that lost its slot to an earlier record in input order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SlotCollision {
    /// Label of the contested slot
    pub slot_label: String,
    /// Record that kept the slot
    pub assigned_id: String,
    /// Record left unassigned
    pub displaced_id: String,
}

/// Result of assigning records to a slot grid.
#[derive(Debug, Clone, Serialize)]
pub struct Assignment<'a> {
    /// One entry per input slot, in slot order
    pub slots: Vec<AssignedSlot<'a>>,
    /// Double bookings resolved first-wins
    pub collisions: Vec<SlotCollision>,
    /// Eligible records whose time falls between displayed slots
    pub off_grid: Vec<&'a Record>,
}

impl Assignment<'_> {
    /// Number of slots holding a record.
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.record.is_some()).count()
    }
}

/// Whether a record belongs on `day`'s agenda for the selected practitioner.
pub fn is_eligible(record: &Record, day: NaiveDate, practitioner: Option<&str>) -> bool {
    let Some(time) = record.appointment_time else {
        return false;
    };
    if time.date() != day {
        return false;
    }
    match practitioner {
        Some(p) => record.is_with_practitioner(p),
        None => true,
    }
}

/// Assign eligible records to `slots`.
///
/// At most one record per slot. On a collision the first record in input
/// order keeps the slot and the rest are listed in
/// [`Assignment::collisions`]; nothing is dropped silently.
pub fn assign_records<'a>(
    slots: Vec<Slot>,
    records: &'a [Record],
    day: NaiveDate,
    practitioner: Option<&str>,
) -> Assignment<'a> {
    let mut assigned: Vec<AssignedSlot<'a>> = slots
        .into_iter()
        .map(|slot| AssignedSlot { slot, record: None })
        .collect();
    let mut collisions = Vec::new();
    let mut off_grid = Vec::new();

    for record in records.iter().filter(|r| is_eligible(r, day, practitioner)) {
        let Some(time) = record.appointment_time else {
            continue;
        };

        let Some(entry) = assigned.iter_mut().find(|a| a.slot.matches(time)) else {
            log::warn!(
                "Record {} at {} falls between displayed slots",
                record.id,
                time.format("%H:%M")
            );
            off_grid.push(record);
            continue;
        };

        match entry.record {
            None => entry.record = Some(record),
            Some(existing) => {
                log::warn!(
                    "Slot {} double-booked: keeping {}, displacing {}",
                    entry.slot.label,
                    existing.id,
                    record.id
                );
                collisions.push(SlotCollision {
                    slot_label: entry.slot.label.clone(),
                    assigned_id: existing.id.clone(),
                    displaced_id: record.id.clone(),
                });
            }
        }
    }

    Assignment {
        slots: assigned,
        collisions,
        off_grid,
    }
}
