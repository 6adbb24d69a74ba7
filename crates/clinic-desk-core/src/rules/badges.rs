//! Badge computation for record cards.

use serde::{Deserialize, Serialize};

use crate::models::{
    CategoryLabel, FinancialRecord, Outcome, Record, RecordStatus, PAYMENT_FOLLOW_UP,
    PAYMENT_INSURANCE, PAYMENT_PRIVATE,
};

/// What a badge indicates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    /// Payment type of the visit
    PaymentType,
    Attended,
    NoShow,
    Cancelled,
    Rescheduled,
    /// Outcome value outside the known vocabulary
    Unknown,
}

/// Color family for a badge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Success,
    Danger,
    Warning,
    Info,
    Neutral,
}

/// A small status-derived indicator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Badge {
    pub kind: BadgeKind,
    /// Display label
    pub label: String,
    /// Icon identifier
    pub icon: String,
    pub tone: BadgeTone,
}

impl Badge {
    fn new(kind: BadgeKind, label: &str, icon: &str, tone: BadgeTone) -> Self {
        Self {
            kind,
            label: label.to_string(),
            icon: icon.to_string(),
            tone,
        }
    }
}

/// Legal outcome badges for a (status, outcome) pair.
///
/// Terminal outcomes (attended, no-show, cancelled) only show once the
/// record is finished; a reschedule only shows while the record is active.
/// Anything else is suppressed, not erased: the outcome stays on the record.
pub fn compute_badges(status: RecordStatus, outcome: Option<&Outcome>) -> Vec<Badge> {
    use RecordStatus::*;

    let Some(outcome) = outcome else {
        return Vec::new();
    };

    let badge = match (status, outcome) {
        (Finished, Outcome::Attended) => Some(Badge::new(
            BadgeKind::Attended,
            "Attended",
            "check-circle",
            BadgeTone::Success,
        )),
        (Finished, Outcome::NoShow) => Some(Badge::new(
            BadgeKind::NoShow,
            "No-show",
            "user-x",
            BadgeTone::Danger,
        )),
        (Finished, Outcome::Cancelled) => Some(Badge::new(
            BadgeKind::Cancelled,
            "Cancelled",
            "x-circle",
            BadgeTone::Neutral,
        )),
        (New | InProgress | Scheduled, Outcome::Attended | Outcome::NoShow | Outcome::Cancelled) => {
            None
        }
        (InProgress | Scheduled, Outcome::Rescheduled) => Some(Badge::new(
            BadgeKind::Rescheduled,
            "Rescheduled",
            "calendar-clock",
            BadgeTone::Warning,
        )),
        (New | Finished, Outcome::Rescheduled) => None,
        (InProgress | Scheduled | Finished, Outcome::Unknown(_)) => Some(Badge::new(
            BadgeKind::Unknown,
            "Unknown",
            "help-circle",
            BadgeTone::Neutral,
        )),
        (New, Outcome::Unknown(_)) => None,
    };

    badge.into_iter().collect()
}

/// Payment-type badge for a label, if the label is non-empty.
pub fn payment_type_badge(payment_type: &str) -> Option<Badge> {
    let payment_type = payment_type.trim();
    if payment_type.is_empty() {
        return None;
    }

    let (label, icon, tone) = match payment_type.to_ascii_lowercase().as_str() {
        PAYMENT_PRIVATE => ("Private", "wallet", BadgeTone::Info),
        PAYMENT_INSURANCE => ("Insurance", "shield", BadgeTone::Info),
        PAYMENT_FOLLOW_UP => ("Follow-up", "repeat", BadgeTone::Neutral),
        _ => (payment_type, "tag", BadgeTone::Neutral),
    };
    Some(Badge::new(BadgeKind::PaymentType, label, icon, tone))
}

/// Ordered badges for a record card: payment type first, then the legal
/// outcome badge.
///
/// The payment type comes from the decoded financial sub-record and falls
/// back to the payment part of a structured category.
pub fn record_badges(record: &Record, financial: Option<&FinancialRecord>) -> Vec<Badge> {
    let category = CategoryLabel::parse(&record.category);
    let payment_type = financial
        .and_then(|f| f.payment_type.as_deref())
        .or_else(|| category.payment());

    payment_type
        .and_then(payment_type_badge)
        .into_iter()
        .chain(compute_badges(record.status, record.outcome.as_ref()))
        .collect()
}
