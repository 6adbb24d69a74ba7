//! Record category labels.
//!
//! A category is either an opaque descriptor or the structured form
//! `specialty | payment | period | days`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between the parts of a structured category.
pub const CATEGORY_SEPARATOR: &str = " | ";

/// Parsed category of a record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CategoryLabel {
    Structured {
        specialty: String,
        payment: String,
        period: String,
        days: String,
    },
    Opaque { label: String },
}

impl CategoryLabel {
    /// Parse a category string; anything that is not exactly four
    /// non-empty parts is kept as an opaque label.
    pub fn parse(raw: &str) -> Self {
        let parts: Vec<&str> = raw
            .split(CATEGORY_SEPARATOR.trim())
            .map(str::trim)
            .collect();

        match parts.as_slice() {
            [specialty, payment, period, days] if parts.iter().all(|p| !p.is_empty()) => {
                CategoryLabel::Structured {
                    specialty: specialty.to_string(),
                    payment: payment.to_string(),
                    period: period.to_string(),
                    days: days.to_string(),
                }
            }
            _ => CategoryLabel::Opaque {
                label: raw.to_string(),
            },
        }
    }

    /// Payment part of a structured category.
    pub fn payment(&self) -> Option<&str> {
        match self {
            CategoryLabel::Structured { payment, .. } => Some(payment),
            CategoryLabel::Opaque { .. } => None,
        }
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryLabel::Structured {
                specialty,
                payment,
                period,
                days,
            } => write!(
                f,
                "{specialty}{sep}{payment}{sep}{period}{sep}{days}",
                sep = CATEGORY_SEPARATOR
            ),
            CategoryLabel::Opaque { label } => f.write_str(label),
        }
    }
}
