//! Financial sub-record carried inside a record's annotations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment type label for private-pay visits.
pub const PAYMENT_PRIVATE: &str = "private";
/// Payment type label for insurance-covered visits.
pub const PAYMENT_INSURANCE: &str = "insurance";
/// Payment type label for no-charge follow-up visits.
pub const PAYMENT_FOLLOW_UP: &str = "follow_up";

/// Structured payment data. Absent fields are omitted when serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FinancialRecord {
    /// Payment type label (`private`, `insurance`, `follow_up` or free text)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,
    /// Insurer name, only meaningful for insurance payments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_name: Option<String>,
    /// Decimal amount kept as text (e.g. "250.00")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

impl FinancialRecord {
    /// Whether the payment type denotes insurance.
    pub fn is_insurance(&self) -> bool {
        self.payment_type
            .as_deref()
            .map(|t| t.eq_ignore_ascii_case(PAYMENT_INSURANCE))
            .unwrap_or(false)
    }

    /// Parsed amount, if present and a valid decimal.
    pub fn amount_decimal(&self) -> Option<Decimal> {
        self.amount.as_deref()?.trim().parse::<Decimal>().ok()
    }

    /// Trim fields, treat empty strings as absent, drop an amount that is
    /// not a decimal and drop the insurer name unless the payment type is
    /// insurance.
    pub fn normalized(&self) -> Self {
        fn clean(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        let mut normalized = Self {
            payment_type: clean(&self.payment_type),
            insurance_name: clean(&self.insurance_name),
            amount: clean(&self.amount),
        };
        if !normalized.is_insurance() {
            normalized.insurance_name = None;
        }
        if normalized.amount.is_some() && normalized.amount_decimal().is_none() {
            normalized.amount = None;
        }
        normalized
    }

    /// A record is valid when it is already normalized.
    pub fn is_valid(&self) -> bool {
        *self == self.normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_drops_insurer_for_private() {
        let record = FinancialRecord {
            payment_type: Some(PAYMENT_PRIVATE.into()),
            insurance_name: Some("Acme".into()),
            amount: Some(" 120.50 ".into()),
        };
        let normalized = record.normalized();
        assert!(normalized.insurance_name.is_none());
        assert_eq!(normalized.amount.as_deref(), Some("120.50"));
        assert!(!record.is_valid());
        assert!(normalized.is_valid());
    }

    #[test]
    fn test_insurance_keeps_insurer() {
        let record = FinancialRecord {
            payment_type: Some(PAYMENT_INSURANCE.into()),
            insurance_name: Some("Acme".into()),
            amount: Some("250.00".into()),
        };
        assert!(record.is_insurance());
        assert!(record.is_valid());
        assert_eq!(record.amount_decimal(), Some(Decimal::new(25000, 2)));
    }

    #[test]
    fn test_invalid_amount() {
        let record = FinancialRecord {
            payment_type: None,
            insurance_name: None,
            amount: Some("two hundred".into()),
        };
        assert!(record.amount_decimal().is_none());
        assert!(!record.is_valid());
        assert!(record.normalized().amount.is_none());
    }

    #[test]
    fn test_absent_fields_omitted() {
        let record = FinancialRecord {
            payment_type: Some(PAYMENT_FOLLOW_UP.into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"payment_type":"follow_up"}"#);
    }
}
