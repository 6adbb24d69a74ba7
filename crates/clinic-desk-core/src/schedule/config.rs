//! Agenda window configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid window: {0}")]
    InvalidWindow(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Opening hours and slot width of the daily agenda.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScheduleConfig {
    /// First hour shown (inclusive)
    pub start_hour: u32,
    /// Closing hour (exclusive)
    pub end_hour: u32,
    /// Width of each slot in minutes
    pub slot_minutes: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            start_hour: 7,
            end_hour: 20,
            slot_minutes: 30,
        }
    }
}

impl ScheduleConfig {
    /// Parse and validate a JSON config; missing fields take defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the window describes a non-empty grid within one day.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.slot_minutes == 0 {
            return Err(ConfigError::InvalidWindow("slot_minutes must be positive".into()));
        }
        if self.end_hour > 24 {
            return Err(ConfigError::InvalidWindow(format!(
                "end_hour {} is past midnight",
                self.end_hour
            )));
        }
        if self.start_hour >= self.end_hour {
            return Err(ConfigError::InvalidWindow(format!(
                "start_hour {} is not before end_hour {}",
                self.start_hour, self.end_hour
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let config = ScheduleConfig::default();
        assert_eq!((config.start_hour, config.end_hour, config.slot_minutes), (7, 20, 30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = ScheduleConfig::from_json_str(r#"{"slot_minutes": 15}"#).unwrap();
        assert_eq!(config.start_hour, 7);
        assert_eq!(config.slot_minutes, 15);
    }

    #[test]
    fn test_from_json_rejects_bad_window() {
        assert!(matches!(
            ScheduleConfig::from_json_str(r#"{"start_hour": 20, "end_hour": 8}"#),
            Err(ConfigError::InvalidWindow(_))
        ));
        assert!(matches!(
            ScheduleConfig::from_json_str(r#"{"slot_minutes": 0}"#),
            Err(ConfigError::InvalidWindow(_))
        ));
        assert!(matches!(
            ScheduleConfig::from_json_str(r#"{"end_hour": 25}"#),
            Err(ConfigError::InvalidWindow(_))
        ));
        assert!(matches!(
            ScheduleConfig::from_json_str("not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
