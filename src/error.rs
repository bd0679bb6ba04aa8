/// Centralized error types for the market calendar
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    // Input Errors
    #[error("Invalid instant: {0}")]
    InvalidInstant(String),

    #[error("Unsupported asset class: {0}")]
    UnsupportedAssetClass(String),

    // Calendar Data Errors
    #[error("Scan limit of {limit} days exceeded starting from {start}")]
    ScanLimitExceeded { limit: usize, start: NaiveDate },

    #[error("Local time {local} does not exist in {timezone}")]
    NonexistentLocalTime { local: NaiveDateTime, timezone: String },

    #[error("Invalid calendar data: {0}")]
    InvalidCalendarData(String),

    // Configuration Errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid session time: {0}")]
    InvalidSessionTime(String),

    // Generic Errors
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type Result<T> = std::result::Result<T, CalendarError>;

impl CalendarError {
    /// Errors caused by the calendar data set rather than by the caller's input
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CalendarError::ConfigError(_)
                | CalendarError::InvalidSessionTime(_)
                | CalendarError::InvalidCalendarData(_)
                | CalendarError::ScanLimitExceeded { .. }
                | CalendarError::NonexistentLocalTime { .. }
        )
    }

    /// Get error code for logging
    pub fn error_code(&self) -> &str {
        match self {
            CalendarError::InvalidInstant(_) => "INPUT_001",
            CalendarError::UnsupportedAssetClass(_) => "INPUT_002",
            CalendarError::ScanLimitExceeded { .. } => "CAL_001",
            CalendarError::NonexistentLocalTime { .. } => "CAL_002",
            CalendarError::InvalidCalendarData(_) => "CAL_003",
            CalendarError::ConfigError(_) => "CFG_001",
            CalendarError::InvalidSessionTime(_) => "CFG_002",
            CalendarError::InternalError(_) => "INT_001",
        }
    }
}
