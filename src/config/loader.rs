/// Calendar configuration loading from TOML file
use std::path::Path;

use chrono_tz::Tz;
use tracing::info;

use crate::error::{CalendarError, Result};
use crate::time::evaluator::MarketCalendar;
use crate::time::session::SessionTimes;
use crate::types::{CalendarConfig, SessionConfig};
use crate::utils::time::parse_session_time;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CalendarConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| CalendarError::ConfigError(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&content)?;
    info!("Calendar configuration loaded from {}", path.display());

    Ok(config)
}

pub fn parse_config(content: &str) -> Result<CalendarConfig> {
    let config: CalendarConfig = toml::from_str(content)
        .map_err(|e| CalendarError::ConfigError(format!("Failed to parse config: {}", e)))?;

    // Validate config
    validate_config(&config)?;

    Ok(config)
}

/// Parse the textual session settings into session times
pub fn session_times(config: &SessionConfig) -> Result<SessionTimes> {
    let timezone: Tz = config.timezone.parse().map_err(|e| {
        CalendarError::ConfigError(format!("Unknown timezone {}: {}", config.timezone, e))
    })?;

    Ok(SessionTimes {
        timezone,
        equity_open: parse_session_time(&config.equity_open)?,
        equity_close: parse_session_time(&config.equity_close)?,
        equity_early_close: parse_session_time(&config.equity_early_close)?,
        fx_metal_boundary: parse_session_time(&config.fx_metal_boundary)?,
    })
}

/// Validate by building the calendar the config describes
fn validate_config(config: &CalendarConfig) -> Result<()> {
    MarketCalendar::from_config(config)?;
    Ok(())
}
