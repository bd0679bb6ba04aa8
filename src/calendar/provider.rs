/// Calendar data providers
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;

use super::holidays;
use crate::config::session_times;
use crate::error::{CalendarError, Result};
use crate::time::session::{is_weekday, SessionTimes};
use crate::types::CalendarConfig;

/// Source of session times and holiday dates consulted by the evaluator
pub trait CalendarProvider: Send + Sync {
    fn sessions(&self) -> &SessionTimes;

    /// Equity market closed all day
    fn is_equity_holiday(&self, date: NaiveDate) -> bool;

    /// Equity market closes at the early-close time
    fn is_equity_early_close(&self, date: NaiveDate) -> bool;

    /// FX and metal markets closed all day
    fn is_fx_metal_holiday(&self, date: NaiveDate) -> bool;

    /// Last date the holiday data is known to cover
    fn coverage_end(&self) -> Option<NaiveDate> {
        None
    }

    /// Weekday that is not a full equity holiday (early-close days trade)
    fn is_equity_trading_day(&self, date: NaiveDate) -> bool {
        is_weekday(date) && !self.is_equity_holiday(date)
    }
}

/// In-memory calendar built from fixed holiday lists
#[derive(Debug, Clone)]
pub struct StaticCalendar {
    sessions: SessionTimes,
    equity_holidays: HashSet<NaiveDate>,
    equity_early_closes: HashSet<NaiveDate>,
    fx_metal_holidays: HashSet<NaiveDate>,
}

impl StaticCalendar {
    /// Calendar with the given session times and no holidays
    pub fn new(sessions: SessionTimes) -> Self {
        StaticCalendar {
            sessions,
            equity_holidays: HashSet::new(),
            equity_early_closes: HashSet::new(),
            fx_metal_holidays: HashSet::new(),
        }
    }

    /// Default session times with the compiled-in holiday lists
    pub fn builtin() -> Self {
        StaticCalendar {
            sessions: SessionTimes::default(),
            equity_holidays: holidays::equity_holidays(),
            equity_early_closes: holidays::equity_early_closes(),
            fx_metal_holidays: holidays::fx_metal_holidays(),
        }
    }

    /// Build from a loaded configuration. Lists absent from the file fall
    /// back to the compiled-in ones.
    pub fn from_config(config: &CalendarConfig) -> Result<Self> {
        let sessions = session_times(&config.sessions)?;

        let equity_holidays = match &config.holidays.equity {
            Some(dates) => dates.iter().copied().collect(),
            None => holidays::equity_holidays(),
        };
        let equity_early_closes = match &config.holidays.equity_early_close {
            Some(dates) => dates.iter().copied().collect(),
            None => holidays::equity_early_closes(),
        };
        let fx_metal_holidays = match &config.holidays.fx_metal {
            Some(dates) => dates.iter().copied().collect(),
            None => holidays::fx_metal_holidays(),
        };

        let calendar = StaticCalendar {
            sessions,
            equity_holidays,
            equity_early_closes,
            fx_metal_holidays,
        };
        calendar.validate()?;
        Ok(calendar)
    }

    pub fn with_equity_holidays<I: IntoIterator<Item = NaiveDate>>(mut self, dates: I) -> Self {
        self.equity_holidays.extend(dates);
        self
    }

    pub fn with_equity_early_closes<I: IntoIterator<Item = NaiveDate>>(mut self, dates: I) -> Self {
        self.equity_early_closes.extend(dates);
        self
    }

    pub fn with_fx_metal_holidays<I: IntoIterator<Item = NaiveDate>>(mut self, dates: I) -> Self {
        self.fx_metal_holidays.extend(dates);
        self
    }

    /// Session window must be well formed, and a date may not be both a
    /// full holiday and an early close
    pub fn validate(&self) -> Result<()> {
        self.sessions.validate()?;

        let mut overlap: Vec<NaiveDate> = self
            .equity_holidays
            .intersection(&self.equity_early_closes)
            .copied()
            .collect();
        if !overlap.is_empty() {
            overlap.sort();
            return Err(CalendarError::InvalidCalendarData(format!(
                "dates listed as both equity holiday and early close: {:?}",
                overlap
            )));
        }
        Ok(())
    }
}

impl Default for StaticCalendar {
    fn default() -> Self {
        StaticCalendar::builtin()
    }
}

impl CalendarProvider for StaticCalendar {
    fn sessions(&self) -> &SessionTimes {
        &self.sessions
    }

    fn is_equity_holiday(&self, date: NaiveDate) -> bool {
        self.equity_holidays.contains(&date)
    }

    fn is_equity_early_close(&self, date: NaiveDate) -> bool {
        self.equity_early_closes.contains(&date)
    }

    fn is_fx_metal_holiday(&self, date: NaiveDate) -> bool {
        self.fx_metal_holidays.contains(&date)
    }

    /// December 31st of the latest year that has any holiday listed
    fn coverage_end(&self) -> Option<NaiveDate> {
        self.equity_holidays
            .iter()
            .chain(self.equity_early_closes.iter())
            .chain(self.fx_metal_holidays.iter())
            .map(|d| d.year())
            .max()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 12, 31))
    }
}
