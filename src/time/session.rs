/// Market session times and reference-timezone handling
use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

use crate::error::{CalendarError, Result};

/// Wall-clock session boundaries, anchored to a reference timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimes {
    pub timezone: Tz,
    pub equity_open: NaiveTime,
    pub equity_close: NaiveTime,
    pub equity_early_close: NaiveTime,
    /// FX/metal sessions close Friday and reopen Sunday at this time
    pub fx_metal_boundary: NaiveTime,
}

impl Default for SessionTimes {
    fn default() -> Self {
        SessionTimes {
            timezone: chrono_tz::America::New_York,
            equity_open: hm(9, 30),
            equity_close: hm(16, 0),
            equity_early_close: hm(13, 0),
            fx_metal_boundary: hm(17, 0),
        }
    }
}

impl SessionTimes {
    /// Equity open must precede close; early close falls in `(open, close]`
    pub fn validate(&self) -> Result<()> {
        if self.equity_open >= self.equity_close {
            return Err(CalendarError::InvalidSessionTime(format!(
                "equity_open {} must be before equity_close {}",
                self.equity_open, self.equity_close
            )));
        }

        if self.equity_early_close <= self.equity_open || self.equity_early_close > self.equity_close {
            return Err(CalendarError::InvalidSessionTime(format!(
                "equity_early_close {} must fall after equity_open and no later than equity_close",
                self.equity_early_close
            )));
        }

        Ok(())
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("hardcoded session time is valid")
}

/// Convert an instant into wall-clock time in the reference timezone.
///
/// Every public query goes through here exactly once before any rule is
/// evaluated.
pub fn to_reference_local<T: TimeZone>(instant: &DateTime<T>, timezone: Tz) -> NaiveDateTime {
    instant.with_timezone(&timezone).naive_local()
}

/// Resolve a reference-timezone wall-clock time back to UTC.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant.
pub fn resolve_local(local: NaiveDateTime, timezone: Tz) -> Result<DateTime<Utc>> {
    match timezone.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(CalendarError::NonexistentLocalTime {
            local,
            timezone: timezone.name().to_string(),
        }),
    }
}

/// Check if a date falls Monday to Friday (doesn't check holidays)
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_default_session_times() {
        let sessions = SessionTimes::default();
        assert_eq!(sessions.timezone, chrono_tz::America::New_York);
        assert_eq!(sessions.equity_open, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(sessions.equity_close, NaiveTime::from_hms_opt(16, 0, 0).unwrap());
        assert_eq!(sessions.equity_early_close, NaiveTime::from_hms_opt(13, 0, 0).unwrap());
        assert_eq!(sessions.fx_metal_boundary, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
    }

    #[test]
    fn test_session_window_validation() {
        assert!(SessionTimes::default().validate().is_ok());

        let inverted = SessionTimes {
            equity_open: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            equity_close: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            ..SessionTimes::default()
        };
        assert!(matches!(inverted.validate(), Err(CalendarError::InvalidSessionTime(_))));

        let late_early_close = SessionTimes {
            equity_early_close: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            ..SessionTimes::default()
        };
        assert!(late_early_close.validate().is_err());

        let early_close_at_open = SessionTimes {
            equity_early_close: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            ..SessionTimes::default()
        };
        assert!(early_close_at_open.validate().is_err());
    }

    #[test]
    fn test_to_reference_local_normalizes_offsets() {
        let tz = chrono_tz::America::New_York;

        // Same instant expressed with different offsets
        let a = FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2023, 7, 3, 10, 0, 0)
            .unwrap();
        let b = Utc.with_ymd_and_hms(2023, 7, 3, 15, 0, 0).unwrap();

        let expected = NaiveDate::from_ymd_opt(2023, 7, 3)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap();
        assert_eq!(to_reference_local(&a, tz), expected);
        assert_eq!(to_reference_local(&b, tz), expected);
    }

    #[test]
    fn test_resolve_local_across_dst() {
        let tz = chrono_tz::America::New_York;
        let winter = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap().and_hms_opt(9, 30, 0).unwrap();
        let summer = NaiveDate::from_ymd_opt(2023, 6, 12).unwrap().and_hms_opt(9, 30, 0).unwrap();

        assert_eq!(
            resolve_local(winter, tz).unwrap(),
            Utc.with_ymd_and_hms(2023, 1, 9, 14, 30, 0).unwrap()
        );
        assert_eq!(
            resolve_local(summer, tz).unwrap(),
            Utc.with_ymd_and_hms(2023, 6, 12, 13, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_resolve_local_in_dst_gap() {
        let tz = chrono_tz::America::New_York;
        let gap = NaiveDate::from_ymd_opt(2023, 3, 12).unwrap().and_hms_opt(2, 30, 0).unwrap();
        let err = resolve_local(gap, tz).unwrap_err();
        assert!(matches!(err, CalendarError::NonexistentLocalTime { .. }));
    }

    #[test]
    fn test_weekday() {
        let fri = NaiveDate::from_ymd_opt(2023, 6, 16).unwrap();
        let sat = NaiveDate::from_ymd_opt(2023, 6, 17).unwrap();
        let sun = NaiveDate::from_ymd_opt(2023, 6, 18).unwrap();
        assert!(is_weekday(fri));
        assert!(!is_weekday(sat));
        assert!(!is_weekday(sun));
    }
}
