//! Market open/close evaluation.
//!
//! [`MarketCalendar`] answers three questions for an asset class at an
//! instant: is the market open, when does it next open, and when does it next
//! close. Rules are read from a [`CalendarProvider`]; every query converts the
//! instant to the provider's reference timezone once and then works purely on
//! wall-clock date and time.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Days, NaiveDateTime, TimeZone, Utc, Weekday};
use tracing::{debug, warn};

use super::session::{is_weekday, resolve_local, to_reference_local, SessionTimes};
use crate::calendar::{CalendarProvider, StaticCalendar};
use crate::error::{CalendarError, Result};
use crate::types::{AssetClass, CalendarConfig, MarketStatus, SessionKind, DEFAULT_SCAN_LIMIT};
use crate::utils::time::format_utc_timestamp;

/// Trading-hours evaluator over a calendar data provider
#[derive(Debug, Clone)]
pub struct MarketCalendar<P: CalendarProvider = StaticCalendar> {
    provider: P,
    scan_limit: usize,
    strict_asset_classes: bool,
}

impl MarketCalendar<StaticCalendar> {
    /// Evaluator over the compiled-in calendar
    pub fn builtin() -> Self {
        MarketCalendar::new(StaticCalendar::builtin())
    }

    pub fn from_config(config: &CalendarConfig) -> Result<Self> {
        if config.evaluator.scan_limit == 0 {
            return Err(CalendarError::ConfigError("scan_limit must be > 0".to_string()));
        }
        let provider = StaticCalendar::from_config(config)?;
        Ok(MarketCalendar::new(provider)
            .with_scan_limit(config.evaluator.scan_limit)
            .with_strict_asset_classes(config.evaluator.strict_asset_classes))
    }
}

impl Default for MarketCalendar<StaticCalendar> {
    fn default() -> Self {
        MarketCalendar::builtin()
    }
}

impl<P: CalendarProvider> MarketCalendar<P> {
    pub fn new(provider: P) -> Self {
        MarketCalendar {
            provider,
            scan_limit: DEFAULT_SCAN_LIMIT,
            strict_asset_classes: false,
        }
    }

    pub fn with_scan_limit(mut self, scan_limit: usize) -> Self {
        self.scan_limit = scan_limit;
        self
    }

    /// When strict, unrecognized asset classes are an error instead of
    /// always open
    pub fn with_strict_asset_classes(mut self, strict: bool) -> Self {
        self.strict_asset_classes = strict;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn scan_limit(&self) -> usize {
        self.scan_limit
    }

    fn sessions(&self) -> &SessionTimes {
        self.provider.sessions()
    }

    /// Check if the market for `asset` is open at `instant`
    pub fn is_market_open<T: TimeZone>(&self, asset: &AssetClass, instant: &DateTime<T>) -> Result<bool> {
        self.check_asset_class(asset)?;
        Ok(self.is_open_at(asset, instant))
    }

    /// Next instant at which the market opens. `None` for markets that never
    /// close.
    pub fn next_market_open<T: TimeZone>(
        &self,
        asset: &AssetClass,
        instant: &DateTime<T>,
    ) -> Result<Option<DateTime<Utc>>> {
        self.check_asset_class(asset)?;
        let local = self.normalize(instant);
        self.next_open_local(asset, local)?
            .map(|next| resolve_local(next, self.sessions().timezone))
            .transpose()
    }

    /// Next instant at which the market closes. `None` for markets that never
    /// close.
    pub fn next_market_close<T: TimeZone>(
        &self,
        asset: &AssetClass,
        instant: &DateTime<T>,
    ) -> Result<Option<DateTime<Utc>>> {
        self.check_asset_class(asset)?;
        let local = self.normalize(instant);
        self.next_close_local(asset, local)?
            .map(|next| resolve_local(next, self.sessions().timezone))
            .transpose()
    }

    /// [`next_market_open`](Self::next_market_open) as `YYYY-MM-DDTHH:MM:SSZ`
    pub fn get_next_market_open<T: TimeZone>(
        &self,
        asset: &AssetClass,
        instant: &DateTime<T>,
    ) -> Result<Option<String>> {
        Ok(self
            .next_market_open(asset, instant)?
            .map(|next| format_utc_timestamp(&next)))
    }

    /// [`next_market_close`](Self::next_market_close) as `YYYY-MM-DDTHH:MM:SSZ`
    pub fn get_next_market_close<T: TimeZone>(
        &self,
        asset: &AssetClass,
        instant: &DateTime<T>,
    ) -> Result<Option<String>> {
        Ok(self
            .next_market_close(asset, instant)?
            .map(|next| format_utc_timestamp(&next)))
    }

    /// Open flag plus both upcoming events
    pub fn status<T: TimeZone>(&self, asset: &AssetClass, instant: &DateTime<T>) -> Result<MarketStatus> {
        self.check_asset_class(asset)?;
        let local = self.normalize(instant);

        Ok(MarketStatus {
            asset_class: asset.clone(),
            as_of: format_utc_timestamp(&instant.with_timezone(&Utc)),
            is_open: self.is_open_local(asset, local),
            next_open: self.format_local(self.next_open_local(asset, local)?)?,
            next_close: self.format_local(self.next_close_local(asset, local)?)?,
        })
    }

    fn format_local(&self, local: Option<NaiveDateTime>) -> Result<Option<String>> {
        local
            .map(|next| resolve_local(next, self.sessions().timezone).map(|utc| format_utc_timestamp(&utc)))
            .transpose()
    }

    fn check_asset_class(&self, asset: &AssetClass) -> Result<()> {
        if !asset.is_recognized() && self.strict_asset_classes {
            return Err(CalendarError::UnsupportedAssetClass(asset.to_string()));
        }
        self.warn_if_unrecognized(asset);
        Ok(())
    }

    pub(crate) fn warn_if_unrecognized(&self, asset: &AssetClass) {
        if !asset.is_recognized() {
            warn!("Unrecognized asset class '{}' treated as always open", asset);
        }
    }

    pub(crate) fn is_open_at<T: TimeZone>(&self, asset: &AssetClass, instant: &DateTime<T>) -> bool {
        let local = self.normalize(instant);
        self.is_open_local(asset, local)
    }

    fn normalize<T: TimeZone>(&self, instant: &DateTime<T>) -> NaiveDateTime {
        let local = to_reference_local(instant, self.sessions().timezone);
        if let Some(end) = self.provider.coverage_end() {
            if local.date() > end {
                warn!(
                    "{} is past the holiday data, which ends {}; holidays are not applied",
                    local.date(),
                    end
                );
            }
        }
        local
    }

    fn is_open_local(&self, asset: &AssetClass, local: NaiveDateTime) -> bool {
        let sessions = self.sessions();
        let (date, time) = (local.date(), local.time());

        match asset.session_kind() {
            SessionKind::Equity => {
                if self.provider.is_equity_early_close(date) {
                    return time >= sessions.equity_open && time < sessions.equity_early_close;
                }
                if self.provider.is_equity_holiday(date) {
                    return false;
                }
                is_weekday(date) && time >= sessions.equity_open && time < sessions.equity_close
            }
            SessionKind::FxMetal => {
                if self.provider.is_fx_metal_holiday(date) {
                    return false;
                }
                let boundary = sessions.fx_metal_boundary;
                match date.weekday() {
                    Weekday::Fri => time < boundary,
                    Weekday::Sat => false,
                    Weekday::Sun => time >= boundary,
                    _ => true,
                }
            }
            SessionKind::Continuous => true,
        }
    }

    fn next_open_local(&self, asset: &AssetClass, local: NaiveDateTime) -> Result<Option<NaiveDateTime>> {
        let sessions = self.sessions();
        let time = local.time();

        let candidate = match asset.session_kind() {
            SessionKind::Equity => {
                let today = local.date().and_time(sessions.equity_open);
                if time < sessions.equity_open {
                    today
                } else {
                    next_day(today)?
                }
            }
            SessionKind::FxMetal => {
                let today = local.date().and_time(sessions.fx_metal_boundary);
                if time < sessions.fx_metal_boundary {
                    today
                } else {
                    // Skip past the session that is currently running
                    self.step_while(today, |c| self.is_open_local(asset, c))?
                }
            }
            SessionKind::Continuous => return Ok(None),
        };

        self.step_while(candidate, |c| !self.is_open_local(asset, c))
            .map(Some)
    }

    fn next_close_local(&self, asset: &AssetClass, local: NaiveDateTime) -> Result<Option<NaiveDateTime>> {
        let sessions = self.sessions();
        let (date, time) = (local.date(), local.time());

        match asset.session_kind() {
            SessionKind::Equity => {
                let candidate = if self.provider.is_equity_early_close(date) {
                    if time < sessions.equity_early_close {
                        date.and_time(sessions.equity_early_close)
                    } else {
                        next_day(date.and_time(sessions.equity_close))?
                    }
                } else if self.provider.is_equity_holiday(date) {
                    match self.next_open_local(asset, next_day(local)?)? {
                        Some(open) => open.date().and_time(sessions.equity_close),
                        None => return Ok(None),
                    }
                } else {
                    let today = date.and_time(sessions.equity_close);
                    if time >= sessions.equity_close {
                        next_day(today)?
                    } else {
                        today
                    }
                };

                self.step_while(candidate, |c| !self.provider.is_equity_trading_day(c.date()))
                    .map(Some)
            }
            SessionKind::FxMetal => {
                let start = date.and_time(sessions.fx_metal_boundary);
                let reopen = self.step_while(start, |c| !self.is_open_local(asset, c))?;
                self.step_while(reopen, |c| self.is_open_local(asset, c))
                    .map(Some)
            }
            SessionKind::Continuous => Ok(None),
        }
    }

    /// Advance `start` one day at a time, keeping the time of day, while
    /// `keep_going` holds. Fails after `scan_limit` steps.
    fn step_while<F>(&self, start: NaiveDateTime, mut keep_going: F) -> Result<NaiveDateTime>
    where
        F: FnMut(NaiveDateTime) -> bool,
    {
        let mut candidate = start;
        let mut steps = 0;

        while keep_going(candidate) {
            if steps >= self.scan_limit {
                return Err(CalendarError::ScanLimitExceeded {
                    limit: self.scan_limit,
                    start: start.date(),
                });
            }
            candidate = next_day(candidate)?;
            steps += 1;
        }

        if steps > 0 {
            debug!("Stepped {} day(s) from {} to {}", steps, start, candidate);
        }
        Ok(candidate)
    }
}

fn next_day(local: NaiveDateTime) -> Result<NaiveDateTime> {
    local
        .checked_add_days(Days::new(1))
        .ok_or_else(|| CalendarError::InternalError(format!("date overflow after {}", local)))
}

/// Shared evaluator over the compiled-in calendar
pub fn default_calendar() -> &'static MarketCalendar {
    static CALENDAR: OnceLock<MarketCalendar> = OnceLock::new();
    CALENDAR.get_or_init(MarketCalendar::builtin)
}

/// Check if the market for an asset class tag is open at `instant`.
///
/// Unrecognized tags are treated as always open.
pub fn is_market_open<T: TimeZone>(asset_class: &str, instant: &DateTime<T>) -> bool {
    let asset = AssetClass::from(asset_class);
    let calendar = default_calendar();
    calendar.warn_if_unrecognized(&asset);
    calendar.is_open_at(&asset, instant)
}

/// Next market open as `YYYY-MM-DDTHH:MM:SSZ`, or `None` for markets that
/// never close
pub fn get_next_market_open<T: TimeZone>(asset_class: &str, instant: &DateTime<T>) -> Result<Option<String>> {
    default_calendar().get_next_market_open(&AssetClass::from(asset_class), instant)
}

/// Next market close as `YYYY-MM-DDTHH:MM:SSZ`, or `None` for markets that
/// never close
pub fn get_next_market_close<T: TimeZone>(asset_class: &str, instant: &DateTime<T>) -> Result<Option<String>> {
    default_calendar().get_next_market_close(&AssetClass::from(asset_class), instant)
}
