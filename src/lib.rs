pub mod types;
pub mod error;
pub mod calendar;
pub mod config;
pub mod time;
pub mod utils;

pub use types::*;
pub use error::{CalendarError, Result};
pub use calendar::{CalendarProvider, StaticCalendar};
pub use time::{get_next_market_close, get_next_market_open, is_market_open, MarketCalendar, SessionTimes};
