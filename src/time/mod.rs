pub mod evaluator;
pub mod session;

pub use evaluator::{default_calendar, get_next_market_close, get_next_market_open, is_market_open, MarketCalendar};
pub use session::SessionTimes;
