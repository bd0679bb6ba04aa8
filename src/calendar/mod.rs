pub mod holidays;
pub mod provider;

pub use provider::{CalendarProvider, StaticCalendar};
