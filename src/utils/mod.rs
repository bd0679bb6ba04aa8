pub mod time;

pub use time::{format_utc_timestamp, parse_instant};
