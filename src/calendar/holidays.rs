/// Built-in holiday calendars (update annually)
use chrono::NaiveDate;
use std::collections::HashSet;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("hardcoded holiday date is valid")
}

/// NYSE full-day closures, 2023 to 2026
/// From https://www.nyse.com/markets/hours-calendars
pub fn equity_holidays() -> HashSet<NaiveDate> {
    let mut holidays = HashSet::new();

    // 2023
    holidays.insert(date(2023, 1, 2)); // New Year's Day (observed)
    holidays.insert(date(2023, 1, 16)); // Martin Luther King Jr. Day
    holidays.insert(date(2023, 2, 20)); // Washington's Birthday
    holidays.insert(date(2023, 4, 7)); // Good Friday
    holidays.insert(date(2023, 5, 29)); // Memorial Day
    holidays.insert(date(2023, 6, 19)); // Juneteenth
    holidays.insert(date(2023, 7, 4)); // Independence Day
    holidays.insert(date(2023, 9, 4)); // Labor Day
    holidays.insert(date(2023, 11, 23)); // Thanksgiving Day
    holidays.insert(date(2023, 12, 25)); // Christmas Day

    // 2024
    holidays.insert(date(2024, 1, 1)); // New Year's Day
    holidays.insert(date(2024, 1, 15)); // Martin Luther King Jr. Day
    holidays.insert(date(2024, 2, 19)); // Washington's Birthday
    holidays.insert(date(2024, 3, 29)); // Good Friday
    holidays.insert(date(2024, 5, 27)); // Memorial Day
    holidays.insert(date(2024, 6, 19)); // Juneteenth
    holidays.insert(date(2024, 7, 4)); // Independence Day
    holidays.insert(date(2024, 9, 2)); // Labor Day
    holidays.insert(date(2024, 11, 28)); // Thanksgiving Day
    holidays.insert(date(2024, 12, 25)); // Christmas Day

    // 2025
    holidays.insert(date(2025, 1, 1)); // New Year's Day
    holidays.insert(date(2025, 1, 9)); // National Day of Mourning
    holidays.insert(date(2025, 1, 20)); // Martin Luther King Jr. Day
    holidays.insert(date(2025, 2, 17)); // Washington's Birthday
    holidays.insert(date(2025, 4, 18)); // Good Friday
    holidays.insert(date(2025, 5, 26)); // Memorial Day
    holidays.insert(date(2025, 6, 19)); // Juneteenth
    holidays.insert(date(2025, 7, 4)); // Independence Day
    holidays.insert(date(2025, 9, 1)); // Labor Day
    holidays.insert(date(2025, 11, 27)); // Thanksgiving Day
    holidays.insert(date(2025, 12, 25)); // Christmas Day

    // 2026
    holidays.insert(date(2026, 1, 1)); // New Year's Day
    holidays.insert(date(2026, 1, 19)); // Martin Luther King Jr. Day
    holidays.insert(date(2026, 2, 16)); // Washington's Birthday
    holidays.insert(date(2026, 4, 3)); // Good Friday
    holidays.insert(date(2026, 5, 25)); // Memorial Day
    holidays.insert(date(2026, 6, 19)); // Juneteenth
    holidays.insert(date(2026, 7, 3)); // Independence Day (observed)
    holidays.insert(date(2026, 9, 7)); // Labor Day
    holidays.insert(date(2026, 11, 26)); // Thanksgiving Day
    holidays.insert(date(2026, 12, 25)); // Christmas Day

    holidays
}

/// NYSE early closes (13:00 Eastern), 2023 to 2026
pub fn equity_early_closes() -> HashSet<NaiveDate> {
    let mut days = HashSet::new();

    days.insert(date(2023, 7, 3));
    days.insert(date(2023, 11, 24));

    days.insert(date(2024, 7, 3));
    days.insert(date(2024, 11, 29));
    days.insert(date(2024, 12, 24));

    days.insert(date(2025, 7, 3));
    days.insert(date(2025, 11, 28));
    days.insert(date(2025, 12, 24));

    days.insert(date(2026, 11, 27));
    days.insert(date(2026, 12, 24));

    days
}

/// FX and metal closures, 2023 to 2026
/// From https://www.cboe.com/about/hours/fx/
pub fn fx_metal_holidays() -> HashSet<NaiveDate> {
    let mut holidays = HashSet::new();

    for year in 2023..=2026 {
        holidays.insert(date(year, 1, 1)); // New Year's Day
        holidays.insert(date(year, 12, 25)); // Christmas Day
    }

    holidays
}
