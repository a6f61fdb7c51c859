//! Calendar-day arithmetic.
//!
//! All engine dates are `NaiveDate`s: the time of day is stripped before a value enters the engine,
//! so comparisons and differences are always whole days.

use chrono::{Local, Months, NaiveDate, NaiveDateTime, TimeDelta};

/// Length of one calendar day. The range partitioner's gap-merge pass compares against it.
pub const ONE_DAY: TimeDelta = TimeDelta::days(1);

/// Drop the time of day, keeping the calendar date.
pub fn strip_time(datetime: NaiveDateTime) -> NaiveDate {
    datetime.date()
}

/// Add `days` calendar days (negative values subtract).
///
/// Saturates at `NaiveDate::MIN`/`NaiveDate::MAX` instead of panicking.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    TimeDelta::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Add `months` calendar months, clamping the day to the end of shorter months.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let magnitude = Months::new(months.unsigned_abs());
    let shifted = if months < 0 {
        date.checked_sub_months(magnitude)
    } else {
        date.checked_add_months(magnitude)
    };
    shifted.unwrap_or(if months < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Add `years` calendar years. 29 February maps to 28 February in non-leap years.
pub fn shift_years(date: NaiveDate, years: i32) -> NaiveDate {
    shift_months(date, years.saturating_mul(12))
}

/// The current local date.
pub fn today() -> NaiveDate {
    strip_time(Local::now().naive_local())
}

/// Render a date for user-facing messages, e.g. `01 February 2022`.
pub fn format_long(date: NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}
