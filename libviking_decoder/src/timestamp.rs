//! Timestamp reconstruction for the compact date encodings on the wire.
//!
//! The controller transmits dates as `DDMMYY`. The century cannot be read
//! from the frame, so the caller supplies it, and the 2-digit year is glued
//! to `century - 1` to land in the right hundred-year window (century 21 and
//! year `"21"` give `"2021"`). That convention comes straight from the
//! deployed logger firmware; it lives here, in one place, in case it ever
//! has to change.

use time::{Date, Duration, Month, PrimitiveDateTime, Time};

use super::error::FieldError;
use super::value::NOT_A_TIME;

/// The externally supplied century hint, e.g. 21 for dates in 20xx.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Century(pub i32);

impl Century {
    /// Expand a 2-digit year field into a full year string.
    pub fn full_year(&self, two_digit_year: &str) -> String {
        format!("{}{}", self.0 - 1, two_digit_year)
    }
}

/// Assemble an ISO-8601 `YYYY-MM-DDTHH:MM:SS` string from its parts.
///
/// A `#` placeholder anywhere in the parts means the clock had no value;
/// the whole timestamp then collapses to the `NaT` sentinel.
pub fn make_timestamp(
    year: &str,
    month: &str,
    day: &str,
    hour: &str,
    minute: &str,
    second: &str,
) -> String {
    let time = format!("{year}-{month}-{day}T{hour}:{minute}:{second}");
    if time.contains('#') {
        NOT_A_TIME.to_string()
    } else {
        time
    }
}

/// Reconstruct a timestamp from the compact `HHMMSS` + `DDMMYY` pair and the
/// century hint.
pub fn compact_timestamp(century: Century, time: &str, date: &str) -> Result<String, FieldError> {
    let bad = || FieldError::BadDate(format!("{time},{date}"));
    let slice = |s: &str, range: std::ops::Range<usize>| -> Result<String, FieldError> {
        s.get(range).map(String::from).ok_or_else(bad)
    };
    Ok(make_timestamp(
        &century.full_year(&slice(date, 4..6)?),
        &slice(date, 2..4)?,
        &slice(date, 0..2)?,
        &slice(time, 0..2)?,
        &slice(time, 2..4)?,
        &slice(time, 4..6)?,
    ))
}

/// Resolve the nitrate sensor's `YYYYDDD` ordinal date plus fractional hours
/// of day into an ISO timestamp.
pub fn ordinal_timestamp(year_and_day: &str, hours: f64) -> Result<String, FieldError> {
    let bad = || FieldError::BadDate(year_and_day.to_string());
    let year: i32 = year_and_day.get(0..4).ok_or_else(bad)?.parse().map_err(|_| bad())?;
    let day: i64 = year_and_day.get(4..).ok_or_else(bad)?.parse().map_err(|_| bad())?;

    let start = Date::from_calendar_date(year, Month::January, 1)?;
    let stamp = PrimitiveDateTime::new(start, Time::MIDNIGHT)
        + Duration::days(day)
        + Duration::seconds_f64(hours * 3600.0);
    Ok(format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        stamp.year(),
        stamp.month() as u8,
        stamp.day(),
        stamp.hour(),
        stamp.minute(),
        stamp.second()
    ))
}
