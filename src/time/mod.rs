//! Calendar date and Julian date conversions
//!
//! Conversion arithmetic follows the Explanatory Supplement to the
//! Astronomical Almanac 15.11, on the proleptic Gregorian calendar.
//! Calendar input arrives as `chrono` naive values; every engine in this
//! crate works in Julian dates from here on.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::constants::{DAYS_PER_CENTURY, DAY_SECONDS, J2000};

/// Julian day number whose noon falls on the given calendar date.
pub fn julian_day(year: i32, month: u32, day: u32) -> i64 {
    let before_march = month < 3;
    let y = i64::from(year) + 4800 - i64::from(before_march);
    let m = i64::from(month) - 2 + if before_march { 12 } else { 0 };

    1461 * y / 4 + 367 * m / 12 - 3 * ((y + 100) / 100) / 4 + i64::from(day) - 32075
}

/// Julian date of a calendar date and time-of-day.
pub fn julian_date(datetime: &NaiveDateTime) -> f64 {
    let jdn = julian_day(datetime.year(), datetime.month(), datetime.day()) as f64;
    let day_fraction = f64::from(datetime.num_seconds_from_midnight()) / DAY_SECONDS;
    jdn - 0.5 + day_fraction
}

/// Julian centuries elapsed since the J2000.0 epoch.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000) / DAYS_PER_CENTURY
}

/// Calendar date (year, month, day) containing the given Julian day number.
pub fn calendar_date(jdn: i64) -> (i32, u32, u32) {
    let f = jdn + 1401 + (4 * jdn + 274_277) / 146_097 * 3 / 4 - 38;
    let e = 4 * f + 3;
    let g = e.rem_euclid(1461) / 4;
    let h = 5 * g + 2;

    let day = h.rem_euclid(153) / 5 + 1;
    let month = (h / 153 + 2).rem_euclid(12) + 1;
    let year = e / 1461 - 4716 + (14 - month) / 12;

    (year as i32, month as u32, day as u32)
}

/// Format a Julian date as YYYY-MM-DD.
pub fn format_date(jd: f64) -> String {
    let jdn = (jd + 0.5).floor() as i64;
    let (year, month, day) = calendar_date(jdn);
    format!("{:04}-{:02}-{:02}", year, month, day)
}
