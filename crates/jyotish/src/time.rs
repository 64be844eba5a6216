//! Civil time to Julian Day and sidereal time.
//!
//! Julian Day follows Meeus, "Astronomical Algorithms", ch. 7 (Gregorian
//! calendar only). Sidereal time uses the IAU 1982 GMST polynomial in
//! Julian centuries since J2000.0 (Meeus eq. 12.4).

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

use crate::error::ValidationError;
use crate::zodiac::normalize_degrees;

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Days in a Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian Day of the Unix epoch (1970-01-01 00:00 UTC).
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Julian Day for a Gregorian calendar date; `day` may carry a fraction.
///
/// No range checking happens here. Use [`civil_to_julian_day`] for
/// unvalidated input.
pub fn julian_day(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let y = y as f64;
    let m = m as f64;
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Validated civil date/time (UTC) to Julian Day.
pub fn civil_to_julian_day(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<f64, ValidationError> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::new("month", format!("{month} is not in 1..=12")));
    }
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        ValidationError::new("day", format!("{year:04}-{month:02} has no day {day}"))
    })?;
    if hour > 23 {
        return Err(ValidationError::new("hour", format!("{hour} is not in 0..=23")));
    }
    if minute > 59 {
        return Err(ValidationError::new("minute", format!("{minute} is not in 0..=59")));
    }
    if second > 59 {
        return Err(ValidationError::new("second", format!("{second} is not in 0..=59")));
    }

    let day_fraction = (hour as f64 + minute as f64 / 60.0 + second as f64 / 3600.0) / 24.0;
    Ok(julian_day(date.year(), date.month(), date.day() as f64 + day_fraction))
}

/// Julian Day of a UTC instant, to millisecond precision.
pub fn julian_day_from_utc(dt: &DateTime<Utc>) -> f64 {
    let seconds = dt.hour() as f64 * 3600.0
        + dt.minute() as f64 * 60.0
        + dt.second() as f64
        + dt.timestamp_subsec_millis() as f64 / 1000.0;
    julian_day(dt.year(), dt.month(), dt.day() as f64 + seconds / 86_400.0)
}

/// UTC instant for a Julian Day, rounded to the millisecond.
///
/// Returns `None` outside chrono's representable range.
pub fn utc_from_julian_day(jd: f64) -> Option<DateTime<Utc>> {
    let millis = ((jd - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round();
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

/// Julian centuries elapsed since J2000.0.
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Greenwich mean sidereal time in degrees, `[0, 360)`.
pub fn greenwich_sidereal_time(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    let gst = 280.460_618_37 + 360.985_647_366_29 * (jd - J2000_JD) + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_degrees(gst)
}

/// Local sidereal time in degrees for an east-positive geographic longitude.
pub fn local_sidereal_time(jd: f64, longitude_east: f64) -> f64 {
    normalize_degrees(greenwich_sidereal_time(jd) + longitude_east)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_julian_day_j2000() {
        assert_eq!(julian_day(2000, 1, 1.5), J2000_JD);
    }

    #[test]
    fn test_julian_day_meeus_examples() {
        // Meeus example 7.a: 1957 October 4.81
        assert!((julian_day(1957, 10, 4.81) - 2_436_116.31).abs() < 1e-6);
        // Meeus table 7.a: 1987 January 27.0 (January carries into 1986)
        assert_eq!(julian_day(1987, 1, 27.0), 2_446_822.5);
        assert_eq!(julian_day(1988, 6, 19.5), 2_447_332.0);
    }

    #[test]
    fn test_civil_to_julian_day_rejects_invalid_dates() {
        let err = civil_to_julian_day(2023, 13, 1, 0, 0, 0).unwrap_err();
        assert_eq!(err.field, "month");
        let err = civil_to_julian_day(2023, 2, 29, 0, 0, 0).unwrap_err();
        assert_eq!(err.field, "day");
        let err = civil_to_julian_day(2023, 2, 1, 24, 0, 0).unwrap_err();
        assert_eq!(err.field, "hour");
        assert!(civil_to_julian_day(2024, 2, 29, 12, 0, 0).is_ok());
    }

    #[test]
    fn test_julian_day_roundtrip_through_utc() {
        let dt = Utc.with_ymd_and_hms(1990, 7, 14, 6, 45, 30).unwrap();
        let jd = julian_day_from_utc(&dt);
        assert_eq!(utc_from_julian_day(jd).unwrap(), dt);
    }

    #[test]
    fn test_greenwich_sidereal_time_meeus_example() {
        // Meeus example 12.a: 1987 April 10, 0h UT -> 13h10m46.3668s
        let jd = julian_day(1987, 4, 10.0);
        let expected = (13.0 + 10.0 / 60.0 + 46.3668 / 3600.0) * 15.0;
        assert!((greenwich_sidereal_time(jd) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_local_sidereal_time_wraps() {
        let jd = J2000_JD;
        let gst = greenwich_sidereal_time(jd);
        let lst = local_sidereal_time(jd, 100.0);
        assert!((0.0..360.0).contains(&lst));
        assert!((normalize_degrees(gst + 100.0) - lst).abs() < 1e-9);
    }
}
