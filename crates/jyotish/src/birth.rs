//! Birth event input and its conversion to a UTC instant.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::{civil_to_julian_day, julian_day_from_utc};

/// Largest offset accepted in a timezone label, in hours.
const MAX_OFFSET_HOURS: i32 = 14;

/// `±HH`, `±HHMM` or `±HH:MM`, optionally after `UTC`/`GMT`.
const OFFSET_PATTERN: &str = r"^(?:UTC|GMT)?([+-])([0-9]{2})(?::?([0-9]{2}))?$";

/// Civil date and time of birth plus the place it happened.
///
/// `longitude` is east-positive. `timezone` is the label the civil time
/// was recorded in (see [`parse_timezone_label`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthEvent {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    #[serde(default)]
    pub second: u32,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl BirthEvent {
    pub fn at(
        local: NaiveDateTime,
        latitude: f64,
        longitude: f64,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
            second: local.second(),
            latitude,
            longitude,
            timezone: timezone.into(),
        }
    }

    /// Check every field; the first offending field is reported.
    pub fn validate(&self) -> Result<(), ValidationError> {
        civil_to_julian_day(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )?;
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValidationError::new(
                "latitude",
                format!("{} is not in [-90, 90]", self.latitude),
            ));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ValidationError::new(
                "longitude",
                format!("{} is not in [-180, 180]", self.longitude),
            ));
        }
        self.utc_offset()?;
        Ok(())
    }

    pub fn utc_offset(&self) -> Result<FixedOffset, ValidationError> {
        parse_timezone_label(&self.timezone)
    }

    /// The recorded civil time in its own offset.
    pub fn local_datetime(&self) -> Result<DateTime<FixedOffset>, ValidationError> {
        let offset = self.utc_offset()?;
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or_else(|| {
            ValidationError::new(
                "day",
                format!("{:04}-{:02} has no day {}", self.year, self.month, self.day),
            )
        })?;
        let naive = date
            .and_hms_opt(self.hour, self.minute, self.second)
            .ok_or_else(|| ValidationError::new("hour", "time of day out of range"))?;
        offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| ValidationError::new("timezone", "local time is not representable"))
    }

    pub fn instant_utc(&self) -> Result<DateTime<Utc>, ValidationError> {
        Ok(self.local_datetime()?.with_timezone(&Utc))
    }

    /// Julian Day (UT) of the birth instant.
    pub fn julian_day(&self) -> Result<f64, ValidationError> {
        Ok(julian_day_from_utc(&self.instant_utc()?))
    }

    /// Identity used by the chart cache; floats compare bit for bit.
    pub(crate) fn cache_key(&self) -> BirthKey {
        BirthKey {
            civil: [self.month, self.day, self.hour, self.minute, self.second],
            year: self.year,
            latitude: self.latitude.to_bits(),
            longitude: self.longitude.to_bits(),
            timezone: self.timezone.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct BirthKey {
    year: i32,
    civil: [u32; 5],
    latitude: u64,
    longitude: u64,
    timezone: String,
}

/// Parse `UTC`, `GMT`, `Z` or a fixed offset such as `+05:30`, `-0800`,
/// `+09`, optionally prefixed with `UTC`/`GMT` (`UTC+05:30`).
pub fn parse_timezone_label(label: &str) -> Result<FixedOffset, ValidationError> {
    let invalid = |reason: &str| ValidationError::new("timezone", format!("{label:?}: {reason}"));

    let upper = label.trim().to_ascii_uppercase();
    if matches!(upper.as_str(), "UTC" | "GMT" | "Z") {
        return FixedOffset::east_opt(0).ok_or_else(|| invalid("zero offset"));
    }

    let offset_regex = Regex::new(OFFSET_PATTERN).map_err(|_| invalid("regex error"))?;
    let caps = offset_regex
        .captures(&upper)
        .ok_or_else(|| invalid("expected UTC or an offset like +05:30"))?;

    let sign = if &caps[1] == "-" { -1 } else { 1 };
    let hours: i32 = caps[2].parse().map_err(|_| invalid("bad hours"))?;
    let minutes: i32 = match caps.get(3) {
        Some(m) => m.as_str().parse().map_err(|_| invalid("bad minutes"))?,
        None => 0,
    };
    if minutes >= 60 || hours * 60 + minutes > MAX_OFFSET_HOURS * 60 {
        return Err(invalid("offset out of range"));
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| invalid("offset out of range"))
}
