//! Minute-resolution time of day.

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ScheduleError};

/// A time of day with minute resolution.
///
/// Hours range over `0..=24`; `24:00` is the end-of-day sentinel and sorts
/// after `23:59`. Ordering is by (hours, minutes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hours: u8,
    minutes: u8,
}

impl ClockTime {
    /// Start of day.
    pub const MIDNIGHT: ClockTime = ClockTime { hours: 0, minutes: 0 };
    /// End-of-day sentinel.
    pub const END_OF_DAY: ClockTime = ClockTime { hours: 24, minutes: 0 };

    pub fn new(hours: u8, minutes: u8) -> Result<Self> {
        if hours > 24 || minutes > 59 || (hours == 24 && minutes > 0) {
            return Err(ScheduleError::InvalidTimeFormat(format!(
                "{hours:02}:{minutes:02}"
            )));
        }
        Ok(Self { hours, minutes })
    }

    /// Truncates seconds and sub-second precision.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self {
            hours: time.hour() as u8,
            minutes: time.minute() as u8,
        }
    }

    /// `None` for `24:00`, which chrono cannot represent.
    pub fn to_naive_time(self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hours as u32, self.minutes as u32, 0)
    }

    pub fn hours(self) -> u8 {
        self.hours
    }

    pub fn minutes(self) -> u8 {
        self.minutes
    }

    /// Minutes elapsed since 00:00.
    pub fn minutes_since_midnight(self) -> u32 {
        self.hours as u32 * 60 + self.minutes as u32
    }

    pub fn is_same(self, other: ClockTime) -> bool {
        self == other
    }

    pub fn is_after(self, other: ClockTime) -> bool {
        self > other
    }

    pub fn is_before(self, other: ClockTime) -> bool {
        self < other
    }

    pub fn is_same_or_after(self, other: ClockTime) -> bool {
        self >= other
    }

    /// `self - other`, both placed on the same day.
    pub fn diff(self, other: ClockTime) -> Duration {
        Duration::minutes(self.minutes_since_midnight() as i64 - other.minutes_since_midnight() as i64)
    }

    /// `HH:MM`.
    pub fn format(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

impl FromStr for ClockTime {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ScheduleError::InvalidTimeFormat(s.to_string());
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(h) || !two_digits(m) {
            return Err(invalid());
        }
        let hours: u8 = h.parse().map_err(|_| invalid())?;
        let minutes: u8 = m.parse().map_err(|_| invalid())?;
        Self::new(hours, minutes).map_err(|_| invalid())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
