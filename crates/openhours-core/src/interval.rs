//! Time-of-day intervals, possibly wrapping past midnight.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::definition::{HoursDef, Metadata, RangeDef};
use crate::error::{Result, ScheduleError};
use crate::time::ClockTime;

/// A half-open `[start, end)` interval of clock times.
///
/// When `end < start` the interval spills over to the next day and contains
/// both `[start, 24:00)` and `[00:00, end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeInterval {
    start: ClockTime,
    end: ClockTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Metadata>,
}

impl TimeInterval {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self {
            start,
            end,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Option<Metadata>) -> Self {
        self.data = data;
        self
    }

    /// Builds an interval from a text or record definition.
    ///
    /// A record whose `hours` is itself a list is reduced to the enclosing
    /// span of its members; the record's `data` is kept.
    pub fn from_def(def: &RangeDef) -> Result<Self> {
        match def {
            RangeDef::Text(text) => text.parse(),
            RangeDef::Record {
                hours: HoursDef::Text(text),
                data,
            } => Ok(text.parse::<Self>()?.with_data(data.clone())),
            RangeDef::Record {
                hours: HoursDef::List(list),
                data,
            } => {
                let members = list.iter().map(Self::from_def).collect::<Result<Vec<_>>>()?;
                Ok(Self::from_list(&members)?.with_data(data.clone()))
            }
        }
    }

    /// Reduces a list to the span from its earliest start to its latest end.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidRangeListDefinition`] for an empty list.
    pub fn from_list(intervals: &[TimeInterval]) -> Result<Self> {
        let start = intervals.iter().map(|i| i.start).min();
        let end = intervals.iter().map(|i| i.end).max();
        match (start, end) {
            (Some(start), Some(end)) => Ok(Self::new(start, end)),
            _ => Err(ScheduleError::InvalidRangeListDefinition),
        }
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    pub fn data(&self) -> Option<&Metadata> {
        self.data.as_ref()
    }

    pub fn spills_over_to_next_day(&self) -> bool {
        self.end < self.start
    }

    pub fn contains_time(&self, time: ClockTime) -> bool {
        if self.spills_over_to_next_day() {
            time >= self.start || time < self.end
        } else {
            time >= self.start && time < self.end
        }
    }

    /// True when this interval contains the other's start or end point.
    ///
    /// An end point equal to this interval's start only touches it and does
    /// not count, so `09:00-12:00` and `12:00-15:00` never overlap.
    ///
    /// Not symmetric: an interval strictly inside `self` is detected by
    /// `self.overlaps(inner)` but not by `inner.overlaps(self)`. Callers that
    /// need a conflict check test both directions.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.contains_time(other.start)
            || (other.end != self.start && self.contains_time(other.end))
    }

    /// Length of the interval, counting across midnight when it spills over.
    pub fn duration(&self) -> Duration {
        if self.spills_over_to_next_day() {
            self.end.diff(self.start) + Duration::hours(24)
        } else {
            self.end.diff(self.start)
        }
    }

    /// `HH:MM-HH:MM`.
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for TimeInterval {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('-').collect();
        match parts.as_slice() {
            [start, end] => Ok(Self::new(start.parse()?, end.parse()?)),
            _ => Err(ScheduleError::InvalidTimeRangeFormat(s.to_string())),
        }
    }
}
