//! Opening intervals of a single day.

use serde::Serialize;
use std::fmt;

use crate::definition::{HoursDef, Metadata, RangeDef};
use crate::error::{Result, ScheduleError};
use crate::interval::TimeInterval;
use crate::time::ClockTime;

/// An overlap-free list of [`TimeInterval`]s for one weekday or exception date.
///
/// Intervals keep their definition order. An empty schedule means closed all
/// day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DaySchedule {
    intervals: Vec<TimeInterval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Metadata>,
}

impl DaySchedule {
    /// Builds a day from range definitions.
    ///
    /// A record whose `hours` is a list contributes each nested range, which
    /// inherits the record's `data` unless it has its own.
    ///
    /// # Errors
    ///
    /// Fails on malformed ranges, or with [`ScheduleError::OverlappingRanges`]
    /// when any two ranges overlap.
    pub fn new(defs: &[RangeDef]) -> Result<Self> {
        let mut intervals = Vec::with_capacity(defs.len());
        for def in defs {
            collect_intervals(def, None, &mut intervals)?;
        }

        for (i, first) in intervals.iter().enumerate() {
            for second in &intervals[i + 1..] {
                if first.overlaps(second) || second.overlaps(first) {
                    return Err(ScheduleError::OverlappingRanges {
                        first: first.format(),
                        second: second.format(),
                    });
                }
            }
        }

        Ok(Self {
            intervals,
            data: None,
        })
    }

    /// Closed all day.
    pub fn closed() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, data: Option<Metadata>) -> Self {
        self.data = data;
        self
    }

    pub fn data(&self) -> Option<&Metadata> {
        self.data.as_ref()
    }

    pub fn intervals(&self) -> &[TimeInterval] {
        &self.intervals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeInterval> {
        self.intervals.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_open_at(&self, time: ClockTime) -> bool {
        self.intervals.iter().any(|interval| interval.contains_time(time))
    }

    /// Start of the next opening later on this day, if any.
    ///
    /// An opening that already contains `time` does not count, except an
    /// overnight opening queried before its start: it opens again tonight.
    pub fn next_open(&self, time: ClockTime) -> Option<ClockTime> {
        self.scan(time).map(|interval| interval.start())
    }

    /// End of the current opening, or of the next opening later on this day.
    pub fn next_close(&self, time: ClockTime) -> Option<ClockTime> {
        if let Some(current) = self.intervals.iter().find(|i| i.contains_time(time)) {
            return Some(current.end());
        }
        self.scan(time).map(|interval| interval.end())
    }

    /// Walks the intervals by start time and returns the first one that
    /// follows the opening containing `time`, or whose preceding free gap
    /// contains `time`.
    fn scan(&self, time: ClockTime) -> Option<&TimeInterval> {
        let mut ordered: Vec<&TimeInterval> = self.intervals.iter().collect();
        ordered.sort_by_key(|interval| interval.start());

        let mut previous: Option<&TimeInterval> = None;
        let mut past_current = false;
        for interval in ordered {
            if interval.contains_time(time) {
                if interval.spills_over_to_next_day() && time < interval.start() {
                    return Some(interval);
                }
                past_current = true;
            } else if past_current {
                return Some(interval);
            } else {
                let gap_start = previous.map_or(ClockTime::MIDNIGHT, |p| p.end());
                let gap = TimeInterval::new(gap_start, interval.start());
                if gap.contains_time(time) {
                    return Some(interval);
                }
            }
            previous = Some(interval);
        }
        None
    }
}

fn collect_intervals(
    def: &RangeDef,
    inherited: Option<&Metadata>,
    out: &mut Vec<TimeInterval>,
) -> Result<()> {
    match def {
        RangeDef::Record {
            hours: HoursDef::List(list),
            data,
        } => {
            let data = data.as_ref().or(inherited);
            for nested in list {
                collect_intervals(nested, data, out)?;
            }
        }
        _ => {
            let interval = TimeInterval::from_def(def)?;
            let interval = match (interval.data().is_none(), inherited) {
                (true, Some(data)) => interval.with_data(Some(data.clone())),
                _ => interval,
            };
            out.push(interval);
        }
    }
    Ok(())
}

impl fmt::Display for DaySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, interval) in self.intervals.iter().enumerate() {
            if i > 0 {
                f.write_str(" / ")?;
            }
            write!(f, "{interval}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a DaySchedule {
    type Item = &'a TimeInterval;
    type IntoIter = std::slice::Iter<'a, TimeInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
