//! Weekly schedule with date exceptions and dynamic filters.
//!
//! A [`WeekSchedule`] owns one [`DaySchedule`] per weekday, two exception
//! maps and an ordered filter list. For any date exactly one of them
//! applies, in this order:
//!
//! 1. the first filter returning `Some`,
//! 2. a specific-date exception (`YYYY-MM-DD`),
//! 3. a recurring exception (`MM-DD`),
//! 4. the weekday default.
//!
//! Reconfiguration (`with_timezone`, `with_filters`, `with_horizon`) consumes
//! the schedule and returns a new one, so a shared schedule is never
//! mutated under a reader.

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace, warn};

use crate::day::DaySchedule;
use crate::definition::{
    DateKey, ExceptionDef, Filter, HoursDef, Metadata, MonthDay, RangeDef, ScheduleDef,
};
use crate::error::{Result, ScheduleError};
use crate::time::ClockTime;
use crate::weekday::Weekday;

/// Default number of days the forward search looks ahead.
pub const DEFAULT_HORIZON_DAYS: u32 = 366;

/// A point in schedule-local time returned by the forward search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    pub date: NaiveDate,
    pub time: ClockTime,
}

impl Occurrence {
    /// `24:00` becomes `00:00` of the following day.
    pub fn to_naive_date_time(&self) -> NaiveDateTime {
        match self.time.to_naive_time() {
            Some(time) => self.date.and_time(time),
            None => (self.date + Days::new(1)).and_time(NaiveTime::default()),
        }
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format("%Y-%m-%d"), self.time)
    }
}

/// Weekly opening hours.
#[derive(Debug, Clone)]
pub struct WeekSchedule {
    days: [DaySchedule; 7],
    specific_exceptions: BTreeMap<NaiveDate, DaySchedule>,
    recurring_exceptions: BTreeMap<MonthDay, DaySchedule>,
    filters: Vec<Filter>,
    timezone: Option<FixedOffset>,
    data: Option<Metadata>,
    horizon_days: u32,
}

impl Default for WeekSchedule {
    fn default() -> Self {
        Self {
            days: Default::default(),
            specific_exceptions: BTreeMap::new(),
            recurring_exceptions: BTreeMap::new(),
            filters: Vec::new(),
            timezone: None,
            data: None,
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

/// A day definition made of a single `{hours: [...], data}` record carries
/// that record's data as day metadata.
fn build_day(defs: &[RangeDef]) -> Result<DaySchedule> {
    let day = DaySchedule::new(defs)?;
    let data = match defs {
        [RangeDef::Record {
            hours: HoursDef::List(_),
            data,
        }] => data.clone(),
        _ => None,
    };
    Ok(day.with_data(data))
}

impl WeekSchedule {
    /// Builds a schedule from a definition.
    ///
    /// # Errors
    ///
    /// Fails with [`ScheduleError::InvalidDayName`] or
    /// [`ScheduleError::InvalidDateKey`] on unknown keys, and with any error
    /// raised while building a day.
    pub fn fill(def: &ScheduleDef) -> Result<Self> {
        let mut schedule = Self::default();

        for (key, defs) in &def.days {
            let weekday: Weekday = key.parse()?;
            schedule.days[weekday.index()] = build_day(defs)?;
        }

        for (key, exception) in &def.exceptions {
            let date_key: DateKey = key.parse()?;
            match exception {
                ExceptionDef::Filter(filter) => schedule.filters.push(filter.clone()),
                ExceptionDef::Ranges(defs) => {
                    let day = build_day(defs)?;
                    match date_key {
                        DateKey::Specific(date) => {
                            schedule.specific_exceptions.insert(date, day);
                        }
                        DateKey::Recurring(month_day) => {
                            schedule.recurring_exceptions.insert(month_day, day);
                        }
                    }
                }
            }
        }

        schedule.filters.extend(def.filters.iter().cloned());
        schedule.data = def.data.clone();

        debug!(
            open_weekdays = 7 - schedule.regular_closing_days().len(),
            specific_exceptions = schedule.specific_exceptions.len(),
            recurring_exceptions = schedule.recurring_exceptions.len(),
            filters = schedule.filters.len(),
            "schedule filled"
        );
        Ok(schedule)
    }

    /// True when `def` builds without error.
    pub fn is_valid(def: &ScheduleDef) -> bool {
        Self::fill(def).is_ok()
    }

    /// Returns the schedule with queries normalized to `offset`.
    pub fn with_timezone(mut self, offset: Option<FixedOffset>) -> Self {
        self.timezone = offset;
        self
    }

    /// Returns the schedule with its filter list replaced.
    pub fn with_filters(mut self, filters: Vec<Filter>) -> Self {
        self.filters = filters;
        self
    }

    /// Returns the schedule with a different forward-search horizon.
    pub fn with_horizon(mut self, horizon_days: u32) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    pub fn timezone(&self) -> Option<FixedOffset> {
        self.timezone
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    pub fn data(&self) -> Option<&Metadata> {
        self.data.as_ref()
    }

    /// The weekday default schedule.
    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        &self.days[weekday.index()]
    }

    pub fn specific_exceptions(&self) -> &BTreeMap<NaiveDate, DaySchedule> {
        &self.specific_exceptions
    }

    pub fn recurring_exceptions(&self) -> &BTreeMap<MonthDay, DaySchedule> {
        &self.recurring_exceptions
    }

    /// Picks the one schedule that applies on `date`.
    ///
    /// `date` is expected in schedule-local time; the moment-based queries
    /// normalize before calling this.
    pub fn resolve(&self, date: NaiveDate) -> Result<Cow<'_, DaySchedule>> {
        for (position, filter) in self.filters.iter().enumerate() {
            if let Some(defs) = filter.evaluate(date) {
                debug!(%date, filter = position, "filter override applies");
                return Ok(Cow::Owned(build_day(&defs)?));
            }
        }
        if let Some(day) = self.specific_exceptions.get(&date) {
            return Ok(Cow::Borrowed(day));
        }
        if let Some(day) = self.recurring_exceptions.get(&MonthDay::from_date(date)) {
            return Ok(Cow::Borrowed(day));
        }
        Ok(Cow::Borrowed(self.day(Weekday::from_chrono(date.weekday()))))
    }

    /// Converts a moment to schedule-local wall time.
    ///
    /// With a configured offset the moment is shifted to it; otherwise the
    /// moment's own local time is used.
    pub fn normalize<Tz: TimeZone>(&self, moment: &DateTime<Tz>) -> NaiveDateTime {
        match self.timezone {
            Some(offset) => moment.with_timezone(&offset).naive_local(),
            None => moment.naive_local(),
        }
    }

    pub fn is_open_at<Tz: TimeZone>(&self, moment: &DateTime<Tz>) -> Result<bool> {
        self.is_open_at_local(self.normalize(moment))
    }

    pub fn is_closed_at<Tz: TimeZone>(&self, moment: &DateTime<Tz>) -> Result<bool> {
        Ok(!self.is_open_at(moment)?)
    }

    /// Like [`is_open_at`](Self::is_open_at) for a moment already in
    /// schedule-local time.
    pub fn is_open_at_local(&self, local: NaiveDateTime) -> Result<bool> {
        let day = self.resolve(local.date())?;
        Ok(day.is_open_at(ClockTime::from_naive_time(local.time())))
    }

    pub fn is_closed_at_local(&self, local: NaiveDateTime) -> Result<bool> {
        Ok(!self.is_open_at_local(local)?)
    }

    pub fn is_open_now(&self) -> Result<bool> {
        self.is_open_at(&Utc::now())
    }

    /// Whether the weekday default has any opening. Exceptions and filters
    /// are not consulted.
    pub fn is_open_on(&self, weekday: Weekday) -> bool {
        !self.day(weekday).is_empty()
    }

    pub fn is_closed_on(&self, weekday: Weekday) -> bool {
        self.day(weekday).is_empty()
    }

    pub fn next_open<Tz: TimeZone>(&self, moment: &DateTime<Tz>) -> Result<Occurrence> {
        self.next_open_local(self.normalize(moment))
    }

    pub fn next_close<Tz: TimeZone>(&self, moment: &DateTime<Tz>) -> Result<Occurrence> {
        self.next_close_local(self.normalize(moment))
    }

    pub fn next_open_local(&self, local: NaiveDateTime) -> Result<Occurrence> {
        self.search_forward(local, DaySchedule::next_open)
    }

    pub fn next_close_local(&self, local: NaiveDateTime) -> Result<Occurrence> {
        self.search_forward(local, DaySchedule::next_close)
    }

    /// Asks each day in turn, starting at `local` and then at 00:00 of every
    /// following date, re-resolving each date so exceptions and filters apply.
    fn search_forward(
        &self,
        local: NaiveDateTime,
        find: fn(&DaySchedule, ClockTime) -> Option<ClockTime>,
    ) -> Result<Occurrence> {
        let exhausted = ScheduleError::NoOccurrenceFound {
            horizon_days: self.horizon_days,
        };
        let mut date = local.date();
        let mut time = ClockTime::from_naive_time(local.time());

        for _ in 0..=self.horizon_days {
            let day = self.resolve(date)?;
            trace!(%date, %time, day = %day, "scanning day");
            if let Some(found) = find(&*day, time) {
                // An end earlier than the query time belongs to an opening
                // that spills past midnight.
                let date = if found < time {
                    date.succ_opt().ok_or_else(|| exhausted.clone())?
                } else {
                    date
                };
                return Ok(Occurrence { date, time: found });
            }
            date = date.succ_opt().ok_or_else(|| exhausted.clone())?;
            time = ClockTime::MIDNIGHT;
        }

        warn!(start = %local, horizon_days = self.horizon_days, "forward search exhausted");
        Err(exhausted)
    }

    /// Weekdays whose default schedule is empty, Monday first.
    pub fn regular_closing_days(&self) -> Vec<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|day| self.is_closed_on(*day))
            .collect()
    }

    /// ISO 8601 numbers (Monday = 1) of [`regular_closing_days`](Self::regular_closing_days).
    pub fn regular_closing_days_iso(&self) -> Vec<u32> {
        self.regular_closing_days()
            .into_iter()
            .map(Weekday::iso_number)
            .collect()
    }

    /// Specific-date exceptions that close the whole day. Recurring
    /// exceptions are not included.
    pub fn exceptional_closing_dates(&self) -> Vec<NaiveDate> {
        self.specific_exceptions
            .iter()
            .filter(|(_, day)| day.is_empty())
            .map(|(date, _)| *date)
            .collect()
    }
}
