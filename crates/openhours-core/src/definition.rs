//! Declarative schedule definitions consumed by [`WeekSchedule::fill`].
//!
//! The shape mirrors what a JSON or TOML schedule file looks like:
//!
//! ```json
//! {
//!   "monday": ["09:00-12:00", {"hours": "13:00-18:00", "data": {"staffed": true}}],
//!   "exceptions": {"12-25": [], "2024-04-01": ["10:00-14:00"]},
//!   "data": {"name": "Main street"}
//! }
//! ```
//!
//! Filters are code-only: they are skipped when (de)serializing.
//!
//! [`WeekSchedule::fill`]: crate::WeekSchedule::fill

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{ConfigError, ScheduleError};

/// Opaque metadata attached to ranges, days or whole schedules.
pub type Metadata = serde_json::Value;

/// One range definition: `"HH:MM-HH:MM"` or a record with `hours` and `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeDef {
    Text(String),
    Record {
        hours: HoursDef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<Metadata>,
    },
}

/// The `hours` value of a [`RangeDef::Record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HoursDef {
    Text(String),
    List(Vec<RangeDef>),
}

impl RangeDef {
    pub fn record(hours: impl Into<String>, data: Option<Metadata>) -> Self {
        RangeDef::Record {
            hours: HoursDef::Text(hours.into()),
            data,
        }
    }

    pub fn data(&self) -> Option<&Metadata> {
        match self {
            RangeDef::Text(_) => None,
            RangeDef::Record { data, .. } => data.as_ref(),
        }
    }
}

impl From<&str> for RangeDef {
    fn from(value: &str) -> Self {
        RangeDef::Text(value.to_string())
    }
}

impl From<String> for RangeDef {
    fn from(value: String) -> Self {
        RangeDef::Text(value)
    }
}

/// Builds a list of text range definitions.
pub fn ranges<I, S>(items: I) -> Vec<RangeDef>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(|s| RangeDef::Text(s.into())).collect()
}

/// A dynamically evaluated override for a calendar date.
///
/// Returning `Some` (even an empty list, meaning closed) wins over every
/// exception and weekday default; `None` falls through.
pub trait DateFilter: Send + Sync {
    fn evaluate(&self, date: NaiveDate) -> Option<Vec<RangeDef>>;
}

impl<F> DateFilter for F
where
    F: Fn(NaiveDate) -> Option<Vec<RangeDef>> + Send + Sync,
{
    fn evaluate(&self, date: NaiveDate) -> Option<Vec<RangeDef>> {
        self(date)
    }
}

/// Shared handle to a [`DateFilter`].
#[derive(Clone)]
pub struct Filter(Arc<dyn DateFilter>);

impl Filter {
    pub fn new(filter: impl DateFilter + 'static) -> Self {
        Self(Arc::new(filter))
    }

    pub fn evaluate(&self, date: NaiveDate) -> Option<Vec<RangeDef>> {
        self.0.evaluate(date)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

/// Value of an `exceptions` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExceptionDef {
    Ranges(Vec<RangeDef>),
    #[serde(skip)]
    Filter(Filter),
}

impl From<Vec<RangeDef>> for ExceptionDef {
    fn from(value: Vec<RangeDef>) -> Self {
        ExceptionDef::Ranges(value)
    }
}

/// A complete schedule definition.
///
/// Weekday keys are collected into `days` as written; they are validated by
/// `WeekSchedule::fill`, which rejects anything but `monday`..`sunday`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleDef {
    #[serde(flatten)]
    pub days: BTreeMap<String, Vec<RangeDef>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub exceptions: BTreeMap<String, ExceptionDef>,
    #[serde(skip)]
    pub filters: Vec<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Metadata>,
}

impl ScheduleDef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ranges of one weekday key.
    pub fn day(mut self, key: impl Into<String>, defs: Vec<RangeDef>) -> Self {
        self.days.insert(key.into(), defs);
        self
    }

    /// Adds an exception keyed `MM-DD` or `YYYY-MM-DD`.
    pub fn exception(mut self, key: impl Into<String>, def: impl Into<ExceptionDef>) -> Self {
        self.exceptions.insert(key.into(), def.into());
        self
    }

    pub fn filter(mut self, filter: impl DateFilter + 'static) -> Self {
        self.filters.push(Filter::new(filter));
        self
    }

    pub fn with_data(mut self, data: Metadata) -> Self {
        self.data = Some(data);
        self
    }

    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads a definition from a `.json` or `.toml` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has another extension,
    /// or does not parse.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let parse_failed = |message: String| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            message,
        };
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content).map_err(|e| parse_failed(e.to_string())),
            Some("toml") => Self::from_toml_str(&content).map_err(|e| parse_failed(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Month and day of a recurring exception (`MM-DD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// Accepts any day that exists in a leap year, so `02-29` is valid.
    pub fn new(month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(2000, month, day).map(|_| Self { month, day })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn day(self) -> u32 {
        self.day
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// A parsed exception key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKey {
    Specific(NaiveDate),
    Recurring(MonthDay),
}

fn numeric(part: &str, len: usize) -> Option<u32> {
    if part.len() == len && part.bytes().all(|b| b.is_ascii_digit()) {
        part.parse().ok()
    } else {
        None
    }
}

impl FromStr for DateKey {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScheduleError::InvalidDateKey(s.to_string());
        let parts: Vec<&str> = s.split('-').collect();
        match parts.as_slice() {
            [month, day] => {
                let month = numeric(month, 2).ok_or_else(invalid)?;
                let day = numeric(day, 2).ok_or_else(invalid)?;
                MonthDay::new(month, day)
                    .map(DateKey::Recurring)
                    .ok_or_else(invalid)
            }
            [year, month, day] => {
                let year = numeric(year, 4).ok_or_else(invalid)?;
                let month = numeric(month, 2).ok_or_else(invalid)?;
                let day = numeric(day, 2).ok_or_else(invalid)?;
                NaiveDate::from_ymd_opt(year as i32, month, day)
                    .map(DateKey::Specific)
                    .ok_or_else(invalid)
            }
            _ => Err(invalid()),
        }
    }
}
