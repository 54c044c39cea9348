//! Structured-data export of a weekly schedule.
//!
//! Produces one record per opening interval, in the shape of schema.org's
//! `OpeningHoursSpecification`.

use serde::{Deserialize, Serialize};

use crate::day::DaySchedule;
use crate::time::ClockTime;
use crate::weekday::Weekday;
use crate::week::WeekSchedule;

/// Type tag carried by every exported record.
pub const SPECIFICATION_TYPE: &str = "OpeningHoursSpecification";

/// One exported opening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHoursSpecification {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_through: Option<String>,
    pub opens: String,
    pub closes: String,
}

impl OpeningHoursSpecification {
    fn weekly(weekday: Weekday, opens: ClockTime, closes: ClockTime) -> Self {
        Self {
            kind: SPECIFICATION_TYPE.to_string(),
            day_of_week: Some(weekday.name().to_string()),
            valid_from: None,
            valid_through: None,
            opens: opens.format(),
            closes: closes.format(),
        }
    }

    fn dated(date: &str, opens: ClockTime, closes: ClockTime) -> Self {
        Self {
            kind: SPECIFICATION_TYPE.to_string(),
            day_of_week: None,
            valid_from: Some(date.to_string()),
            valid_through: Some(date.to_string()),
            opens: opens.format(),
            closes: closes.format(),
        }
    }
}

/// A closed exception date is exported as a single 00:00-00:00 record.
fn push_dated(out: &mut Vec<OpeningHoursSpecification>, date: &str, day: &DaySchedule) {
    if day.is_empty() {
        out.push(OpeningHoursSpecification::dated(
            date,
            ClockTime::MIDNIGHT,
            ClockTime::MIDNIGHT,
        ));
    }
    for interval in day {
        out.push(OpeningHoursSpecification::dated(date, interval.start(), interval.end()));
    }
}

impl WeekSchedule {
    /// Exports weekday openings (Monday first), then specific-date
    /// exceptions by date, then recurring exceptions.
    ///
    /// Recurring exceptions carry ISO 8601 month-day dates (`--MM-DD`).
    /// Filters are dynamic and not exported.
    pub fn as_structured_data(&self) -> Vec<OpeningHoursSpecification> {
        let mut out = Vec::new();

        for weekday in Weekday::ALL {
            for interval in self.day(weekday) {
                out.push(OpeningHoursSpecification::weekly(
                    weekday,
                    interval.start(),
                    interval.end(),
                ));
            }
        }

        for (date, day) in self.specific_exceptions() {
            push_dated(&mut out, &date.format("%Y-%m-%d").to_string(), day);
        }

        for (month_day, day) in self.recurring_exceptions() {
            push_dated(&mut out, &format!("--{month_day}"), day);
        }

        out
    }
}
