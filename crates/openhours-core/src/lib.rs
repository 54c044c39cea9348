//! # openhours Core Library
//!
//! Answers "is it open now" and "when does it next open/close" against a
//! weekly schedule of opening hours with calendar-date exceptions and
//! dynamically evaluated overrides. The library is pure computation: no
//! persistence of schedules and no network I/O.
//!
//! ## Architecture
//!
//! - **Values**: [`ClockTime`] and [`TimeInterval`], immutable once built
//! - **Days**: [`DaySchedule`], an overlap-free list of intervals with
//!   point containment and per-day forward search
//! - **Weeks**: [`WeekSchedule`], resolving which day applies to a date
//!   (filters, then specific exceptions, then recurring exceptions, then
//!   the weekday default) and searching forward day by day up to a horizon
//! - **Definitions**: [`ScheduleDef`], the serde-friendly input shape,
//!   loadable from JSON or TOML and produced by [`importer::parse`]
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use openhours_core::{ranges, ScheduleDef, WeekSchedule};
//!
//! let def = ScheduleDef::new()
//!     .day("monday", ranges(["09:00-18:00"]))
//!     .exception("12-25", ranges(Vec::<&str>::new()));
//! let schedule = WeekSchedule::fill(&def).unwrap();
//!
//! let monday = NaiveDate::from_ymd_opt(2021, 12, 20).unwrap();
//! assert!(schedule.is_open_at_local(monday.and_hms_opt(10, 0, 0).unwrap()).unwrap());
//! ```

pub mod config;
pub mod day;
pub mod definition;
pub mod error;
pub mod export;
pub mod importer;
pub mod interval;
mod merge;
pub mod time;
pub mod week;
pub mod weekday;

pub use config::Config;
pub use day::DaySchedule;
pub use definition::{
    ranges, DateFilter, DateKey, ExceptionDef, Filter, HoursDef, Metadata, MonthDay, RangeDef,
    ScheduleDef,
};
pub use error::{ConfigError, Result, ScheduleError};
pub use export::OpeningHoursSpecification;
pub use interval::TimeInterval;
pub use time::ClockTime;
pub use week::{Occurrence, WeekSchedule, DEFAULT_HORIZON_DAYS};
pub use weekday::Weekday;
