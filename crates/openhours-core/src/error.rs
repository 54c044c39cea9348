//! Core error types for openhours-core.
//!
//! Construction-time failures (malformed input, overlapping ranges) and
//! query-time exhaustion share one enum so callers can match on a single
//! type regardless of where the schedule failed.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for openhours-core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A clock time was not `HH:MM` within 00:00..=24:00.
    #[error("Invalid time format: '{0}' (expected HH:MM, 00:00 to 24:00)")]
    InvalidTimeFormat(String),

    /// A time range did not have exactly one `-` separator.
    #[error("Invalid time range format: '{0}' (expected HH:MM-HH:MM)")]
    InvalidTimeRangeFormat(String),

    /// An empty list was given where at least one range is required.
    #[error("Invalid range list definition: at least one range is required")]
    InvalidRangeListDefinition,

    /// A weekday key other than `monday`..`sunday`.
    #[error("Invalid day name: '{0}'")]
    InvalidDayName(String),

    /// An exception key that is neither `MM-DD` nor `YYYY-MM-DD`.
    #[error("Invalid date key: '{0}' (expected MM-DD or YYYY-MM-DD)")]
    InvalidDateKey(String),

    /// Two ranges of the same day overlap.
    #[error("Overlapping ranges: {first} and {second}")]
    OverlappingRanges { first: String, second: String },

    /// The forward search ran past its horizon.
    #[error("No occurrence found within {horizon_days} days")]
    NoOccurrenceFound { horizon_days: u32 },

    /// A schedule-language selector the importer cannot represent.
    #[error("Unsupported selector: '{0}'")]
    UnsupportedSelector(String),
}

/// Configuration and definition-file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse a configuration or schedule file
    #[error("Failed to parse {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },

    /// Schedule file with an extension other than .json or .toml
    #[error("Unsupported schedule file extension: {0}")]
    UnsupportedFormat(PathBuf),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ScheduleError
pub type Result<T, E = ScheduleError> = std::result::Result<T, E>;
