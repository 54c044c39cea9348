pub mod check;
pub mod closing_days;
pub mod config;
pub mod export;
pub mod import;
pub mod next;
pub mod normalize;
pub mod validate;

use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDateTime};
use clap::Args;
use openhours_core::{Config, ScheduleDef, WeekSchedule};

/// Schedule file argument shared by most commands.
#[derive(Args)]
pub struct ScheduleArgs {
    /// Schedule definition (.json or .toml); defaults to config `default_schedule`
    pub file: Option<PathBuf>,
}

/// Query moment argument.
#[derive(Args)]
pub struct MomentArgs {
    /// RFC 3339 timestamp or local "YYYY-MM-DDTHH:MM"; defaults to now
    #[arg(long)]
    pub at: Option<String>,
    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

/// Reads the schedule definition named on the command line or in the config.
pub fn load_definition(
    args: &ScheduleArgs,
    config: &Config,
) -> Result<ScheduleDef, Box<dyn std::error::Error>> {
    let path = args
        .file
        .clone()
        .or_else(|| config.default_schedule.clone())
        .ok_or("no schedule file given and no default_schedule configured")?;
    tracing::debug!(path = %path.display(), "loading schedule");
    Ok(ScheduleDef::from_path(&path)?)
}

/// Builds a schedule with the configured horizon and UTC offset applied.
pub fn load_schedule(
    args: &ScheduleArgs,
    config: &Config,
) -> Result<WeekSchedule, Box<dyn std::error::Error>> {
    let def = load_definition(args, config)?;
    Ok(WeekSchedule::fill(&def)?
        .with_horizon(config.search.horizon_days)
        .with_timezone(config.utc_offset()))
}

/// Turns `--at` into schedule-local wall time.
///
/// Zoned timestamps go through the schedule's offset; naive ones are taken
/// as already local.
pub fn local_moment(
    schedule: &WeekSchedule,
    at: Option<&str>,
) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    let Some(raw) = at else {
        return Ok(schedule.normalize(&Local::now()));
    };
    if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
        return Ok(schedule.normalize(&zoned));
    }
    ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| format!("cannot parse moment '{raw}'").into())
}

pub fn wants_json(flag: bool, config: &Config) -> bool {
    flag || config.display.json
}
