use openhours_core::{Config, WeekSchedule};

use super::{load_definition, ScheduleArgs};

pub fn run(args: ScheduleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let def = load_definition(&args, &config)?;
    let merged = WeekSchedule::merge_overlapping_ranges(&def)?;
    println!("{}", serde_json::to_string_pretty(&merged)?);
    Ok(())
}
