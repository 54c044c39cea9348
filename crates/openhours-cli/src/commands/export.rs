use openhours_core::Config;

use super::{load_schedule, ScheduleArgs};

pub fn run(args: ScheduleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let schedule = load_schedule(&args, &config)?;
    println!("{}", serde_json::to_string_pretty(&schedule.as_structured_data())?);
    Ok(())
}
