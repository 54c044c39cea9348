use openhours_core::{Config, WeekSchedule};

use super::{load_definition, ScheduleArgs};

pub fn run(args: ScheduleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let def = load_definition(&args, &config)?;
    match WeekSchedule::fill(&def) {
        Ok(_) => {
            println!("valid");
            Ok(())
        }
        Err(e) => {
            println!("invalid: {e}");
            std::process::exit(1);
        }
    }
}
