use clap::Args;
use openhours_core::Config;
use serde_json::json;

use super::{load_schedule, local_moment, wants_json, MomentArgs, ScheduleArgs};

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,
    #[command(flatten)]
    pub moment: MomentArgs,
}

pub fn run(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let schedule = load_schedule(&args.schedule, &config)?;
    let local = local_moment(&schedule, args.moment.at.as_deref())?;
    let open = schedule.is_open_at_local(local)?;
    let today = schedule.resolve(local.date())?;

    if wants_json(args.moment.json, &config) {
        let out = json!({
            "at": local.format("%Y-%m-%dT%H:%M").to_string(),
            "open": open,
            "hours": today.to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let state = if open { "open" } else { "closed" };
        let hours = if today.is_empty() {
            "closed all day".to_string()
        } else {
            today.to_string()
        };
        println!("{state} at {} ({hours})", local.format("%Y-%m-%d %H:%M"));
    }
    Ok(())
}
