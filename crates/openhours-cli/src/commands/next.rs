use clap::{Args, Subcommand};
use openhours_core::Config;
use serde_json::json;

use super::{load_schedule, local_moment, wants_json, MomentArgs, ScheduleArgs};

#[derive(Args)]
pub struct NextArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,
    #[command(flatten)]
    pub moment: MomentArgs,
}

#[derive(Subcommand)]
pub enum NextAction {
    /// Next time the schedule opens
    Open(NextArgs),
    /// Next time the schedule closes
    Close(NextArgs),
}

pub fn run(action: NextAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let (kind, args) = match action {
        NextAction::Open(args) => ("open", args),
        NextAction::Close(args) => ("close", args),
    };

    let schedule = load_schedule(&args.schedule, &config)?;
    let local = local_moment(&schedule, args.moment.at.as_deref())?;
    let occurrence = if kind == "open" {
        schedule.next_open_local(local)?
    } else {
        schedule.next_close_local(local)?
    };

    if wants_json(args.moment.json, &config) {
        let out = json!({
            "next": kind,
            "date": occurrence.date.format("%Y-%m-%d").to_string(),
            "time": occurrence.time.format(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{occurrence}");
    }
    Ok(())
}
