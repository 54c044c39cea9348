use clap::Args;
use openhours_core::Config;
use serde_json::json;

use super::{load_schedule, wants_json, ScheduleArgs};

#[derive(Args)]
pub struct ClosingDaysArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,
    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ClosingDaysArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let schedule = load_schedule(&args.schedule, &config)?;
    let weekdays = schedule.regular_closing_days();
    let dates: Vec<String> = schedule
        .exceptional_closing_dates()
        .iter()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .collect();

    if wants_json(args.json, &config) {
        let out = json!({
            "weekdays": weekdays,
            "weekdaysIso": schedule.regular_closing_days_iso(),
            "dates": dates,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for day in weekdays {
            println!("{day}");
        }
        for date in dates {
            println!("{date}");
        }
    }
    Ok(())
}
