use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;

mod commands;

#[derive(Parser)]
#[command(name = "openhours-cli", version, about = "Query weekly opening hours")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Is the schedule open at a moment
    Check(commands::check::CheckArgs),
    /// Next opening or closing
    Next {
        #[command(subcommand)]
        action: commands::next::NextAction,
    },
    /// Regular closing weekdays and exceptional closing dates
    ClosingDays(commands::closing_days::ClosingDaysArgs),
    /// Export structured data as JSON
    Export(commands::ScheduleArgs),
    /// Merge overlapping ranges and print the definition as JSON
    Normalize(commands::ScheduleArgs),
    /// Validate a schedule file
    Validate(commands::ScheduleArgs),
    /// Convert an opening_hours expression to a schedule definition
    Import {
        /// Expression such as "Mo-Fr 09:00-18:00; Sa 10:00-14:00"
        expression: String,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Check(args) => commands::check::run(args),
        Commands::Next { action } => commands::next::run(action),
        Commands::ClosingDays(args) => commands::closing_days::run(args),
        Commands::Export(args) => commands::export::run(args),
        Commands::Normalize(args) => commands::normalize::run(args),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Import { expression } => commands::import::run(&expression),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
