mod commands;
mod logging;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::Context;

#[derive(Parser)]
#[command(name = "sinulog")]
#[command(about = "Browse the Sinulog festival schedule, find venues and add events to your calendar")]
struct Cli {
    /// Load events from this JSON file instead of the bundled schedule
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every day that has events
    Dates,
    /// Show the events of one day (defaults to today or the next festival day)
    Day {
        /// Day to show, e.g. "January 19 2025" or "2025-01-19"
        date: Option<String>,
    },
    /// Search event names and details across all days
    Search {
        query: String,
    },
    /// Find where an event takes place
    Locate {
        /// Event name (case-insensitive)
        event: String,

        /// Day of the event, when it runs on several days
        #[arg(short, long)]
        date: Option<String>,

        /// Open the venue in Google Maps
        #[arg(long)]
        open: bool,
    },
    /// Add an event to your calendar
    Calendar {
        /// Event name (case-insensitive)
        event: String,

        /// Day of the event, when it runs on several days
        #[arg(short, long)]
        date: Option<String>,

        /// Open the Google Calendar link in your browser
        #[arg(long)]
        open: bool,

        /// Also write an .ics file (a directory gets a generated file name)
        #[arg(long)]
        ics: Option<PathBuf>,
    },
    /// List the venues that can be shown on a map
    Locations,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let ctx = Context::load(cli.data.as_deref())?;

    match cli.command {
        Commands::Dates => commands::dates::run(&ctx),
        Commands::Day { date } => commands::day::run(&ctx, date.as_deref()),
        Commands::Search { query } => commands::search::run(&ctx, &query),
        Commands::Locate { event, date, open } => {
            commands::locate::run(&ctx, &event, date.as_deref(), open)
        }
        Commands::Calendar {
            event,
            date,
            open,
            ics,
        } => commands::calendar::run(&ctx, &event, date.as_deref(), open, ics.as_deref()),
        Commands::Locations => commands::locations::run(&ctx),
    }
}
