//! Cooldown Scheduler - when is it safe to upload the next video?
//!
//! Keeps the last upload's facts in the planner database and prints the
//! computed cooldown, safe date and a six-week risk calendar.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use cooldown_scheduler::{compute_safe_date, month_grid, render_grid, CalendarDay, ScheduleUpdate};
use serde::Serialize;
use shared::{
    BlobStore, Config, Database, LogConfig, ScheduleState, ScheduleVerdict, Scope, VideoFormat,
};
use std::path::PathBuf;
use tracing::info;

/// Cooldown Scheduler CLI arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record the last upload and the next planned scope
    Update {
        /// Date of the last upload (YYYY-MM-DD)
        #[arg(long)]
        last_upload: Option<NaiveDate>,

        /// Scope of the last video: full or partial
        #[arg(long)]
        last_scope: Option<Scope>,

        /// Format of the last video: ranking or one_sitting
        #[arg(long)]
        last_format: Option<VideoFormat>,

        /// Scope of the next video: full or partial
        #[arg(long)]
        next_scope: Option<Scope>,
    },

    /// Show the cooldown verdict and risk calendar
    Show {
        /// Evaluate as of this date instead of today
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print JSON for a calendar renderer instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    shared::logging::init(LogConfig::for_component(&config, "cooldown-scheduler", args.verbose))?;

    let db_path = config.database_path();
    let store = BlobStore::new(Database::open(&db_path).context("Failed to open database")?);

    match args.command {
        Command::Update {
            last_upload,
            last_scope,
            last_format,
            next_scope,
        } => {
            let update = ScheduleUpdate {
                last_upload_date: last_upload,
                last_scope,
                last_format,
                next_scope,
            };
            let state = update.apply(store.schedule()?)?;
            store.save_schedule(&state)?;
            info!(
                last_upload = %state.last_upload_date,
                last_scope = %state.last_scope,
                last_format = %state.last_format,
                next_scope = %state.next_scope,
                "Schedule updated"
            );
            print_verdict(&state, &compute_safe_date(&state, Local::now().date_naive()));
        }

        Command::Show { today, json } => {
            let Some(state) = store.schedule()? else {
                println!("No upload recorded yet. Run `cooldown-scheduler update --last-upload YYYY-MM-DD`.");
                return Ok(());
            };
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let verdict = compute_safe_date(&state, today);

            if json {
                let output = CalendarOutput {
                    verdict: &verdict,
                    status: verdict.status_line(),
                    days: month_grid(state.last_upload_date, verdict.safe_date),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_verdict(&state, &verdict);
                println!();
                print!(
                    "{}",
                    render_grid(&month_grid(state.last_upload_date, verdict.safe_date))
                );
            }
        }
    }

    Ok(())
}

/// JSON document handed to calendar renderers
#[derive(Serialize)]
struct CalendarOutput<'a> {
    verdict: &'a ScheduleVerdict,
    status: String,
    days: Vec<CalendarDay>,
}

fn print_verdict(state: &ScheduleState, verdict: &ScheduleVerdict) {
    println!(
        "Last upload: {} ({} {}), next: {}",
        state.last_upload_date, state.last_scope, state.last_format, state.next_scope
    );
    println!(
        "Required cooldown: {} weeks, safe from {} [{}]",
        verdict.required_cooldown_weeks, verdict.safe_date, verdict.risk_level
    );
    println!("{}", verdict.status_line());
    if !verdict.rationale.is_empty() {
        println!("{}", verdict.rationale);
    }
}
