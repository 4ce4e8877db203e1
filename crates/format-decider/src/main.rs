//! Format Decider - pick a ranking or one-sitting video for a franchise
//!
//! Runs the manual decision gates, asks the generator for an analysis (and
//! saves it to the library), estimates episode counts, and calibrates the
//! gate thresholds.

use advisor::GeminiClient;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use format_decider::{analyze_franchise, estimate_unit_count, evaluate, Verdict};
use shared::{
    BlobStore, Config, ContentVariety, CulturalPerception, Database, FandomVibe, FranchiseInput,
    LogConfig, MediaType, Settings,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Format Decider CLI arguments
#[derive(Parser, Debug)]
#[command(name = "format-decider")]
#[command(about = "Decide between a ranking and a one-sitting video")]
struct Args {
    /// Configuration file path
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
    /// Walk the manual gates
    Check {
        /// tv or movie
        #[arg(long)]
        media_type: MediaType,

        /// Episode or movie count
        #[arg(long)]
        count: u32,

        /// Average length in minutes
        #[arg(long, default_value = "20")]
        length: u32,

        /// legendary or standard
        #[arg(long, default_value = "standard")]
        culture: CulturalPerception,

        /// high or repetitive
        #[arg(long, default_value = "repetitive")]
        variety: ContentVariety,

        /// debate or chaos (needed only if every earlier gate passes)
        #[arg(long)]
        fandom: Option<FandomVibe>,
    },

    /// Ask the generator and save the result to the library
    Analyze {
        /// Franchise name, e.g. "Naruto"
        franchise: String,
    },

    /// Estimate the episode or movie count
    Autofill {
        franchise: String,

        /// tv or movie
        #[arg(long, default_value = "tv")]
        media_type: MediaType,
    },

    /// Show or change the gate thresholds
    Calibrate {
        /// Episode count that forces one-sitting for TV (300-1000)
        #[arg(long)]
        episodes: Option<u32>,

        /// Runtime hours that force one-sitting for TV (50-300)
        #[arg(long)]
        hours: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    shared::logging::init(LogConfig::for_component(&config, "format-decider", args.verbose))?;

    let db_path = config.database_path();
    let store = BlobStore::new(Database::open(&db_path).context("Failed to open database")?);
    let settings = store.settings_or(config.calibration.settings())?;

    match args.command {
        Command::Check {
            media_type,
            count,
            length,
            culture,
            variety,
            fandom,
        } => {
            let input = FranchiseInput {
                media_type,
                unit_count: count,
                average_unit_length_minutes: length,
                cultural_perception: culture,
                content_variety: variety,
                fandom_vibe: fandom,
            };
            match evaluate(&input, &settings) {
                Ok(verdict) => print_verdict(&verdict),
                Err(e) => {
                    eprintln!("{} ({})", e.user_message(), e);
                    return Ok(ExitCode::from(2));
                }
            }
        }

        Command::Analyze { franchise } => {
            let client = GeminiClient::new(&config.generator)?;
            let mut library = store.library()?;

            match analyze_franchise(&client, &mut library, &settings, &franchise).await {
                Ok(None) => println!("Enter a franchise name to analyze."),
                Ok(Some(outcome)) => {
                    print_verdict(&outcome.verdict);
                    println!(
                        "Virality: {}/10  Trend: {}",
                        outcome.advisory.virality_score, outcome.advisory.trend
                    );
                    match outcome.saved_id {
                        Some(id) => {
                            store.save_library(&library)?;
                            println!("Saved to library as #{}", id);
                        }
                        None => println!("Already in library, not saved again"),
                    }
                }
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    info!(error = %e, "Analysis failed");
                    return Ok(ExitCode::from(2));
                }
            }
        }

        Command::Autofill {
            franchise,
            media_type,
        } => {
            let client = GeminiClient::new(&config.generator)?;
            match estimate_unit_count(&client, &franchise, media_type).await {
                Some(count) => println!("{}", count),
                None => eprintln!("No estimate available for {}", franchise),
            }
        }

        Command::Calibrate { episodes, hours } => {
            if episodes.is_none() && hours.is_none() {
                print_settings(&settings);
                return Ok(ExitCode::SUCCESS);
            }

            let updated = Settings {
                episode_absurd_threshold: episodes.unwrap_or(settings.episode_absurd_threshold),
                runtime_hours_threshold: hours.unwrap_or(settings.runtime_hours_threshold),
            };
            updated.validate()?;
            store.save_settings(&updated)?;
            info!(
                episodes = updated.episode_absurd_threshold,
                hours = updated.runtime_hours_threshold,
                "Thresholds updated"
            );
            print_settings(&updated);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_verdict(verdict: &Verdict) {
    println!("Verdict: {}", verdict.format);
    if let Some(gate) = verdict.decided_by {
        println!("Decided at: {} gate", gate);
    }
    if !verdict.rationale.is_empty() {
        println!("Why: {}", verdict.rationale);
    }
    println!();
    println!("{}", verdict.format.pitch());
}

fn print_settings(settings: &Settings) {
    println!(
        "Episode absurdity threshold: {} episodes",
        settings.episode_absurd_threshold
    );
    println!(
        "Runtime threshold: {} hours",
        settings.runtime_hours_threshold
    );
}
