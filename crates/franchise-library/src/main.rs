//! Franchise Library - browse and curate analysed franchises
//!
//! Lists saved entries, adds hand-written ones, tracks competitor videos and
//! performance notes, and brainstorms titles and hooks for an entry.

use advisor::GeminiClient;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use franchise_library::{brainstorm, render_entry, render_ideas};
use shared::{BlobStore, Config, Database, LogConfig, ManualEntry, Performance, VideoFormat};
use std::path::PathBuf;
use tracing::info;

/// Franchise Library CLI arguments
#[derive(Parser, Debug)]
#[command(name = "franchise-library")]
#[command(about = "Browse and curate the franchise library")]
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
    /// List entries, newest first
    List,

    /// Add an entry by hand
    Add {
        #[arg(long)]
        title: String,

        /// ranking or one_sitting
        #[arg(long, default_value = "ranking")]
        format: VideoFormat,

        /// Published video link; marks the entry completed
        #[arg(long)]
        link: Option<String>,
    },

    /// Delete an entry
    Remove { id: i64 },

    /// Manage competitor video links
    Competitor {
        #[command(subcommand)]
        action: CompetitorAction,
    },

    /// Record views and click-through rate
    Performance {
        id: i64,

        #[arg(long)]
        views: Option<String>,

        #[arg(long)]
        ctr: Option<String>,
    },

    /// Generate titles, hooks and a thumbnail idea for an entry
    Brainstorm { id: i64 },
}

#[derive(Subcommand, Debug)]
enum CompetitorAction {
    Add { id: i64, url: String },
    /// Remove by position as shown in `list`
    Remove { id: i64, index: usize },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    shared::logging::init(LogConfig::for_component(&config, "franchise-library", args.verbose))?;

    let db_path = config.database_path();
    let store = BlobStore::new(Database::open(&db_path).context("Failed to open database")?);
    let mut library = store.library()?;

    match args.command {
        Command::List => {
            if library.is_empty() {
                println!("Library is empty.");
            }
            for entry in library.entries() {
                print!("{}", render_entry(entry));
            }
        }

        Command::Add { title, format, link } => {
            let id = library.add_manual(ManualEntry {
                title,
                format,
                link,
            })?;
            store.save_library(&library)?;
            println!("Added #{}", id);
        }

        Command::Remove { id } => {
            if !library.remove(id) {
                bail!("No library entry with id {}", id);
            }
            store.save_library(&library)?;
            info!(id = id, "Library entry removed");
            println!("Removed #{}", id);
        }

        Command::Competitor { action } => {
            match action {
                CompetitorAction::Add { id, url } => {
                    library.add_competitor(id, &url)?;
                    println!("Competitor added to #{}", id);
                }
                CompetitorAction::Remove { id, index } => {
                    let url = library.remove_competitor(id, index)?;
                    println!("Removed {} from #{}", url, id);
                }
            }
            store.save_library(&library)?;
        }

        Command::Performance { id, views, ctr } => {
            let current = library
                .get(id)
                .map(|e| e.performance.clone())
                .with_context(|| format!("No library entry with id {}", id))?;
            library.set_performance(
                id,
                Performance {
                    views: views.unwrap_or(current.views),
                    ctr: ctr.unwrap_or(current.ctr),
                },
            )?;
            store.save_library(&library)?;
            println!("Performance updated for #{}", id);
        }

        Command::Brainstorm { id } => {
            let entry = library
                .get(id)
                .with_context(|| format!("No library entry with id {}", id))?;
            let client = GeminiClient::new(&config.generator)?;
            match brainstorm(&client, entry).await {
                Some(ideas) => print!("{}", render_ideas(&ideas)),
                None => println!("No ideas this time, try again."),
            }
        }
    }

    Ok(())
}
