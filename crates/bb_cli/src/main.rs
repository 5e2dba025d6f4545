//! Baseball Simulation CLI
//!
//! Runs a game or a season from JSON requests and inspects stored
//! event streams.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use bb_core::{GameConfig, GameReport, GameRequest};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::collections::BTreeMap;
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use tracing::info;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "bb_cli")]
#[command(about = "Simulate baseball games pitch by pitch", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Simulate a single game
    Simulate {
        /// Game request JSON file
        #[arg(long)]
        input: PathBuf,

        /// YAML game config (replaces the request's config)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Seed override
        #[arg(long)]
        seed: Option<u64>,

        /// Write the compressed event stream here
        #[arg(long)]
        store: Option<PathBuf>,

        /// Print the play-by-play log
        #[arg(long, default_value = "false")]
        log: bool,

        /// Write the full report JSON here
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Simulate a list of games in parallel and print standings
    Season {
        /// JSON array of game requests
        #[arg(long)]
        input: PathBuf,

        /// Write the season report JSON here
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Summarize a stored event stream
    Inspect {
        /// Event store file written by `simulate --store`
        #[arg(long)]
        store: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { input, config, seed, store, log, out } => {
            let request = load_request(&input, config.as_deref(), seed, store)?;
            info!(id_game = request.id_game, input = %input.display(), "Simulating game");

            let report = bb_core::simulate_game(request).context("simulation failed")?;

            if log {
                for line in &report.log {
                    println!("{}", line);
                }
                println!();
            }
            print_report(&report);

            if let Some(path) = out {
                write_json(&path, &report)?;
            }
        }

        Commands::Season { input, out } => {
            let raw = std::fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let requests: Vec<GameRequest> =
                serde_json::from_str(&raw).with_context(|| format!("parsing {}", input.display()))?;

            let season = bb_core::simulate_season(requests).context("season failed")?;

            println!("{:<6} {:>4} {:>4} {:>6} {:>5} {:>5}", "Team", "W", "L", "Pct", "RS", "RA");
            for row in &season.standings {
                println!(
                    "{:<6} {:>4} {:>4} {:>6.3} {:>5} {:>5}",
                    row.abbreviation,
                    row.wins,
                    row.losses,
                    row.winning_percentage(),
                    row.runs_scored,
                    row.runs_allowed
                );
            }

            if let Some(path) = out {
                write_json(&path, &season)?;
            }
        }

        Commands::Inspect { store } => {
            let events = bb_core::EventStore::load(&store)
                .with_context(|| format!("loading {}", store.display()))?;

            println!("{}: {} events", store.display(), events.len());
            for (kind, count) in event_histogram(&events) {
                println!("   {:<18} {}", kind, count);
            }
        }
    }

    Ok(())
}

/// Reads a game request and applies command-line overrides. A YAML config
/// replaces the request's config before the seed override is applied.
#[cfg(feature = "cli")]
fn load_request(
    input: &Path,
    config: Option<&Path>,
    seed: Option<u64>,
    store: Option<PathBuf>,
) -> Result<GameRequest> {
    let raw = std::fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let mut request: GameRequest =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", input.display()))?;

    if let Some(path) = config {
        let cfg = GameConfig::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?;
        request.config = Some(cfg);
    }
    if seed.is_some() {
        request.seed = seed;
    }
    if let Some(path) = store {
        let mut cfg = request.config.take().unwrap_or_default();
        cfg.event_store_path = Some(path);
        request.config = Some(cfg);
    }
    Ok(request)
}

#[cfg(feature = "cli")]
fn print_report(report: &GameReport) {
    let score = &report.box_score;
    println!("Game {} at {}: {}", score.id_game, score.park.name, score.headline());
    print!("{}", score.line_score());
    println!(
        "   W: {} {}   L: {} {}",
        score.pitcher_win.first_name,
        score.pitcher_win.last_name,
        score.pitcher_loss.first_name,
        score.pitcher_loss.last_name
    );
    println!("   Events: {}", report.event_count);
    if let Some(path) = &report.store.path {
        println!("   Stored: {} ({} bytes)", path.display(), report.store.bytes);
    }
}

#[cfg(feature = "cli")]
fn event_histogram(events: &[bb_core::GameEvent]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for event in events {
        *counts.entry(event.kind()).or_insert(0) += 1;
    }
    counts
}

#[cfg(feature = "cli")]
fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "Report written");
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("bb_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
