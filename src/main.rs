//! Twinview - Digital twin fleet dashboard for the terminal
//!
//! Simulates a small fleet of industrial assets and renders it as a live
//! dashboard: a site map, per-asset monitoring, an operator control center
//! and historical analytics.

mod analytics;
mod config;
mod control;
mod core;
mod map;
mod report;
mod sim;
mod ui;

use anyhow::Result;
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{Config, SimSettings};
use crate::core::app::App;
use crate::sim::{AssetStore, ChaChaSource, HistoryBuffer, HistoryRange, SampleGenerator};
use crate::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "twinview")]
#[command(author = "Twinview Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Digital twin fleet dashboard for the terminal", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed every random source for a reproducible run
    #[arg(long, global = true, env = "TWINVIEW_SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the fleet simulation headless and print the result
    Simulate {
        /// Number of fleet ticks to apply
        #[arg(short, long, default_value = "10")]
        ticks: u64,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print a freshly back-filled history window
    History {
        /// Look-back range (1h, 6h, 24h)
        #[arg(short, long, default_value = "1h")]
        range: HistoryRange,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write the default configuration file
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

fn setup_logging(verbosity: u8) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // The TUI owns the terminal, so logs only go to file
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("twinview")
        .join("logs");

    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "twinview.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = path.or_else(|| Config::default_path().filter(|p| p.exists()));

    match config_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            Config::load(&path)
        }
        None => Ok(Config::default()),
    }
}

fn simulate(settings: &SimSettings, ticks: u64, json: bool) -> Result<()> {
    let mut rng = ChaChaSource::new(settings.seed);
    let mut fleet = AssetStore::with_default_fleet(settings.channels, Utc::now());
    for _ in 0..ticks {
        fleet.tick(&mut rng, Utc::now());
    }
    report::print_fleet(fleet.generation(), fleet.entities(), &fleet.aggregate(), json)
}

fn history(settings: &SimSettings, range: HistoryRange, json: bool) -> Result<()> {
    let mut rng = ChaChaSource::new(settings.seed);
    let mut buffer = HistoryBuffer::new(range);
    buffer.backfill(range, Local::now(), &SampleGenerator, &mut rng);
    report::print_history(&buffer, json)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive for the duration of the program
    let _logging_guard = setup_logging(cli.verbose)?;

    if let Some(Commands::Init { force }) = cli.command {
        let path = cli
            .config
            .or_else(Config::default_path)
            .ok_or_else(|| anyhow::anyhow!("no config directory available"))?;
        return config::init_config(&path, force);
    }

    let config = load_config(cli.config)?;
    let mut settings = config.validate()?;
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }

    match cli.command {
        Some(Commands::Simulate { ticks, json }) => simulate(&settings, ticks, json)?,
        Some(Commands::History { range, json }) => history(&settings, range, json)?,
        Some(Commands::Init { .. }) => {}
        None => {
            // Launch the main TUI
            let theme = Theme::from_name(&config.display.theme);
            let rng = Box::new(ChaChaSource::new(settings.seed));
            let mut app = App::new(settings, theme, rng)?;
            app.run().await?;
        }
    }

    Ok(())
}
