//! CLI interface for value-screen
//!
//! Provides subcommands for:
//! - `screen`: Rank the configured universe
//! - `duel`: Compare two securities head to head
//! - `inspect`: Detailed view of one security
//! - `watch`: Re-screen on a timer and raise alerts
//! - `status`: Show the exchange session
//! - `config`: Show configuration

mod duel;
mod inspect;
mod screen;
mod watch;

pub use duel::DuelArgs;
pub use inspect::InspectArgs;
pub use screen::ScreenArgs;
pub use watch::WatchArgs;

use crate::config::Config;
use crate::pipeline::Pipeline;
use crate::quote::{InMemoryProvider, QuoteProvider, YahooClient};
use crate::security::Normalizer;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "value-screen")]
#[command(about = "Graham-style valuation, scoring and screening for equities")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Serve quotes from a JSON fixture file instead of the network
    #[arg(long, global = true)]
    pub fixtures: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank the configured universe by score
    Screen(ScreenArgs),
    /// Compare two securities head to head
    Duel(DuelArgs),
    /// Detailed valuation, score and trend for one security
    Inspect(InspectArgs),
    /// Re-screen periodically and raise alerts
    Watch(WatchArgs),
    /// Show the exchange session
    Status,
    /// Show configuration
    Config,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Quote provider for this run: fixtures when given, otherwise the live API
pub fn build_provider(
    config: &Config,
    fixtures: Option<&Path>,
) -> anyhow::Result<Arc<dyn QuoteProvider>> {
    match fixtures {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            tracing::info!(path = %path.display(), "Using fixture quotes");
            Ok(Arc::new(InMemoryProvider::from_json(&json)?))
        }
        None => Ok(Arc::new(YahooClient::with_config(config.provider.yahoo())?)),
    }
}

/// Evaluation pipeline for this run
pub fn build_pipeline(config: &Config, fixtures: Option<&Path>) -> anyhow::Result<Pipeline> {
    let provider = build_provider(config, fixtures)?;
    Ok(Pipeline::new(
        provider,
        Normalizer::new(config.provider.default_currency.clone()),
    ))
}
