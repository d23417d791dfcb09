use clap::Parser;
use value_screen::cli::{Cli, Commands};
use value_screen::config::Config;
use value_screen::session::MarketClock;

const DEFAULT_CONFIG: &str = include_str!("../config.toml.example");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(DEFAULT_CONFIG)?
        }
    };

    // Initialize telemetry
    let _telemetry = value_screen::telemetry::init_telemetry(&config.telemetry)?;
    let fixtures = cli.fixtures.as_deref();

    match cli.command {
        Commands::Screen(args) => args.execute(&config, fixtures).await?,
        Commands::Duel(args) => args.execute(&config, fixtures).await?,
        Commands::Inspect(args) => args.execute(&config, fixtures).await?,
        Commands::Watch(args) => {
            tracing::info!("Starting watch mode");
            args.execute(&config, fixtures).await?;
        }
        Commands::Status => {
            let clock = MarketClock::from_config(&config.session)?;
            let now = chrono::Utc::now();
            println!("value-screen status");
            println!("  Exchange time: {}", clock.local_time(now).format("%a %Y-%m-%d %H:%M"));
            println!("  Session: {}", clock.session_at(now));
            println!(
                "  Universe: {} symbols",
                config.screener.universe.len()
            );
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Provider: {} (timeout {}s)",
                config.provider.base_url, config.provider.timeout_secs
            );
            println!(
                "  Screener: {} symbols, top {}",
                config.screener.universe.len(),
                config.screener.top_n
            );
            println!(
                "  Trend: SMA {}/{} over {}",
                config.trend.short_window,
                config.trend.long_window,
                config.trend.period.as_range()
            );
            println!(
                "  Alerts: score >= {}, margin >= {}%",
                config.alerts.min_score, config.alerts.min_margin_pct
            );
            println!("  Watch: every {}s", config.watch.interval_secs);
            println!(
                "  Session: {}-{} at UTC{:+}",
                config.session.open.format("%H:%M"),
                config.session.close.format("%H:%M"),
                config.session.utc_offset_hours
            );
        }
    }

    Ok(())
}
