//! Watch command implementation

use super::build_pipeline;
use crate::alert::{collect_alerts, dispatch, LogNotifier, Notifier};
use crate::config::Config;
use crate::screener::Screener;
use crate::session::{MarketClock, Session};
use clap::Args;
use std::path::Path;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Seconds between screens (overrides config)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Stop after this many screens
    #[arg(long)]
    pub iterations: Option<u64>,

    /// Screen even when the exchange is closed
    #[arg(long)]
    pub always: bool,
}

impl WatchArgs {
    pub async fn execute(&self, config: &Config, fixtures: Option<&Path>) -> anyhow::Result<()> {
        let screener = Screener::new(build_pipeline(config, fixtures)?);
        let clock = MarketClock::from_config(&config.session)?;
        let notifier = LogNotifier;

        let secs = self.interval.unwrap_or(config.watch.interval_secs).max(1);
        let mut ticker = tokio::time::interval(Duration::from_secs(secs));
        let mut runs = 0u64;

        tracing::info!(interval_secs = secs, "Watching universe");

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted, stopping watch");
                    break;
                }
            }

            let session = clock.session_now();
            if !self.always && session == Session::Closed {
                tracing::debug!(%session, "Exchange closed, skipping screen");
                continue;
            }

            let report = screener.screen(&config.screener.universe).await;
            let alerts = collect_alerts(&config.alerts, &report.ranked);
            let delivered = dispatch(&notifier as &dyn Notifier, &alerts).await;
            tracing::info!(
                %session,
                ranked = report.ranked.len(),
                alerts = delivered,
                "Watch cycle complete"
            );

            runs += 1;
            if self.iterations.is_some_and(|max| runs >= max) {
                break;
            }
        }

        Ok(())
    }
}
