//! Alert module
//!
//! Threshold checks over a screen report and the notifier seam that
//! delivers them. The core never notifies on its own; `watch` drives it.

use crate::screener::RankedEntry;
use crate::telemetry::{increment, CounterMetric};
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alert thresholds
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlertConfig {
    /// Minimum screening score (inclusive)
    #[serde(default = "default_min_score")]
    pub min_score: u8,

    /// Minimum margin of safety in percent (inclusive)
    #[serde(default = "default_min_margin_pct")]
    pub min_margin_pct: Decimal,
}

fn default_min_score() -> u8 {
    16
}
fn default_min_margin_pct() -> Decimal {
    dec!(30)
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            min_margin_pct: default_min_margin_pct(),
        }
    }
}

impl AlertConfig {
    /// Whether a ranked entry meets both thresholds
    pub fn is_triggered(&self, entry: &RankedEntry) -> bool {
        entry.score >= self.min_score && entry.margin_pct >= self.min_margin_pct
    }
}

/// A ranked entry that crossed the alert thresholds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub symbol: String,
    pub name: String,
    pub score: u8,
    pub margin_pct: Decimal,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) score {}/20, margin {}%",
            self.name,
            self.symbol,
            self.score,
            self.margin_pct.round_dp(1)
        )
    }
}

/// Alerts for every triggered entry, in ranking order
pub fn collect_alerts(config: &AlertConfig, ranked: &[RankedEntry]) -> Vec<Alert> {
    ranked
        .iter()
        .filter(|e| config.is_triggered(e))
        .map(|e| Alert {
            symbol: e.symbol.clone(),
            name: e.name.clone(),
            score: e.score,
            margin_pct: e.margin_pct,
        })
        .collect()
}

/// Delivery channel for alerts
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, alert: &Alert) -> anyhow::Result<()>;
}

/// Notifier that writes alerts to the log
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, alert: &Alert) -> anyhow::Result<()> {
        tracing::warn!(
            symbol = %alert.symbol,
            score = alert.score,
            margin = %alert.margin_pct.round_dp(2),
            "Value alert: {}",
            alert
        );
        Ok(())
    }
}

/// Hand alerts to a notifier; returns how many were delivered.
///
/// A failed delivery is logged and does not stop the rest.
pub async fn dispatch(notifier: &dyn Notifier, alerts: &[Alert]) -> usize {
    let mut delivered = 0;
    for alert in alerts {
        match notifier.notify(alert).await {
            Ok(()) => {
                increment(CounterMetric::AlertsRaised);
                delivered += 1;
            }
            Err(e) => tracing::error!(symbol = %alert.symbol, error = %e, "Alert delivery failed"),
        }
    }
    delivered
}
