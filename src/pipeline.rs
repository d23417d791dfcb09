//! Symbol evaluation pipeline
//!
//! Resolver → provider quote → normalizer. Shared by the screener, the duel
//! comparator and the `inspect` command.

use crate::quote::{resolve, Bar, HistoryPeriod, QuoteProvider};
use crate::security::{Normalizer, SecurityMetrics};
use crate::telemetry::{record_latency, LatencyMetric};
use std::sync::Arc;
use std::time::Instant;

/// Loads canonical metrics for free-text queries
#[derive(Clone)]
pub struct Pipeline {
    provider: Arc<dyn QuoteProvider>,
    normalizer: Normalizer,
}

impl Pipeline {
    pub fn new(provider: Arc<dyn QuoteProvider>, normalizer: Normalizer) -> Self {
        Self {
            provider,
            normalizer,
        }
    }

    /// Resolve, fetch and normalize one query.
    ///
    /// Returns `None` when no usable quote exists. Provider errors are
    /// logged and treated as a missing quote.
    pub async fn load(&self, query: &str) -> Option<SecurityMetrics> {
        let start = Instant::now();
        let metrics = self.evaluate(query).await;
        record_latency(LatencyMetric::Evaluation, start.elapsed());
        metrics
    }

    async fn evaluate(&self, query: &str) -> Option<SecurityMetrics> {
        let query = query.trim().to_uppercase();
        let symbol = resolve(self.provider.as_ref(), &query).await;

        let raw = match self.provider.get_quote(&symbol).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(symbol = %symbol, error = %e, "Quote fetch failed");
                return None;
            }
        };

        let metrics = self.normalizer.normalize(&raw);
        if metrics.is_none() {
            tracing::debug!(symbol = %symbol, "Quote has no usable price");
        }
        metrics
    }

    /// Daily bars for a resolved symbol; empty on provider error
    pub async fn history(&self, symbol: &str, period: HistoryPeriod) -> Vec<Bar> {
        match self.provider.get_history(symbol, period).await {
            Ok(bars) => bars,
            Err(e) => {
                tracing::warn!(symbol, error = %e, "History fetch failed");
                Vec::new()
            }
        }
    }
}
