//! Screener module
//!
//! Evaluates a universe of symbols one after another and ranks them by
//! screening score. Symbols without a usable quote are reported separately
//! and never ranked.

use crate::model::{value, ValuationConfig};
use crate::pipeline::Pipeline;
use crate::scoring::ScoringPolicy;
use crate::telemetry::{increment, set_gauge, CounterMetric, GaugeMetric};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// One ranked row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub score: u8,
    pub symbol: String,
    pub name: String,
    pub margin_pct: Decimal,
    pub price: Decimal,
    /// Capped screening value
    pub intrinsic_value: Decimal,
    pub currency: String,
}

/// Result of one screening pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScreenReport {
    /// Best score first; equal scores keep universe order
    pub ranked: Vec<RankedEntry>,
    /// Queries that produced no usable quote, in universe order
    pub failures: Vec<String>,
}

impl ScreenReport {
    /// The first `n` ranked rows (`0` means all)
    pub fn top(&self, n: usize) -> &[RankedEntry] {
        if n == 0 || n >= self.ranked.len() {
            &self.ranked
        } else {
            &self.ranked[..n]
        }
    }
}

/// Sequential universe screener
pub struct Screener {
    pipeline: Pipeline,
    valuation: ValuationConfig,
    policy: ScoringPolicy,
}

impl Screener {
    /// Screener with capped valuation and screener weights
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            valuation: ValuationConfig::screening(),
            policy: ScoringPolicy::screener(),
        }
    }

    /// Score and rank every symbol in `universe`
    pub async fn screen(&self, universe: &[String]) -> ScreenReport {
        let mut report = ScreenReport::default();

        for query in universe {
            let Some(metrics) = self.pipeline.load(query).await else {
                tracing::info!(symbol = %query, "Skipping symbol without quote");
                increment(CounterMetric::SymbolsFailed);
                report.failures.push(query.clone());
                continue;
            };

            let valuation = value(&metrics, self.valuation);
            let result = self.policy.score(&metrics, &valuation);
            increment(CounterMetric::SymbolsEvaluated);

            tracing::debug!(
                symbol = %metrics.symbol,
                score = result.score,
                margin = %valuation.margin_pct,
                "Symbol scored"
            );

            report.ranked.push(RankedEntry {
                score: result.score,
                symbol: metrics.symbol,
                name: metrics.display_name,
                margin_pct: valuation.margin_pct,
                price: metrics.price,
                intrinsic_value: valuation.intrinsic_value,
                currency: metrics.currency,
            });
        }

        // Stable sort keeps universe order among equal scores
        report.ranked.sort_by(|a, b| b.score.cmp(&a.score));

        if let Some(best) = report.ranked.first() {
            set_gauge(GaugeMetric::TopScore, f64::from(best.score));
        }
        set_gauge(
            GaugeMetric::RankedCount,
            report.ranked.len().to_f64().unwrap_or_default(),
        );

        tracing::info!(
            ranked = report.ranked.len(),
            failed = report.failures.len(),
            "Screen complete"
        );

        report
    }
}
