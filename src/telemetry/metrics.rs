//! Prometheus metrics

use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Quote provider round-trip
    QuoteFetch,
    /// Full evaluation of one symbol
    Evaluation,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Symbols that produced a score
    SymbolsEvaluated,
    /// Symbols skipped for missing quotes
    SymbolsFailed,
    /// Alerts handed to a notifier
    AlertsRaised,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Best score of the latest screen
    TopScore,
    /// Ranked entries in the latest screen
    RankedCount,
}

impl LatencyMetric {
    /// Exported histogram name
    pub fn name(&self) -> &'static str {
        match self {
            LatencyMetric::QuoteFetch => "valuescreen_quote_fetch_latency_ms",
            LatencyMetric::Evaluation => "valuescreen_evaluation_latency_ms",
        }
    }
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = metric.name();

    let value_ms = duration.as_secs_f64() * 1000.0;
    ::metrics::histogram!(metric_name).record(value_ms);
    tracing::trace!(metric = metric_name, value_ms, "Recording latency");
}

/// Increment a counter by one
pub fn increment(metric: CounterMetric) {
    let metric_name = match metric {
        CounterMetric::SymbolsEvaluated => "valuescreen_symbols_evaluated_total",
        CounterMetric::SymbolsFailed => "valuescreen_symbols_failed_total",
        CounterMetric::AlertsRaised => "valuescreen_alerts_raised_total",
    };

    ::metrics::counter!(metric_name).increment(1);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    let metric_name = match metric {
        GaugeMetric::TopScore => "valuescreen_last_top_score",
        GaugeMetric::RankedCount => "valuescreen_last_ranked_count",
    };

    ::metrics::gauge!(metric_name).set(value);
    tracing::trace!(metric = metric_name, value, "Setting gauge");
}
