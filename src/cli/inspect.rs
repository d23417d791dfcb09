//! Inspect command implementation

use super::build_pipeline;
use super::screen::money;
use crate::config::Config;
use crate::model::{value, TrendClassifier, TrendReading, ValuationConfig, ValuationResult};
use crate::scoring::{score, Preset, ScoreResult, MAX_SCORE};
use crate::security::SecurityMetrics;
use clap::Args;
use std::path::Path;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Symbol or company name
    pub symbol: String,

    /// Skip the history fetch and trend reading
    #[arg(long)]
    pub no_trend: bool,
}

impl InspectArgs {
    pub async fn execute(&self, config: &Config, fixtures: Option<&Path>) -> anyhow::Result<()> {
        let pipeline = build_pipeline(config, fixtures)?;
        let metrics = pipeline
            .load(&self.symbol)
            .await
            .ok_or_else(|| anyhow::anyhow!("No usable quote for {}", self.symbol))?;

        let valuation = value(&metrics, ValuationConfig::detail());
        let result = score(&metrics, &valuation, Preset::Detail);

        let trend = if self.no_trend {
            None
        } else {
            let bars = pipeline.history(&metrics.symbol, config.trend.period).await;
            TrendClassifier::new(config.trend.short_window, config.trend.long_window)
                .classify(&bars)
        };

        print!("{}", render_detail(&metrics, &valuation, &result, trend.as_ref()));
        Ok(())
    }
}

/// Multi-section detail view
pub fn render_detail(
    metrics: &SecurityMetrics,
    valuation: &ValuationResult,
    result: &ScoreResult,
    trend: Option<&TrendReading>,
) -> String {
    let cur = metrics.currency.as_str();
    let mut out = String::new();

    out.push_str(&format!(
        "{} ({}) - {}\n\n",
        metrics.display_name, metrics.symbol, metrics.sector
    ));
    out.push_str(&format!("  Price            {}\n", money(cur, metrics.price)));
    out.push_str(&format!(
        "  Intrinsic value  {}\n",
        money(cur, valuation.intrinsic_value)
    ));
    out.push_str(&format!(
        "  Margin of safety {:.1}%\n",
        valuation.margin_pct.round_dp(1)
    ));
    out.push_str(&format!("  P/E              {:.1}\n", metrics.trailing_pe.round_dp(1)));
    match metrics.debt_to_equity {
        Some(debt) => out.push_str(&format!("  Debt/Equity      {:.1}\n", debt.round_dp(1))),
        None => out.push_str("  Debt/Equity      n/a\n"),
    }
    out.push_str(&format!(
        "  Dividend yield   {:.2}%\n",
        metrics.dividend_yield_pct.round_dp(2)
    ));
    out.push_str(&format!(
        "  Payout ratio     {:.1}%\n",
        metrics.payout_ratio_pct.round_dp(1)
    ));
    out.push_str(&format!(
        "  Cash per share   {}\n",
        money(cur, metrics.cash_per_share)
    ));

    out.push_str(&format!("\nScore {}/{}\n", result.score, MAX_SCORE));
    for r in &result.positives {
        out.push_str(&format!("  + {}\n", r));
    }
    for r in &result.negatives {
        out.push_str(&format!("  - {}\n", r));
    }

    if let Some(t) = trend {
        out.push_str(&format!(
            "\nTrend {} (close {}, SMA {}, SMA {})\n",
            t.sentiment,
            money(cur, t.last_close),
            money(cur, t.short_sma),
            money(cur, t.long_sma)
        ));
    }
    out
}
