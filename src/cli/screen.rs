//! Screen command implementation

use super::{build_pipeline, OutputFormat};
use crate::config::Config;
use crate::screener::{ScreenReport, Screener};
use clap::Args;
use rust_decimal::Decimal;
use std::path::Path;

#[derive(Args, Debug)]
pub struct ScreenArgs {
    /// Symbols to screen instead of the configured universe
    #[arg(long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Rows to print (overrides config; 0 prints all)
    #[arg(long)]
    pub top: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl ScreenArgs {
    pub async fn execute(&self, config: &Config, fixtures: Option<&Path>) -> anyhow::Result<()> {
        let universe = if self.symbols.is_empty() {
            config.screener.universe.clone()
        } else {
            self.symbols.clone()
        };
        let top = self.top.unwrap_or(config.screener.top_n);

        let screener = Screener::new(build_pipeline(config, fixtures)?);
        tracing::info!(symbols = universe.len(), "Screening universe");
        let report = screener.screen(&universe).await;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Table => print!("{}", render_table(&report, top)),
        }
        Ok(())
    }
}

/// Ranked table followed by the skipped symbols
pub fn render_table(report: &ScreenReport, top: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<4} {:>5}  {:<8} {:<28} {:>10} {:>10} {:>9}\n",
        "#", "SCORE", "SYMBOL", "NAME", "PRICE", "VALUE", "MARGIN"
    ));

    for (i, entry) in report.top(top).iter().enumerate() {
        let name: String = entry.name.chars().take(28).collect();
        out.push_str(&format!(
            "{:<4} {:>2}/20  {:<8} {:<28} {:>10} {:>10} {:>8}%\n",
            i + 1,
            entry.score,
            entry.symbol,
            name,
            money(&entry.currency, entry.price),
            money(&entry.currency, entry.intrinsic_value),
            format!("{:.1}", entry.margin_pct.round_dp(1)),
        ));
    }

    if !report.failures.is_empty() {
        out.push_str(&format!("\nNo usable quote: {}\n", report.failures.join(", ")));
    }
    out
}

/// Currency-prefixed amount with two decimals
pub(crate) fn money(currency: &str, amount: Decimal) -> String {
    format!("{}{:.2}", currency, amount.round_dp(2))
}
