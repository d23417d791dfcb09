//! Duel command implementation

use super::screen::money;
use super::{build_pipeline, OutputFormat};
use crate::config::Config;
use crate::duel::{Criterion, DuelComparator, DuelReport, DuelSide};
use clap::Args;
use rust_decimal::Decimal;
use std::path::Path;

#[derive(Args, Debug)]
pub struct DuelArgs {
    /// First symbol or company name
    pub a: String,

    /// Second symbol or company name
    pub b: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl DuelArgs {
    pub async fn execute(&self, config: &Config, fixtures: Option<&Path>) -> anyhow::Result<()> {
        let comparator = DuelComparator::new(build_pipeline(config, fixtures)?);
        let report = comparator.duel(&self.a, &self.b).await?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Table => print!("{}", render_duel(&report)),
        }
        Ok(())
    }
}

fn cell(report: &DuelReport, criterion: Criterion, side: DuelSide, value: Decimal) -> String {
    let currency = match side {
        DuelSide::A => &report.currency_a,
        DuelSide::B => &report.currency_b,
    };
    match criterion {
        Criterion::Price | Criterion::IntrinsicValue => money(currency, value),
        _ => format!("{:.2}", value.round_dp(2)),
    }
}

/// Side-by-side table with a marker on each winning cell
pub fn render_duel(report: &DuelReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<20} {:>14} {:>14}\n",
        "", report.symbol_a, report.symbol_b
    ));

    for row in &report.rows {
        let mark = |side: DuelSide| if row.winner == Some(side) { " *" } else { "  " };
        out.push_str(&format!(
            "{:<20} {:>12}{} {:>12}{}\n",
            row.criterion.to_string(),
            cell(report, row.criterion, DuelSide::A, row.a),
            mark(DuelSide::A),
            cell(report, row.criterion, DuelSide::B, row.b),
            mark(DuelSide::B),
        ));
    }

    out.push_str(&format!(
        "\nPoints: {} {} - {} {}\nVerdict: {}\n",
        report.symbol_a,
        report.points_a,
        report.points_b,
        report.symbol_b,
        report.verdict_name()
    ));
    out
}
