//! Duel module
//!
//! Head-to-head comparison of two securities on four point-bearing
//! criteria. Side A takes the verdict with two or more points, so a 2–2
//! split goes to A.

mod types;

pub use types::{Criterion, CriterionRow, Direction, DuelError, DuelReport, DuelSide};

use crate::model::{value, ValuationConfig};
use crate::pipeline::Pipeline;
use crate::security::{DebtPolicy, SecurityMetrics};
use rust_decimal::Decimal;

/// Points side A needs to take the verdict
pub const POINTS_TO_WIN: u8 = 2;

/// Compare two canonical records
pub fn compare(a: &SecurityMetrics, b: &SecurityMetrics) -> DuelReport {
    let config = ValuationConfig::duel();
    let value_a = value(a, config);
    let value_b = value(b, config);
    let debt = |m: &SecurityMetrics| {
        m.debt(DebtPolicy::Penalize)
            .value()
            .unwrap_or(Decimal::ZERO)
    };

    let rows: Vec<CriterionRow> = Criterion::ALL
        .into_iter()
        .map(|criterion| {
            let (left, right) = match criterion {
                Criterion::Price => (a.price, b.price),
                Criterion::IntrinsicValue => (value_a.intrinsic_value, value_b.intrinsic_value),
                Criterion::MarginOfSafety => (value_a.margin_pct, value_b.margin_pct),
                Criterion::DebtToEquity => (debt(a), debt(b)),
                Criterion::DividendYield => (a.dividend_yield_pct, b.dividend_yield_pct),
                Criterion::PayoutRatio => (a.payout_ratio_pct, b.payout_ratio_pct),
            };
            CriterionRow {
                criterion,
                a: left,
                b: right,
                winner: criterion.winner(left, right),
            }
        })
        .collect();

    let points = |side: DuelSide| rows.iter().filter(|r| r.winner == Some(side)).count() as u8;
    let points_a = points(DuelSide::A);
    let points_b = points(DuelSide::B);

    DuelReport {
        symbol_a: a.symbol.clone(),
        name_a: a.display_name.clone(),
        symbol_b: b.symbol.clone(),
        name_b: b.display_name.clone(),
        currency_a: a.currency.clone(),
        currency_b: b.currency.clone(),
        rows,
        points_a,
        points_b,
        verdict: if points_a >= POINTS_TO_WIN {
            DuelSide::A
        } else {
            DuelSide::B
        },
    }
}

/// Loads both sides and compares them
pub struct DuelComparator {
    pipeline: Pipeline,
}

impl DuelComparator {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Compare two queries; fails when either side has no usable quote
    pub async fn duel(&self, query_a: &str, query_b: &str) -> Result<DuelReport, DuelError> {
        let a = self
            .pipeline
            .load(query_a)
            .await
            .ok_or_else(|| DuelError::QuoteUnavailable(query_a.to_string()))?;
        let b = self
            .pipeline
            .load(query_b)
            .await
            .ok_or_else(|| DuelError::QuoteUnavailable(query_b.to_string()))?;

        let report = compare(&a, &b);
        tracing::info!(
            a = %report.symbol_a,
            b = %report.symbol_b,
            points_a = report.points_a,
            points_b = report.points_b,
            "Duel decided"
        );
        Ok(report)
    }
}
