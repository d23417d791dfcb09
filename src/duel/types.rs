//! Duel types

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Duel errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DuelError {
    /// One side has no usable quote
    #[error("No usable quote for {0}")]
    QuoteUnavailable(String),
}

/// Side of a duel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DuelSide {
    A,
    B,
}

/// How a criterion decides its winner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherWins,
    LowerWins,
    /// Shown but never awards a point
    DisplayOnly,
}

/// Compared attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Criterion {
    Price,
    IntrinsicValue,
    MarginOfSafety,
    DebtToEquity,
    DividendYield,
    PayoutRatio,
}

impl Criterion {
    /// Display order
    pub const ALL: [Criterion; 6] = [
        Criterion::Price,
        Criterion::IntrinsicValue,
        Criterion::MarginOfSafety,
        Criterion::DebtToEquity,
        Criterion::DividendYield,
        Criterion::PayoutRatio,
    ];

    pub fn direction(&self) -> Direction {
        match self {
            Criterion::Price | Criterion::IntrinsicValue => Direction::DisplayOnly,
            Criterion::MarginOfSafety | Criterion::DividendYield => Direction::HigherWins,
            Criterion::DebtToEquity | Criterion::PayoutRatio => Direction::LowerWins,
        }
    }

    /// Winner between two values; exact ties award nobody
    pub fn winner(&self, a: Decimal, b: Decimal) -> Option<DuelSide> {
        match self.direction() {
            Direction::DisplayOnly => None,
            Direction::HigherWins if a > b => Some(DuelSide::A),
            Direction::HigherWins if b > a => Some(DuelSide::B),
            Direction::LowerWins if a < b => Some(DuelSide::A),
            Direction::LowerWins if b < a => Some(DuelSide::B),
            _ => None,
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Criterion::Price => "Price",
            Criterion::IntrinsicValue => "Intrinsic value",
            Criterion::MarginOfSafety => "Margin of safety %",
            Criterion::DebtToEquity => "Debt/Equity",
            Criterion::DividendYield => "Dividend yield %",
            Criterion::PayoutRatio => "Payout ratio %",
        };
        f.write_str(label)
    }
}

/// One compared attribute with both values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionRow {
    pub criterion: Criterion,
    pub a: Decimal,
    pub b: Decimal,
    pub winner: Option<DuelSide>,
}

/// Head-to-head comparison of two securities
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuelReport {
    pub symbol_a: String,
    pub name_a: String,
    pub symbol_b: String,
    pub name_b: String,
    pub currency_a: String,
    pub currency_b: String,
    pub rows: Vec<CriterionRow>,
    pub points_a: u8,
    pub points_b: u8,
    pub verdict: DuelSide,
}

impl DuelReport {
    /// Display name of the verdict side
    pub fn verdict_name(&self) -> &str {
        match self.verdict {
            DuelSide::A => &self.name_a,
            DuelSide::B => &self.name_b,
        }
    }

    /// Row for a criterion
    pub fn row(&self, criterion: Criterion) -> Option<&CriterionRow> {
        self.rows.iter().find(|r| r.criterion == criterion)
    }
}
