//! Valuation model module
//!
//! Intrinsic value and margin of safety from canonical metrics, plus a
//! moving-average trend classifier over daily history.

mod graham;
mod trend;

pub use graham::{value, GrahamModel, CURRENT_AAA_YIELD, GROWTH_RATE_PCT, RECENT_AAA_YIELD};
pub use trend::{Sentiment, TrendClassifier, TrendReading};

use crate::security::SecurityMetrics;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Divisor used when turning intrinsic value into a margin percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginConvention {
    /// `(value - price) / price * 100`
    PriceDivisor,
    /// `(value - price) / value * 100`, or -100 when value is zero
    ValueDivisor,
}

/// Valuation settings for one calling context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValuationConfig {
    /// Cap intrinsic value at `price * UPSIDE_CAP_MULTIPLE`
    pub apply_upside_cap: bool,
    pub margin: MarginConvention,
}

impl ValuationConfig {
    /// Ranked screening: capped, price divisor
    pub fn screening() -> Self {
        Self {
            apply_upside_cap: true,
            margin: MarginConvention::PriceDivisor,
        }
    }

    /// Single-security inspection: uncapped, price divisor
    pub fn detail() -> Self {
        Self {
            apply_upside_cap: false,
            margin: MarginConvention::PriceDivisor,
        }
    }

    /// Head-to-head comparison: uncapped, value divisor
    pub fn duel() -> Self {
        Self {
            apply_upside_cap: false,
            margin: MarginConvention::ValueDivisor,
        }
    }
}

/// Derived valuation, recomputed on every request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Non-negative fair value estimate
    pub intrinsic_value: Decimal,
    /// Signed margin of safety in percent
    pub margin_pct: Decimal,
    /// Whether the upside cap reduced the value
    pub capped: bool,
}

/// Trait for valuation model implementations
pub trait ValuationModel: Send + Sync {
    /// Value a security
    fn value(&self, metrics: &SecurityMetrics) -> ValuationResult;
}
