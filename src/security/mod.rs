//! Canonical per-security metrics
//!
//! Raw provider records are sparse; [`SecurityMetrics`] is the fully
//! defaulted form that valuation and scoring consume.

mod normalizer;

pub use normalizer::{normalize, Normalizer, DEFAULT_CURRENCY, FALLBACK_PE};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Debt-to-equity substituted when a missing ratio must count against a security
pub const DEBT_PENALTY_SENTINEL: Decimal = dec!(1000);

/// How a missing debt-to-equity ratio is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtPolicy {
    /// Missing ratio is unknown and earns neither bonus nor penalty
    Neutral,
    /// Missing ratio is replaced by the penalty sentinel
    Penalize,
}

/// Debt-to-equity as seen by one calling context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebtToEquity {
    /// Reported by the provider (percent scale)
    Known(Decimal),
    /// Missing, treated as neutral
    Unknown,
    /// Missing, treated as the penalty sentinel
    Penalized,
}

impl DebtToEquity {
    /// Resolve a possibly missing ratio under a policy
    pub fn resolve(value: Option<Decimal>, policy: DebtPolicy) -> Self {
        match (value, policy) {
            (Some(v), _) => DebtToEquity::Known(v),
            (None, DebtPolicy::Neutral) => DebtToEquity::Unknown,
            (None, DebtPolicy::Penalize) => DebtToEquity::Penalized,
        }
    }

    /// Numeric value for comparisons, `None` when unknown
    pub fn value(&self) -> Option<Decimal> {
        match self {
            DebtToEquity::Known(v) => Some(*v),
            DebtToEquity::Unknown => None,
            DebtToEquity::Penalized => Some(DEBT_PENALTY_SENTINEL),
        }
    }
}

/// Canonical, fully defaulted security record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityMetrics {
    /// Resolved ticker
    pub symbol: String,
    /// Long name, short name, or the symbol
    pub display_name: String,
    /// Current trade price, always strictly positive
    pub price: Decimal,
    pub trailing_eps: Decimal,
    pub forward_eps: Decimal,
    /// Reported P/E, or derived from price and EPS
    pub trailing_pe: Decimal,
    /// `None` when the provider did not report it
    pub debt_to_equity: Option<Decimal>,
    /// Annual dividend per share
    pub dividend_rate: Decimal,
    /// Provider yield as a fraction
    pub dividend_yield_raw: Decimal,
    /// Yield in percent, derived from rate and price when possible
    pub dividend_yield_pct: Decimal,
    /// Payout ratio in percent
    pub payout_ratio_pct: Decimal,
    pub cash_per_share: Decimal,
    /// Display only
    pub currency: String,
    /// Display only
    pub sector: String,
}

impl SecurityMetrics {
    /// Trailing EPS if positive, else forward EPS if positive, else zero
    pub fn effective_eps(&self) -> Decimal {
        if self.trailing_eps > Decimal::ZERO {
            self.trailing_eps
        } else if self.forward_eps > Decimal::ZERO {
            self.forward_eps
        } else {
            Decimal::ZERO
        }
    }

    /// Debt-to-equity under the given policy
    pub fn debt(&self, policy: DebtPolicy) -> DebtToEquity {
        DebtToEquity::resolve(self.debt_to_equity, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debt_resolve_known_ignores_policy() {
        assert_eq!(
            DebtToEquity::resolve(Some(dec!(40)), DebtPolicy::Penalize),
            DebtToEquity::Known(dec!(40))
        );
        assert_eq!(
            DebtToEquity::resolve(Some(dec!(40)), DebtPolicy::Neutral),
            DebtToEquity::Known(dec!(40))
        );
    }

    #[test]
    fn test_debt_resolve_missing() {
        let neutral = DebtToEquity::resolve(None, DebtPolicy::Neutral);
        let penalized = DebtToEquity::resolve(None, DebtPolicy::Penalize);
        assert_eq!(neutral, DebtToEquity::Unknown);
        assert_eq!(neutral.value(), None);
        assert_eq!(penalized, DebtToEquity::Penalized);
        assert_eq!(penalized.value(), Some(dec!(1000)));
    }
}
