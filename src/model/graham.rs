//! Graham intrinsic value model
//!
//! V = EPS * (8.5 + 2g) * Y_recent / Y_current
//!
//! with fixed g = 7 and AAA yields 4.4 / 3.5; there is no live bond-yield
//! lookup. Negative EPS values the security at zero.

use super::{MarginConvention, ValuationConfig, ValuationModel, ValuationResult};
use crate::security::SecurityMetrics;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// P/E of a no-growth company
const NO_GROWTH_PE: Decimal = dec!(8.5);

/// Assumed long-term growth rate in percent
pub const GROWTH_RATE_PCT: Decimal = dec!(7);

/// AAA corporate yield when the formula was calibrated
pub const RECENT_AAA_YIELD: Decimal = dec!(4.4);

/// AAA corporate yield assumed today
pub const CURRENT_AAA_YIELD: Decimal = dec!(3.5);

/// Screening cap: value never exceeds this multiple of price (+150%)
const UPSIDE_CAP_MULTIPLE: Decimal = dec!(2.5);

/// Margin reported when intrinsic value is zero under the value divisor
const NO_VALUE_MARGIN: Decimal = dec!(-100);

const HUNDRED: Decimal = dec!(100);

/// Graham-formula valuation model
#[derive(Debug, Clone, Copy)]
pub struct GrahamModel {
    config: ValuationConfig,
}

impl GrahamModel {
    /// Create a model for the given context
    pub fn new(config: ValuationConfig) -> Self {
        Self { config }
    }

    /// Uncapped intrinsic value; `None` when it exceeds the Decimal range
    pub fn intrinsic_value(eps: Decimal) -> Option<Decimal> {
        let eps = eps.max(Decimal::ZERO);
        eps.checked_mul(NO_GROWTH_PE + dec!(2) * GROWTH_RATE_PCT)?
            .checked_mul(RECENT_AAA_YIELD)?
            .checked_div(CURRENT_AAA_YIELD)
    }

    fn margin(&self, intrinsic_value: Decimal, price: Decimal) -> Decimal {
        let (gap, divisor) = match self.config.margin {
            MarginConvention::PriceDivisor => {
                if price.is_zero() {
                    return Decimal::ZERO;
                }
                (intrinsic_value - price, price)
            }
            MarginConvention::ValueDivisor => {
                if intrinsic_value <= Decimal::ZERO {
                    return NO_VALUE_MARGIN;
                }
                (intrinsic_value - price, intrinsic_value)
            }
        };

        // Saturate instead of overflowing
        gap.checked_div(divisor)
            .and_then(|ratio| ratio.checked_mul(HUNDRED))
            .unwrap_or(if gap.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            })
    }
}

impl ValuationModel for GrahamModel {
    fn value(&self, metrics: &SecurityMetrics) -> ValuationResult {
        let uncapped = Self::intrinsic_value(metrics.effective_eps());
        let (intrinsic_value, capped) = if self.config.apply_upside_cap {
            let cap = metrics
                .price
                .checked_mul(UPSIDE_CAP_MULTIPLE)
                .unwrap_or(Decimal::MAX);
            match uncapped {
                Some(v) if v <= cap => (v, false),
                _ => (cap, true),
            }
        } else {
            // An out-of-range value is treated like unusable earnings
            (uncapped.unwrap_or(Decimal::ZERO), false)
        };

        ValuationResult {
            intrinsic_value,
            margin_pct: self.margin(intrinsic_value, metrics.price),
            capped,
        }
    }
}

/// Value a security with the Graham model under `config`
pub fn value(metrics: &SecurityMetrics, config: ValuationConfig) -> ValuationResult {
    GrahamModel::new(config).value(metrics)
}
