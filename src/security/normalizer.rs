//! Raw quote → canonical metrics
//!
//! The only hard requirement is a strictly positive current price. Every
//! other missing or non-finite field degrades to its default.

use super::SecurityMetrics;
use crate::quote::RawQuote;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Currency label used when the provider reports none
pub const DEFAULT_CURRENCY: &str = "$";

/// P/E assumed when neither a reported nor a derivable value exists
pub const FALLBACK_PE: Decimal = dec!(50);

const HUNDRED: Decimal = dec!(100);

/// Normalizer with a configurable default currency label
#[derive(Debug, Clone)]
pub struct Normalizer {
    default_currency: String,
}

impl Normalizer {
    /// Create a normalizer that labels currency-less records with `default_currency`
    pub fn new(default_currency: impl Into<String>) -> Self {
        Self {
            default_currency: default_currency.into(),
        }
    }

    /// Convert a raw record; `None` when there is no usable current price
    pub fn normalize(&self, raw: &RawQuote) -> Option<SecurityMetrics> {
        let price = to_decimal(raw.current_price).filter(|p| *p > Decimal::ZERO)?;

        let trailing_eps = to_decimal(raw.trailing_eps).unwrap_or_default();
        let forward_eps = to_decimal(raw.forward_eps).unwrap_or_default();
        let dividend_rate = to_decimal(raw.dividend_rate).unwrap_or_default();
        let dividend_yield_raw = to_decimal(raw.dividend_yield).unwrap_or_default();

        let mut metrics = SecurityMetrics {
            symbol: raw.symbol.clone(),
            display_name: non_blank(&raw.long_name)
                .or_else(|| non_blank(&raw.short_name))
                .unwrap_or_else(|| raw.symbol.clone()),
            price,
            trailing_eps,
            forward_eps,
            trailing_pe: FALLBACK_PE,
            debt_to_equity: to_decimal(raw.debt_to_equity),
            dividend_rate,
            dividend_yield_raw,
            dividend_yield_pct: dividend_yield_pct(dividend_rate, dividend_yield_raw, price),
            payout_ratio_pct: to_decimal(raw.payout_ratio)
                .and_then(|p| p.checked_mul(HUNDRED))
                .unwrap_or_default(),
            cash_per_share: to_decimal(raw.total_cash_per_share).unwrap_or_default(),
            currency: raw
                .currency
                .clone()
                .unwrap_or_else(|| self.default_currency.clone()),
            sector: raw.sector.clone().unwrap_or_else(|| "N/A".to_string()),
        };

        let eps = metrics.effective_eps();
        metrics.trailing_pe = match to_decimal(raw.trailing_pe) {
            Some(pe) => pe,
            None if eps > Decimal::ZERO => price.checked_div(eps).unwrap_or(FALLBACK_PE),
            None => FALLBACK_PE,
        };

        Some(metrics)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}

/// Normalize with the default currency label
pub fn normalize(raw: &RawQuote) -> Option<SecurityMetrics> {
    Normalizer::default().normalize(raw)
}

/// Yield in percent: from the dividend rate when usable, else the raw fraction
fn dividend_yield_pct(rate: Decimal, raw_yield: Decimal, price: Decimal) -> Decimal {
    let from_rate = if rate > Decimal::ZERO {
        rate.checked_div(price)
            .and_then(|y| y.checked_mul(HUNDRED))
    } else {
        None
    };
    from_rate
        .or_else(|| raw_yield.checked_mul(HUNDRED))
        .unwrap_or_default()
}

/// Trimmed-empty names count as missing
fn non_blank(name: &Option<String>) -> Option<String> {
    name.as_ref()
        .filter(|n| !n.trim().is_empty())
        .cloned()
}

/// NaN, infinities and out-of-range values count as missing
fn to_decimal(value: Option<f64>) -> Option<Decimal> {
    value.and_then(|v| Decimal::try_from(v).ok())
}
