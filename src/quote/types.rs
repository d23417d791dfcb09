//! Quote provider types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Quote provider errors
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure (connect, timeout, TLS)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success response from the provider
    #[error("Quote API error: {status} - {body}")]
    Status { status: u16, body: String },
    /// Response body did not match the expected shape
    #[error("Failed to decode provider response: {0}")]
    Decode(String),
    /// Provider has no data for the ticker
    #[error("No data for symbol: {0}")]
    NotFound(String),
}

/// Sparse quote/fundamental record as returned by a provider.
///
/// Every field except `symbol` may be missing; providers pass through what
/// they get and leave defaulting to the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawQuote {
    /// Ticker the record was requested for
    pub symbol: String,
    pub current_price: Option<f64>,
    pub trailing_eps: Option<f64>,
    pub forward_eps: Option<f64>,
    pub trailing_pe: Option<f64>,
    /// Debt-to-equity as reported (percent scale, 40 = 0.4x)
    pub debt_to_equity: Option<f64>,
    /// Annual dividend per share
    pub dividend_rate: Option<f64>,
    /// Dividend yield as a fraction
    pub dividend_yield: Option<f64>,
    /// Payout ratio as a fraction
    pub payout_ratio: Option<f64>,
    pub total_cash_per_share: Option<f64>,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    pub currency: Option<String>,
    pub sector: Option<String>,
}

impl RawQuote {
    /// Create an empty record for a ticker
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }
}

/// A single daily OHLC bar (only open and close are kept)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: Decimal,
    pub close: Decimal,
}

/// Lookback period for history requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HistoryPeriod {
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[default]
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
}

impl HistoryPeriod {
    /// Range parameter understood by the chart endpoint
    pub fn as_range(&self) -> &'static str {
        match self {
            HistoryPeriod::OneMonth => "1mo",
            HistoryPeriod::ThreeMonths => "3mo",
            HistoryPeriod::SixMonths => "6mo",
            HistoryPeriod::OneYear => "1y",
            HistoryPeriod::TwoYears => "2y",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_quote_new_is_sparse() {
        let raw = RawQuote::new("KO");
        assert_eq!(raw.symbol, "KO");
        assert!(raw.current_price.is_none());
        assert!(raw.sector.is_none());
    }

    #[test]
    fn test_raw_quote_deserialize_partial() {
        let raw: RawQuote =
            serde_json::from_str(r#"{"symbol": "KO", "current_price": 61.5}"#).unwrap();
        assert_eq!(raw.current_price, Some(61.5));
        assert!(raw.trailing_eps.is_none());
    }

    #[test]
    fn test_history_period_range() {
        assert_eq!(HistoryPeriod::OneYear.as_range(), "1y");
        assert_eq!(HistoryPeriod::default(), HistoryPeriod::OneYear);
        assert_eq!(HistoryPeriod::TwoYears.as_range(), "2y");
    }

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::Status {
            status: 404,
            body: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "Quote API error: 404 - Not Found");
    }
}
