//! Yahoo Finance client
//!
//! Uses three public endpoints:
//! - `/v1/finance/search` for name → ticker resolution
//! - `/v10/finance/quoteSummary` for price and fundamentals
//! - `/v8/finance/chart` for daily history
//!
//! Every request carries the configured timeout so a stalled symbol cannot
//! block a screen indefinitely.

use super::{Bar, HistoryPeriod, ProviderError, QuoteProvider, RawQuote};
use crate::telemetry::{record_latency, LatencyMetric};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::{Duration, Instant};

/// Yahoo Finance API base URL
pub const YAHOO_API_URL: &str = "https://query1.finance.yahoo.com";

/// Modules requested from quoteSummary
const SUMMARY_MODULES: &str =
    "price,summaryDetail,defaultKeyStatistics,financialData,summaryProfile";

/// Browser-like user agent; the API rejects the default reqwest one
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Configuration for the Yahoo client
#[derive(Debug, Clone)]
pub struct YahooConfig {
    /// Base URL for all endpoints
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: YAHOO_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for the Yahoo Finance query API
pub struct YahooClient {
    config: YahooConfig,
    client: Client,
}

impl YahooClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_config(YahooConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: YahooConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { config, client })
    }

    /// GET a path and return the body, mapping non-2xx to `ProviderError::Status`
    async fn get_text(&self, path: &str, query: &[(&str, &str)]) -> Result<String, ProviderError> {
        let url = format!("{}{}", self.config.base_url, path);
        tracing::debug!(url = %url, "Requesting Yahoo Finance");

        let started = Instant::now();
        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;
        record_latency(LatencyMetric::QuoteFetch, started.elapsed());

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl QuoteProvider for YahooClient {
    async fn search_symbol(&self, text: &str) -> Result<Option<String>, ProviderError> {
        let body = self
            .get_text(
                "/v1/finance/search",
                &[("q", text), ("quotesCount", "5"), ("newsCount", "0")],
            )
            .await?;
        parse_search(&body)
    }

    async fn get_quote(&self, ticker: &str) -> Result<RawQuote, ProviderError> {
        let path = format!("/v10/finance/quoteSummary/{}", ticker);
        let body = self
            .get_text(&path, &[("modules", SUMMARY_MODULES)])
            .await?;
        parse_quote_summary(ticker, &body)
    }

    async fn get_history(
        &self,
        ticker: &str,
        period: HistoryPeriod,
    ) -> Result<Vec<Bar>, ProviderError> {
        let path = format!("/v8/finance/chart/{}", ticker);
        let body = self
            .get_text(&path, &[("range", period.as_range()), ("interval", "1d")])
            .await?;
        parse_chart(&body)
    }
}

/// `{"raw": 1.23, "fmt": "1.23"}`, or `{}` when Yahoo has no value
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct YahooValue {
    raw: Option<f64>,
}

fn raw(value: &Option<YahooValue>) -> Option<f64> {
    value.as_ref().and_then(|v| v.raw)
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<SearchQuote>,
}

#[derive(Debug, Deserialize)]
struct SearchQuote {
    symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryEnvelope {
    quote_summary: SummaryBody,
}

#[derive(Debug, Deserialize)]
struct SummaryBody {
    result: Option<Vec<SummaryResult>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SummaryResult {
    price: Option<PriceModule>,
    summary_detail: Option<SummaryDetail>,
    default_key_statistics: Option<KeyStatistics>,
    financial_data: Option<FinancialData>,
    summary_profile: Option<SummaryProfile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PriceModule {
    regular_market_price: Option<YahooValue>,
    long_name: Option<String>,
    short_name: Option<String>,
    currency_symbol: Option<String>,
    currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SummaryDetail {
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<YahooValue>,
    dividend_rate: Option<YahooValue>,
    dividend_yield: Option<YahooValue>,
    payout_ratio: Option<YahooValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct KeyStatistics {
    trailing_eps: Option<YahooValue>,
    forward_eps: Option<YahooValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FinancialData {
    current_price: Option<YahooValue>,
    debt_to_equity: Option<YahooValue>,
    total_cash_per_share: Option<YahooValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SummaryProfile {
    sector: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChartQuote {
    open: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
}

/// Parse a search response, taking the first quote that carries a symbol
fn parse_search(body: &str) -> Result<Option<String>, ProviderError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Decode(e.to_string()))?;

    Ok(response.quotes.into_iter().find_map(|q| q.symbol))
}

/// Parse a quoteSummary response into a sparse record
fn parse_quote_summary(ticker: &str, body: &str) -> Result<RawQuote, ProviderError> {
    let envelope: SummaryEnvelope =
        serde_json::from_str(body).map_err(|e| ProviderError::Decode(e.to_string()))?;

    let result = envelope
        .quote_summary
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| ProviderError::NotFound(ticker.to_string()))?;

    let price = result.price.unwrap_or_default();
    let detail = result.summary_detail.unwrap_or_default();
    let stats = result.default_key_statistics.unwrap_or_default();
    let financial = result.financial_data.unwrap_or_default();
    let profile = result.summary_profile.unwrap_or_default();

    // Indices and funds have no financialData; fall back to the market price
    let current_price = raw(&financial.current_price).or_else(|| raw(&price.regular_market_price));

    Ok(RawQuote {
        symbol: ticker.to_string(),
        current_price,
        trailing_eps: raw(&stats.trailing_eps),
        forward_eps: raw(&stats.forward_eps),
        trailing_pe: raw(&detail.trailing_pe),
        debt_to_equity: raw(&financial.debt_to_equity),
        dividend_rate: raw(&detail.dividend_rate),
        dividend_yield: raw(&detail.dividend_yield),
        payout_ratio: raw(&detail.payout_ratio),
        total_cash_per_share: raw(&financial.total_cash_per_share),
        long_name: price.long_name,
        short_name: price.short_name,
        currency: price.currency_symbol.or(price.currency),
        sector: profile.sector,
    })
}

/// Parse a chart response into bars, skipping rows with null prices
fn parse_chart(body: &str) -> Result<Vec<Bar>, ProviderError> {
    let envelope: ChartEnvelope =
        serde_json::from_str(body).map_err(|e| ProviderError::Decode(e.to_string()))?;

    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let bars = result
        .timestamp
        .iter()
        .zip(quote.open.iter().zip(quote.close.iter()))
        .filter_map(|(ts, (open, close))| {
            let timestamp = Utc.timestamp_opt(*ts, 0).single()?;
            let open = Decimal::try_from((*open)?).ok()?;
            let close = Decimal::try_from((*close)?).ok()?;
            Some(Bar {
                timestamp,
                open,
                close,
            })
        })
        .collect();

    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_yahoo_config_default() {
        let config = YahooConfig::default();
        assert_eq!(config.base_url, YAHOO_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_yahoo_client_custom_config() {
        let config = YahooConfig {
            base_url: "https://test.example.com".to_string(),
            timeout: Duration::from_secs(3),
        };
        let client = YahooClient::with_config(config).unwrap();
        assert_eq!(client.config.base_url, "https://test.example.com");
        assert_eq!(client.config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_parse_search_first_match() {
        let body = r#"{"quotes": [{"symbol": "AAPL"}, {"symbol": "APLE"}]}"#;
        assert_eq!(parse_search(body).unwrap(), Some("AAPL".to_string()));
    }

    #[test]
    fn test_parse_search_skips_symbolless() {
        let body = r#"{"quotes": [{"shortname": "x"}, {"symbol": "MSFT"}]}"#;
        assert_eq!(parse_search(body).unwrap(), Some("MSFT".to_string()));
    }

    #[test]
    fn test_parse_search_empty() {
        assert_eq!(parse_search(r#"{"quotes": []}"#).unwrap(), None);
        assert_eq!(parse_search(r#"{}"#).unwrap(), None);
    }

    #[test]
    fn test_parse_search_invalid() {
        assert!(matches!(
            parse_search("not json"),
            Err(ProviderError::Decode(_))
        ));
    }

    #[test]
    fn test_parse_quote_summary() {
        let body = r#"{
            "quoteSummary": {
                "result": [{
                    "price": {
                        "regularMarketPrice": {"raw": 190.1},
                        "longName": "Apple Inc.",
                        "shortName": "Apple",
                        "currencySymbol": "$",
                        "currency": "USD"
                    },
                    "summaryDetail": {
                        "trailingPE": {"raw": 29.5},
                        "dividendRate": {"raw": 0.96},
                        "dividendYield": {"raw": 0.005},
                        "payoutRatio": {"raw": 0.15}
                    },
                    "defaultKeyStatistics": {
                        "trailingEps": {"raw": 6.43},
                        "forwardEps": {"raw": 7.1}
                    },
                    "financialData": {
                        "currentPrice": {"raw": 190.0},
                        "debtToEquity": {"raw": 145.2},
                        "totalCashPerShare": {"raw": 4.1}
                    },
                    "summaryProfile": {"sector": "Technology"}
                }],
                "error": null
            }
        }"#;

        let raw = parse_quote_summary("AAPL", body).unwrap();
        assert_eq!(raw.symbol, "AAPL");
        assert_eq!(raw.current_price, Some(190.0));
        assert_eq!(raw.trailing_eps, Some(6.43));
        assert_eq!(raw.trailing_pe, Some(29.5));
        assert_eq!(raw.debt_to_equity, Some(145.2));
        assert_eq!(raw.payout_ratio, Some(0.15));
        assert_eq!(raw.long_name.as_deref(), Some("Apple Inc."));
        assert_eq!(raw.currency.as_deref(), Some("$"));
        assert_eq!(raw.sector.as_deref(), Some("Technology"));
    }

    #[test]
    fn test_parse_quote_summary_index_uses_market_price() {
        let body = r#"{
            "quoteSummary": {
                "result": [{
                    "price": {"regularMarketPrice": {"raw": 5100.5}, "shortName": "S&P 500", "currency": "USD"},
                    "summaryDetail": {"trailingPE": {}}
                }],
                "error": null
            }
        }"#;

        let raw = parse_quote_summary("^GSPC", body).unwrap();
        assert_eq!(raw.current_price, Some(5100.5));
        assert!(raw.trailing_pe.is_none());
        assert!(raw.trailing_eps.is_none());
        assert_eq!(raw.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_parse_quote_summary_no_result() {
        let body = r#"{"quoteSummary": {"result": null, "error": {"code": "Not Found"}}}"#;
        assert!(matches!(
            parse_quote_summary("NOPE", body),
            Err(ProviderError::NotFound(s)) if s == "NOPE"
        ));
    }

    #[test]
    fn test_parse_chart() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704067200, 1704153600, 1704240000],
                    "indicators": {"quote": [{
                        "open": [100.0, null, 102.0],
                        "close": [101.0, 99.0, 103.5]
                    }]}
                }],
                "error": null
            }
        }"#;

        let bars = parse_chart(body).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, dec!(101));
        assert_eq!(bars[1].open, dec!(102));
        assert_eq!(bars[1].close, dec!(103.5));
        assert!(bars[0].timestamp < bars[1].timestamp);
    }

    #[test]
    fn test_parse_chart_empty_result() {
        let body = r#"{"chart": {"result": null, "error": null}}"#;
        assert!(parse_chart(body).unwrap().is_empty());
    }
}
