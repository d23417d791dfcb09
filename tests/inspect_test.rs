//! Detail view integration tests

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use value_screen::model::{value, Sentiment, TrendClassifier, ValuationConfig};
use value_screen::pipeline::Pipeline;
use value_screen::quote::{Bar, HistoryPeriod, InMemoryProvider, RawQuote};
use value_screen::scoring::{score, Preset};
use value_screen::security::Normalizer;

fn rising_bars(n: usize) -> Vec<Bar> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 21, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let close = dec!(50) + Decimal::from(i as u64) / dec!(4);
            Bar {
                timestamp: start + Duration::days(i as i64),
                open: close - dec!(0.1),
                close,
            }
        })
        .collect()
}

fn pipeline() -> Pipeline {
    let provider = InMemoryProvider::new()
        .with_quote(RawQuote {
            current_price: Some(100.0),
            trailing_eps: Some(5.0),
            trailing_pe: Some(12.0),
            debt_to_equity: Some(40.0),
            payout_ratio: Some(0.3),
            total_cash_per_share: Some(20.0),
            ..RawQuote::new("KO")
        })
        .with_history("KO", rising_bars(250));
    Pipeline::new(Arc::new(provider), Normalizer::default())
}

#[tokio::test]
async fn test_detail_valuation_and_score() {
    let metrics = pipeline().load("ko").await.unwrap();
    let valuation = value(&metrics, ValuationConfig::detail());
    let result = score(&metrics, &valuation, Preset::Detail);

    assert!(!valuation.capped);
    assert_eq!(valuation.margin_pct.round_dp(2), dec!(41.43));
    let deltas: Vec<i32> = result.positives.iter().map(|r| r.delta).collect();
    assert_eq!(deltas, vec![4, 4, 4, 5]);
    assert_eq!(result.score, 17);
}

#[tokio::test]
async fn test_trend_from_history() {
    let p = pipeline();
    let bars = p.history("KO", HistoryPeriod::OneYear).await;
    assert_eq!(bars.len(), 250);

    let reading = TrendClassifier::default().classify(&bars).unwrap();
    assert_eq!(reading.sentiment, Sentiment::Bullish);
    assert!(reading.short_sma > reading.long_sma);
}

#[tokio::test]
async fn test_trend_needs_full_window() {
    let bars = pipeline().history("KO", HistoryPeriod::OneYear).await;
    assert!(TrendClassifier::new(50, 300).classify(&bars).is_none());
}
