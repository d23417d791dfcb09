//! Moving-average trend classifier
//!
//! Compares the last close against short and long simple moving averages of
//! daily closes.

use crate::quote::Bar;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trend sentiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// close > short SMA > long SMA
    Bullish,
    /// close < short SMA < long SMA
    Bearish,
    /// Anything in between
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Bullish => write!(f, "bullish"),
            Sentiment::Bearish => write!(f, "bearish"),
            Sentiment::Neutral => write!(f, "neutral"),
        }
    }
}

/// Classifier output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendReading {
    pub last_close: Decimal,
    pub short_sma: Decimal,
    pub long_sma: Decimal,
    pub sentiment: Sentiment,
}

/// Short/long SMA crossover classifier
#[derive(Debug, Clone, Copy)]
pub struct TrendClassifier {
    short_window: usize,
    long_window: usize,
}

impl TrendClassifier {
    /// Create a classifier; windows are clamped so that 1 <= short <= long
    pub fn new(short_window: usize, long_window: usize) -> Self {
        let short_window = short_window.max(1);
        Self {
            short_window,
            long_window: long_window.max(short_window),
        }
    }

    /// Classify bars ordered oldest first; `None` with fewer than `long_window` bars
    pub fn classify(&self, bars: &[Bar]) -> Option<TrendReading> {
        if bars.len() < self.long_window {
            return None;
        }

        let closes: Vec<Decimal> = bars.iter().map(|b| b.close).collect();
        let last_close = *closes.last()?;
        let short_sma = sma(&closes, self.short_window)?;
        let long_sma = sma(&closes, self.long_window)?;

        let sentiment = if last_close > short_sma && short_sma > long_sma {
            Sentiment::Bullish
        } else if last_close < short_sma && short_sma < long_sma {
            Sentiment::Bearish
        } else {
            Sentiment::Neutral
        };

        Some(TrendReading {
            last_close,
            short_sma,
            long_sma,
            sentiment,
        })
    }
}

impl Default for TrendClassifier {
    fn default() -> Self {
        Self::new(50, 200)
    }
}

/// Mean of the last `window` values
fn sma(values: &[Decimal], window: usize) -> Option<Decimal> {
    if window == 0 || values.len() < window {
        return None;
    }
    let tail = &values[values.len() - window..];
    let sum = tail
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))?;
    sum.checked_div(Decimal::from(window))
}
