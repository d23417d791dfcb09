//! Configuration types for value-screen

use crate::alert::AlertConfig;
use crate::quote::{HistoryPeriod, YahooConfig, YAHOO_API_URL};
use crate::security::DEFAULT_CURRENCY;
use chrono::NaiveTime;
use serde::Deserialize;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub screener: ScreenerConfig,
    #[serde(default)]
    pub trend: TrendConfig,
    #[serde(default)]
    pub alerts: AlertConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Quote provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Currency label for records that report none
    #[serde(default = "default_currency")]
    pub default_currency: String,
}

fn default_base_url() -> String {
    YAHOO_API_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            default_currency: default_currency(),
        }
    }
}

impl ProviderConfig {
    /// Yahoo client settings
    pub fn yahoo(&self) -> YahooConfig {
        YahooConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Screener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScreenerConfig {
    /// Symbols evaluated by `screen`
    #[serde(default = "default_universe")]
    pub universe: Vec<String>,

    /// Rows printed (0 prints all)
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_universe() -> Vec<String> {
    [
        "AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA", "JPM", "JNJ", "PG", "KO", "PEP", "XOM",
        "CVX", "WMT", "HD", "INTC", "CSCO", "PFE", "MRK", "VZ", "IBM", "MMM", "MCD", "DIS",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_top_n() -> usize {
    15
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            universe: default_universe(),
            top_n: default_top_n(),
        }
    }
}

/// Moving-average trend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TrendConfig {
    #[serde(default = "default_short_window")]
    pub short_window: usize,

    #[serde(default = "default_long_window")]
    pub long_window: usize,

    /// History requested for the classifier
    #[serde(default)]
    pub period: HistoryPeriod,
}

fn default_short_window() -> usize {
    50
}
fn default_long_window() -> usize {
    200
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            short_window: default_short_window(),
            long_window: default_long_window(),
            period: HistoryPeriod::default(),
        }
    }
}

/// Periodic re-screening configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    /// Seconds between screens
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_interval_secs() -> u64 {
    900
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

/// Exchange trading hours in exchange-local time
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Fixed offset of the exchange from UTC (hours)
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,

    #[serde(default = "default_pre_market_open")]
    pub pre_market_open: NaiveTime,

    #[serde(default = "default_open")]
    pub open: NaiveTime,

    #[serde(default = "default_close")]
    pub close: NaiveTime,

    #[serde(default = "default_after_hours_close")]
    pub after_hours_close: NaiveTime,
}

fn default_utc_offset_hours() -> i32 {
    -5
}
fn default_pre_market_open() -> NaiveTime {
    NaiveTime::from_hms_opt(4, 0, 0).unwrap_or_default()
}
fn default_open() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 30, 0).unwrap_or_default()
}
fn default_close() -> NaiveTime {
    NaiveTime::from_hms_opt(16, 0, 0).unwrap_or_default()
}
fn default_after_hours_close() -> NaiveTime {
    NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: default_utc_offset_hours(),
            pre_market_open: default_pre_market_open(),
            open: default_open(),
            close: default_close(),
            after_hours_close: default_after_hours_close(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines
    #[serde(default)]
    pub json: bool,

    /// Prometheus exporter port; disabled when absent
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
