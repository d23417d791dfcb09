//! value-screen: Graham-style valuation and scoring for equities
//!
//! This library provides the core components for:
//! - Symbol resolution and quote retrieval behind a provider trait
//! - Normalization of sparse quotes into canonical metrics
//! - Graham intrinsic value and margin of safety
//! - Preset-driven quality scoring with rationale
//! - Universe screening and head-to-head duels
//! - Moving-average trend, exchange sessions and value alerts
//! - Logging and Prometheus metrics

pub mod alert;
pub mod cli;
pub mod config;
pub mod duel;
pub mod model;
pub mod pipeline;
pub mod quote;
pub mod scoring;
pub mod screener;
pub mod security;
pub mod session;
pub mod telemetry;
