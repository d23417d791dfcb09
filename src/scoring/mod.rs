//! Scoring module
//!
//! Maps canonical metrics and a valuation to a bounded quality score with
//! human-readable rationale. One [`ScoringPolicy`] type carries every
//! context's thresholds; contexts pick a [`Preset`].

mod policy;
mod types;

pub use policy::{PayoutBand, ScoringPolicy, Tier};
pub use types::{Preset, Rationale, ScoreResult, MAX_SCORE};

use crate::model::ValuationResult;
use crate::security::SecurityMetrics;

/// Score a valued security with a named preset
pub fn score(metrics: &SecurityMetrics, valuation: &ValuationResult, preset: Preset) -> ScoreResult {
    ScoringPolicy::preset(preset).score(metrics, valuation)
}
