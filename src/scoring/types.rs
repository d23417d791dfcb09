//! Scoring types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound of the clamped score
pub const MAX_SCORE: u8 = 20;

/// Named scoring preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Ranked screening across a universe
    Screener,
    /// Single-security inspection
    Detail,
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "screener" => Ok(Preset::Screener),
            "detail" => Ok(Preset::Detail),
            other => Err(format!("unknown scoring preset: {}", other)),
        }
    }
}

/// One applied rule with its signed point delta
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rationale {
    pub label: String,
    pub delta: i32,
}

impl fmt::Display for Rationale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:+})", self.label, self.delta)
    }
}

/// Score plus the rules that produced it, in evaluation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Sum clamped to `0..=MAX_SCORE`
    pub score: u8,
    /// Unclamped sum
    pub raw_score: i32,
    pub positives: Vec<Rationale>,
    pub negatives: Vec<Rationale>,
}

impl ScoreResult {
    /// Build from rules in evaluation order
    pub fn from_rules(rules: Vec<Rationale>) -> Self {
        let raw_score: i32 = rules.iter().map(|r| r.delta).sum();
        let score = raw_score.clamp(0, i32::from(MAX_SCORE)) as u8;
        let (positives, negatives): (Vec<_>, Vec<_>) =
            rules.into_iter().partition(|r| r.delta > 0);

        Self {
            score,
            raw_score,
            positives,
            negatives,
        }
    }
}
