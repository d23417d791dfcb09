//! Additive point-based scoring policy
//!
//! Rules are evaluated in a fixed order: profitability, leverage, dividend
//! safety, margin of safety, cash. Each block awards at most one rule.

use super::{Preset, Rationale, ScoreResult};
use crate::model::ValuationResult;
use crate::security::{DebtPolicy, SecurityMetrics};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Threshold paired with the points it awards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    pub limit: Decimal,
    pub points: i32,
}

impl Tier {
    const fn new(limit: Decimal, points: i32) -> Self {
        Self { limit, points }
    }
}

/// Payout band `(above, up_to]`; `up_to = None` is unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayoutBand {
    pub above: Decimal,
    pub up_to: Option<Decimal>,
    pub points: i32,
}

impl PayoutBand {
    fn contains(&self, payout: Decimal) -> bool {
        payout > self.above && self.up_to.map_or(true, |max| payout <= max)
    }
}

/// Thresholds and weights for one scoring context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringPolicy {
    /// Applied instead of the P/E block when EPS <= 0 (0 disables)
    pub loss_penalty: i32,
    /// First tier with `pe < limit` wins
    pub pe_below: Vec<Tier>,
    /// Awarded to profitable companies matching no P/E tier
    pub pe_otherwise: i32,
    /// First tier with `debt < limit` wins
    pub debt_below: Vec<Tier>,
    /// Awarded when `debt > limit`
    pub debt_above: Tier,
    /// First matching band wins
    pub payout_bands: Vec<PayoutBand>,
    /// First tier with `margin > limit` wins
    pub margin_above: Vec<Tier>,
    /// Awarded when `margin < limit`
    pub margin_below: Option<Tier>,
    /// Bonus when cash per share exceeds `price * cash_ratio`
    pub cash_ratio: Decimal,
    pub cash_points: i32,
    pub debt_policy: DebtPolicy,
}

impl ScoringPolicy {
    /// Policy for a named preset
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Screener => Self::screener(),
            Preset::Detail => Self::detail(),
        }
    }

    /// Ranked screening weights
    pub fn screener() -> Self {
        Self {
            loss_penalty: 0,
            pe_below: vec![Tier::new(dec!(15), 5), Tier::new(dec!(25), 3)],
            pe_otherwise: 1,
            debt_below: vec![Tier::new(dec!(60), 5), Tier::new(dec!(120), 3)],
            debt_above: Tier::new(dec!(200), -2),
            payout_bands: vec![
                PayoutBand {
                    above: dec!(5),
                    up_to: Some(dec!(85)),
                    points: 4,
                },
                PayoutBand {
                    above: dec!(0),
                    up_to: Some(dec!(5)),
                    points: 1,
                },
            ],
            margin_above: vec![Tier::new(dec!(50), 6), Tier::new(dec!(15), 4)],
            margin_below: Some(Tier::new(dec!(-10), -2)),
            cash_ratio: dec!(0.15),
            cash_points: 2,
            debt_policy: DebtPolicy::Neutral,
        }
    }

    /// Single-security inspection weights
    pub fn detail() -> Self {
        Self {
            loss_penalty: -5,
            pe_below: vec![Tier::new(dec!(12), 5), Tier::new(dec!(20), 4)],
            pe_otherwise: 1,
            debt_below: vec![Tier::new(dec!(50), 4), Tier::new(dec!(100), 3)],
            debt_above: Tier::new(dec!(200), -4),
            payout_bands: vec![
                PayoutBand {
                    above: dec!(10),
                    up_to: Some(dec!(80)),
                    points: 4,
                },
                PayoutBand {
                    above: dec!(95),
                    up_to: None,
                    points: -4,
                },
            ],
            margin_above: vec![Tier::new(dec!(30), 5)],
            margin_below: None,
            cash_ratio: dec!(0.2),
            cash_points: 2,
            debt_policy: DebtPolicy::Neutral,
        }
    }

    /// Score a valued security
    pub fn score(&self, metrics: &SecurityMetrics, valuation: &ValuationResult) -> ScoreResult {
        let mut rules = Vec::new();
        let mut push = |label: String, delta: i32| {
            if delta != 0 {
                rules.push(Rationale { label, delta });
            }
        };

        // Profitability
        let eps = metrics.effective_eps();
        if eps <= Decimal::ZERO {
            push("Loss-making (EPS <= 0)".to_string(), self.loss_penalty);
        } else {
            let pe = metrics.trailing_pe;
            match self.pe_below.iter().find(|t| pe < t.limit) {
                Some(tier) => push(
                    format!("P/E {} < {}", pe.round_dp(1), tier.limit),
                    tier.points,
                ),
                None => push(format!("P/E {}", pe.round_dp(1)), self.pe_otherwise),
            }
        }

        // Leverage
        if let Some(debt) = metrics.debt(self.debt_policy).value() {
            if let Some(tier) = self.debt_below.iter().find(|t| debt < t.limit) {
                push(
                    format!("Debt/Equity {} < {}", debt.round_dp(0), tier.limit),
                    tier.points,
                );
            } else if debt > self.debt_above.limit {
                push(
                    format!("Debt/Equity {} > {}", debt.round_dp(0), self.debt_above.limit),
                    self.debt_above.points,
                );
            }
        }

        // Dividend safety
        let payout = metrics.payout_ratio_pct;
        if let Some(band) = self.payout_bands.iter().find(|b| b.contains(payout)) {
            let label = match band.up_to {
                Some(max) => format!("Payout {}% in ({}, {}]", payout.round_dp(0), band.above, max),
                None => format!("Payout {}% > {}", payout.round_dp(0), band.above),
            };
            push(label, band.points);
        }

        // Margin of safety
        let margin = valuation.margin_pct;
        if let Some(tier) = self.margin_above.iter().find(|t| margin > t.limit) {
            push(
                format!("Margin of safety {}% > {}%", margin.round_dp(1), tier.limit),
                tier.points,
            );
        } else if let Some(tier) = self.margin_below.filter(|t| margin < t.limit) {
            push(
                format!("Margin of safety {}% < {}%", margin.round_dp(1), tier.limit),
                tier.points,
            );
        }

        // Cash
        if metrics.cash_per_share > metrics.price * self.cash_ratio {
            push(
                format!(
                    "Cash/share {} > {}% of price",
                    metrics.cash_per_share.round_dp(2),
                    (self.cash_ratio * dec!(100)).normalize()
                ),
                self.cash_points,
            );
        }

        ScoreResult::from_rules(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{value, ValuationConfig};
    use crate::quote::RawQuote;
    use crate::scoring::MAX_SCORE;
    use crate::security::normalize;

    fn scenario_quote() -> RawQuote {
        RawQuote {
            current_price: Some(100.0),
            trailing_eps: Some(5.0),
            forward_eps: Some(0.0),
            trailing_pe: Some(12.0),
            debt_to_equity: Some(40.0),
            dividend_rate: Some(0.0),
            payout_ratio: Some(0.30),
            total_cash_per_share: Some(20.0),
            ..RawQuote::new("TEST")
        }
    }

    fn score_with(raw: &RawQuote, policy: &ScoringPolicy, config: ValuationConfig) -> ScoreResult {
        let metrics = normalize(raw).unwrap();
        let valuation = value(&metrics, config);
        policy.score(&metrics, &valuation)
    }

    #[test]
    fn test_screener_scenario_scores_twenty() {
        let result = score_with(
            &scenario_quote(),
            &ScoringPolicy::screener(),
            ValuationConfig::screening(),
        );
        let deltas: Vec<i32> = result.positives.iter().map(|r| r.delta).collect();
        assert_eq!(deltas, vec![5, 5, 4, 4, 2]);
        assert!(result.negatives.is_empty());
        assert_eq!(result.raw_score, 20);
        assert_eq!(result.score, 20);
    }

    #[test]
    fn test_screener_loss_maker_no_penalty() {
        let raw = RawQuote {
            trailing_eps: Some(-3.0),
            forward_eps: None,
            debt_to_equity: None,
            payout_ratio: None,
            total_cash_per_share: None,
            ..scenario_quote()
        };
        let result = score_with(&raw, &ScoringPolicy::screener(), ValuationConfig::screening());
        // Only the margin rule fires: value 0 → margin -100 < -10
        assert!(result.positives.is_empty());
        assert_eq!(result.negatives.len(), 1);
        assert_eq!(result.negatives[0].delta, -2);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_screener_debt_bands() {
        let cases = [(59.0, 5), (60.0, 3), (119.0, 3), (120.0, 0), (200.0, 0), (201.0, -2)];
        let policy = ScoringPolicy::screener();
        for (debt, expected) in cases {
            let raw = RawQuote {
                debt_to_equity: Some(debt),
                ..scenario_quote()
            };
            let result = score_with(&raw, &policy, ValuationConfig::screening());
            let debt_delta: i32 = result
                .positives
                .iter()
                .chain(result.negatives.iter())
                .filter(|r| r.label.starts_with("Debt/Equity"))
                .map(|r| r.delta)
                .sum();
            assert_eq!(debt_delta, expected, "debt {}", debt);
        }
    }

    #[test]
    fn test_unknown_debt_is_neutral() {
        let raw = RawQuote {
            debt_to_equity: None,
            ..scenario_quote()
        };
        let result = score_with(&raw, &ScoringPolicy::screener(), ValuationConfig::screening());
        assert!(result
            .positives
            .iter()
            .chain(result.negatives.iter())
            .all(|r| !r.label.starts_with("Debt/Equity")));
        assert_eq!(result.raw_score, 15);
    }

    #[test]
    fn test_screener_payout_bands() {
        let policy = ScoringPolicy::screener();
        let payout_points = |payout: f64| {
            let raw = RawQuote {
                payout_ratio: Some(payout),
                ..scenario_quote()
            };
            let result = score_with(&raw, &policy, ValuationConfig::screening());
            result
                .positives
                .iter()
                .filter(|r| r.label.starts_with("Payout"))
                .map(|r| r.delta)
                .sum::<i32>()
        };
        assert_eq!(payout_points(0.0), 0);
        assert_eq!(payout_points(0.03), 1);
        assert_eq!(payout_points(0.04), 1);
        assert_eq!(payout_points(0.5), 4);
        assert_eq!(payout_points(0.85), 4);
        assert_eq!(payout_points(0.9), 0);
    }

    #[test]
    fn test_detail_loss_penalty_replaces_pe() {
        let raw = RawQuote {
            trailing_eps: Some(-1.0),
            forward_eps: Some(-1.0),
            ..scenario_quote()
        };
        let result = score_with(&raw, &ScoringPolicy::detail(), ValuationConfig::detail());
        assert_eq!(result.negatives[0].label, "Loss-making (EPS <= 0)");
        assert_eq!(result.negatives[0].delta, -5);
        assert!(result.positives.iter().all(|r| !r.label.starts_with("P/E")));
        // -5 loss, +4 debt, +4 payout; margin -100 has no detail penalty and
        // cash 20 is not above 20% of price
        assert_eq!(result.raw_score, 3);
    }

    #[test]
    fn test_detail_scenario() {
        let result = score_with(
            &scenario_quote(),
            &ScoringPolicy::detail(),
            ValuationConfig::detail(),
        );
        // P/E 12 is not < 12, so +4; margin 41.4 > 30; cash 20 is not > 20
        let deltas: Vec<i32> = result.positives.iter().map(|r| r.delta).collect();
        assert_eq!(deltas, vec![4, 4, 4, 5]);
        assert_eq!(result.score, 17);
    }

    #[test]
    fn test_detail_high_payout_penalty() {
        let raw = RawQuote {
            payout_ratio: Some(1.2),
            debt_to_equity: Some(250.0),
            ..scenario_quote()
        };
        let result = score_with(&raw, &ScoringPolicy::detail(), ValuationConfig::detail());
        let negatives: Vec<i32> = result.negatives.iter().map(|r| r.delta).collect();
        assert_eq!(negatives, vec![-4, -4]);
        assert_eq!(result.negatives[1].label, "Payout 120% > 95");
    }

    #[test]
    fn test_cash_bonus_boundary() {
        // 15 is not > 100 * 0.15
        let raw = RawQuote {
            total_cash_per_share: Some(15.0),
            ..scenario_quote()
        };
        let result = score_with(&raw, &ScoringPolicy::screener(), ValuationConfig::screening());
        assert!(result.positives.iter().all(|r| !r.label.starts_with("Cash")));
        assert_eq!(result.score, 18);
    }

    #[test]
    fn test_score_is_clamped_raw_score() {
        let eps_values = [-5.0, 0.0, 0.5, 5.0, 50.0];
        let debts = [None, Some(10.0), Some(150.0), Some(900.0)];
        let payouts = [0.0, 0.03, 0.5, 0.9, 2.0];
        let mut saw_below_zero = false;
        let mut saw_above_max = false;

        for (preset, config) in [
            (Preset::Screener, ValuationConfig::screening()),
            (Preset::Detail, ValuationConfig::detail()),
        ] {
            let policy = ScoringPolicy::preset(preset);
            for eps in eps_values {
                for debt in debts {
                    for payout in payouts {
                        let raw = RawQuote {
                            trailing_eps: Some(eps),
                            trailing_pe: None,
                            debt_to_equity: debt,
                            payout_ratio: Some(payout),
                            ..scenario_quote()
                        };
                        let result = score_with(&raw, &policy, config);
                        let expected = result.raw_score.clamp(0, i32::from(MAX_SCORE));
                        assert_eq!(i32::from(result.score), expected, "{:?} {:?}", preset, raw);
                        saw_below_zero |= result.raw_score < 0;
                        saw_above_max |= result.raw_score > i32::from(MAX_SCORE);
                    }
                }
            }
        }

        assert!(saw_below_zero);
        assert!(saw_above_max);
    }

    fn rule_delta(result: &ScoreResult, prefix: &str) -> i32 {
        result
            .positives
            .iter()
            .chain(result.negatives.iter())
            .filter(|r| r.label.starts_with(prefix))
            .map(|r| r.delta)
            .sum()
    }

    fn margin_delta(policy: &ScoringPolicy, margin_pct: Decimal) -> i32 {
        let metrics = normalize(&scenario_quote()).unwrap();
        let valuation = ValuationResult {
            intrinsic_value: dec!(100),
            margin_pct,
            capped: false,
        };
        rule_delta(&policy.score(&metrics, &valuation), "Margin of safety")
    }

    #[test]
    fn test_screener_margin_tiers() {
        let policy = ScoringPolicy::screener();
        let cases = [
            (dec!(150), 6),
            (dec!(50.01), 6),
            (dec!(50), 4),
            (dec!(15.01), 4),
            (dec!(15), 0),
            (dec!(0), 0),
            (dec!(-10), 0),
            (dec!(-10.01), -2),
        ];
        for (margin, expected) in cases {
            assert_eq!(margin_delta(&policy, margin), expected, "margin {}", margin);
        }
    }

    #[test]
    fn test_detail_margin_tiers() {
        let policy = ScoringPolicy::detail();
        let cases = [(dec!(30.01), 5), (dec!(30), 0), (dec!(-100), 0)];
        for (margin, expected) in cases {
            assert_eq!(margin_delta(&policy, margin), expected, "margin {}", margin);
        }
    }

    #[test]
    fn test_pe_tiers() {
        let cases = [
            (Preset::Screener, 14.9, 5),
            (Preset::Screener, 15.0, 3),
            (Preset::Screener, 24.9, 3),
            (Preset::Screener, 25.0, 1),
            (Preset::Screener, 80.0, 1),
            (Preset::Detail, 11.9, 5),
            (Preset::Detail, 12.0, 4),
            (Preset::Detail, 19.9, 4),
            (Preset::Detail, 20.0, 1),
        ];
        for (preset, pe, expected) in cases {
            let raw = RawQuote {
                trailing_pe: Some(pe),
                ..scenario_quote()
            };
            let result = score_with(&raw, &ScoringPolicy::preset(preset), ValuationConfig::detail());
            assert_eq!(rule_delta(&result, "P/E"), expected, "{:?} pe {}", preset, pe);
        }
    }

    #[test]
    fn test_detail_debt_tiers() {
        let cases = [(49.0, 4), (50.0, 3), (99.0, 3), (100.0, 0), (200.0, 0), (201.0, -4)];
        let policy = ScoringPolicy::detail();
        for (debt, expected) in cases {
            let raw = RawQuote {
                debt_to_equity: Some(debt),
                ..scenario_quote()
            };
            let result = score_with(&raw, &policy, ValuationConfig::detail());
            assert_eq!(rule_delta(&result, "Debt/Equity"), expected, "debt {}", debt);
        }
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let metrics = normalize(&scenario_quote()).unwrap();
        let policy = ScoringPolicy::screener();
        let first = policy.score(&metrics, &value(&metrics, ValuationConfig::screening()));
        let second = policy.score(&metrics, &value(&metrics, ValuationConfig::screening()));
        assert_eq!(first, second);
    }
}
