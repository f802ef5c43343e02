// Governance Market Security Suite ("The Agora") - Report Types

//! Structured attack-harness output for independent analysis.
//!
//! Every figure in a report is derived from trial data; nothing is
//! hardcoded. Per-trial records are kept alongside the aggregates so a
//! downstream consumer can recompute any statistic from the raw runs.

use serde::Serialize;

use crate::decay::DecayPoint;

// ---------------------------------------------------------------------------
// Statistics (per-metric Monte Carlo aggregation)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-trial records
// ---------------------------------------------------------------------------

/// One cartel-formation trial over a sampled seat population.
#[derive(Debug, Clone, Serialize)]
pub struct CartelTrial {
    pub trial: usize,
    pub seed: u64,
    pub n_seats: usize,
    pub market_value: f64,
    pub feasible: bool,
    pub min_cartel_size: usize,
    pub cartel_cost: f64,
    pub cartel_power: f64,
    pub attack_gain: f64,
    pub detection_probability: f64,
    pub expected_value: f64,
    pub profitable: bool,
}

/// One whale-attack trial: a single high-capital, low-reputation actor
/// against a sampled honest population in a standard-phase market.
#[derive(Debug, Clone, Serialize)]
pub struct WhaleTrial {
    pub trial: usize,
    pub seed: u64,
    pub market_size: f64,
    pub n_honest: usize,
    pub attacker_capital: f64,
    pub attacker_reputation: f64,
    pub attacker_limit: f64,
    pub attacker_effective_stake: f64,
    pub attacker_capital_pct: f64,
    pub attacker_influence_pct: f64,
    pub expected_influence_pct: f64,
    pub gain_ratio: f64,
    pub protection_effectiveness: f64,
}

/// One sybil-split trial: the whale's capital divided across fresh
/// identities, measured in both the genesis and standard phases.
#[derive(Debug, Clone, Serialize)]
pub struct SybilTrial {
    pub trial: usize,
    pub seed: u64,
    pub market_size: f64,
    pub n_honest: usize,
    pub sybil_count: usize,
    pub capital_per_sybil: f64,
    pub genesis_blocked: bool,
    pub genesis_eligible_count: usize,
    pub sybil_total_limit: f64,
    pub sybil_per_identity_limit: f64,
    pub single_tier3_limit: f64,
    pub sybil_advantage_tier3: f64,
    pub single_tier5_limit: f64,
    pub sybil_advantage_tier5: f64,
    pub sybil_influence_pct: f64,
    pub honest_influence_pct: f64,
}

// ---------------------------------------------------------------------------
// Per-scenario aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CartelScenarioReport {
    pub scenario_name: String,
    pub n_seats: usize,
    pub market_value: f64,
    pub n_trials: usize,
    /// `None` until acceptance criteria have been applied to the report.
    pub pass: Option<bool>,
    pub infeasible_count: usize,
    pub profitability_rate: f64,
    pub min_cartel_size: Stats,
    pub cartel_cost: Stats,
    pub cartel_power: Stats,
    pub expected_value: Stats,
    pub trials: Vec<CartelTrial>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WhaleScenarioReport {
    pub scenario_name: String,
    pub market_size: f64,
    pub n_trials: usize,
    /// `None` until acceptance criteria have been applied to the report.
    pub pass: Option<bool>,
    pub gain_ratio: Stats,
    pub attacker_influence_pct: Stats,
    pub expected_influence_pct: Stats,
    pub protection_effectiveness: Stats,
    pub trials: Vec<WhaleTrial>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SybilScenarioReport {
    pub scenario_name: String,
    pub market_size: f64,
    pub n_trials: usize,
    /// `None` until acceptance criteria have been applied to the report.
    pub pass: Option<bool>,
    pub genesis_block_rate: f64,
    pub sybil_advantage_tier3: Stats,
    pub sybil_advantage_tier5: Stats,
    pub sybil_influence_pct: Stats,
    pub trials: Vec<SybilTrial>,
}

// ---------------------------------------------------------------------------
// Top-level report
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SuiteReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub n_trials_per_scenario: usize,
    pub base_seed: u64,
    pub summary: Summary,
    pub cartel_scenarios: Vec<CartelScenarioReport>,
    pub whale_scenarios: Vec<WhaleScenarioReport>,
    pub sybil_scenarios: Vec<SybilScenarioReport>,
    pub decay_curve: Vec<DecayPoint>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
}

impl Summary {
    pub fn from_counts(total: usize, passed: usize) -> Self {
        Self {
            total,
            passed,
            failed: total - passed,
            pass_rate: if total > 0 { passed as f64 / total as f64 } else { 0.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_known_samples() {
        let s = Stats::from_samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((s.mean - 5.0).abs() < 1e-12);
        // Sample std dev with n-1 denominator
        assert!((s.std_dev - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
        assert_eq!(s.n, 8);
        assert!(s.ci_lower < s.mean && s.mean < s.ci_upper);
    }

    #[test]
    fn stats_of_empty_and_single() {
        let empty = Stats::from_samples(&[]);
        assert_eq!(empty.n, 0);
        assert_eq!(empty.mean, 0.0);

        let single = Stats::from_samples(&[3.5]);
        assert_eq!(single.mean, 3.5);
        assert_eq!(single.std_dev, 0.0);
        assert_eq!(single.ci_lower, 3.5);
        assert_eq!(single.ci_upper, 3.5);
    }

    #[test]
    fn summary_counts() {
        let s = Summary::from_counts(12, 9);
        assert_eq!(s.failed, 3);
        assert!((s.pass_rate - 0.75).abs() < 1e-12);
        assert_eq!(Summary::from_counts(0, 0).pass_rate, 0.0);
    }
}
