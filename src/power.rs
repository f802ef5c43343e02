// Governance Market Security Suite ("The Agora") - Coalition Power

//! Blended voting/trading power of a coalition.
//!
//! Power is 60% performance-score share plus 40% reputation share, measured
//! against the whole population. A zero population denominator contributes a
//! zero share rather than an error.

use crate::params::{OVERRIDE_THRESHOLD, REPUTATION_WEIGHT, SCORE_WEIGHT};
use crate::types::{Coalition, PopulationError};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Population view
// ---------------------------------------------------------------------------

/// Parallel score/reputation vectors for a governance seat population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatPopulation {
    pub scores: Vec<f64>,
    pub reputations: Vec<f64>,
}

impl SeatPopulation {
    pub fn new(scores: Vec<f64>, reputations: Vec<f64>) -> Result<Self, PopulationError> {
        if scores.len() != reputations.len() {
            return Err(PopulationError::LengthMismatch {
                scores: scores.len(),
                reputations: reputations.len(),
            });
        }
        for (index, &score) in scores.iter().enumerate() {
            if score < 0.0 || !score.is_finite() {
                return Err(PopulationError::NegativeEntry {
                    index,
                    field: "score",
                    value: score,
                });
            }
        }
        for (index, &reputation) in reputations.iter().enumerate() {
            if reputation < 0.0 || !reputation.is_finite() {
                return Err(PopulationError::NegativeEntry {
                    index,
                    field: "reputation",
                    value: reputation,
                });
            }
        }
        Ok(Self { scores, reputations })
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Power model
// ---------------------------------------------------------------------------

/// Derived power figures for one coalition, always recomputed from current
/// population state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoalitionPower {
    pub size: usize,
    pub score_share: f64,
    pub reputation_share: f64,
    pub power: f64,
}

/// Score/reputation weighting and the override threshold. These are fixed
/// policy configuration, not invariants of the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoalitionPowerModel {
    pub score_weight: f64,
    pub reputation_weight: f64,
    pub override_threshold: f64,
}

impl Default for CoalitionPowerModel {
    fn default() -> Self {
        Self {
            score_weight: SCORE_WEIGHT,
            reputation_weight: REPUTATION_WEIGHT,
            override_threshold: OVERRIDE_THRESHOLD,
        }
    }
}

impl CoalitionPowerModel {
    /// Compute the blended power of `coalition` within `population`.
    /// Out-of-range member indices are ignored.
    pub fn power(&self, coalition: &Coalition, population: &SeatPopulation) -> CoalitionPower {
        let total_score: f64 = population.scores.iter().sum();
        let total_reputation: f64 = population.reputations.iter().sum();

        let mut coalition_score = 0.0;
        let mut coalition_reputation = 0.0;
        for &member in coalition.members() {
            if member < population.len() {
                coalition_score += population.scores[member];
                coalition_reputation += population.reputations[member];
            }
        }

        let score_share = share(coalition_score, total_score);
        let reputation_share = share(coalition_reputation, total_reputation);

        CoalitionPower {
            size: coalition.size(),
            score_share,
            reputation_share,
            power: self.score_weight * score_share + self.reputation_weight * reputation_share,
        }
    }

    /// Whether a coalition with this power can force a governance outcome.
    pub fn can_override(&self, power: &CoalitionPower) -> bool {
        power.power >= self.override_threshold
    }

    /// Per-member blended weight: the power a single seat contributes.
    /// The LP constraint row and the exhaustive search both derive from this.
    pub fn member_weights(&self, population: &SeatPopulation) -> Vec<f64> {
        let total_score: f64 = population.scores.iter().sum();
        let total_reputation: f64 = population.reputations.iter().sum();
        (0..population.len())
            .map(|i| {
                self.score_weight * share(population.scores[i], total_score)
                    + self.reputation_weight * share(population.reputations[i], total_reputation)
            })
            .collect()
    }
}

fn share(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total
    } else {
        0.0
    }
}
