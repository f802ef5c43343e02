// Governance Market Security Suite ("The Agora") - Policy Parameters

//! Named policy constants for the reputation-gated governance market.
//!
//! Everything a downstream consumer might reference lives here as named
//! configuration rather than inline literals: the tier schedule, phase
//! thresholds, decay rates, power weights, and the attack cost model.
//! The 0.6/0.4 power weighting and the 66.66% override threshold are
//! policy choices, not mathematical invariants.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Reputation constants
// ---------------------------------------------------------------------------

/// Reputation granted to every newly initialized participant.
pub const INITIAL_REPUTATION: f64 = 100.0;

/// Minimum reputation required to take any position during the genesis phase.
pub const MIN_REP_FOR_GENESIS: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Market phase thresholds (logical blocks since market creation)
// ---------------------------------------------------------------------------

/// Blocks 0..GENESIS_BLOCKS: genesis phase, reputation-gated entry.
pub const GENESIS_BLOCKS: u64 = 100;

/// Blocks GENESIS_BLOCKS..EARLY_GROWTH_BLOCKS: early growth, linear limit ramp.
pub const EARLY_GROWTH_BLOCKS: u64 = 500;

/// Liquidity baseline used to size genesis positions.
pub const BASE_GENESIS_LIQUIDITY: f64 = 1000.0;

/// Hard cap on any genesis position as a fraction of market liquidity.
pub const GENESIS_LIQUIDITY_CAP: f64 = 0.20;

/// Reputation factor saturates at 10x the genesis minimum.
pub const MAX_GENESIS_REP_FACTOR: f64 = 10.0;

/// Early growth limit starts at 30% of liquidity...
pub const EARLY_GROWTH_BASE_FRACTION: f64 = 0.30;

/// ...and ramps linearly by a further 20% across the phase.
pub const EARLY_GROWTH_RAMP_FRACTION: f64 = 0.20;

// ---------------------------------------------------------------------------
// Reputation decay
// ---------------------------------------------------------------------------

/// Inactivity grace period -- no decay at or below this many days.
pub const MIN_ACTIVITY_THRESHOLD_DAYS: f64 = 90.0;

/// Length of one decay period in days.
pub const DECAY_PERIOD_DAYS: f64 = 30.0;

/// Fraction of reputation lost per decay period.
pub const DECAY_RATE_PER_PERIOD: f64 = 0.01;

/// Floor: inactivity alone can never take reputation below 25% of its
/// pre-decay value. Active slashing is a separate mechanism.
pub const MIN_PROTECTION_RATE: f64 = 0.25;

// ---------------------------------------------------------------------------
// Coalition power
// ---------------------------------------------------------------------------

/// Blended power fraction a coalition needs to force a governance outcome.
pub const OVERRIDE_THRESHOLD: f64 = 0.6666;

/// Weight of the performance-score share in blended power.
pub const SCORE_WEIGHT: f64 = 0.6;

/// Weight of the reputation share in blended power.
pub const REPUTATION_WEIGHT: f64 = 0.4;

// ---------------------------------------------------------------------------
// Attack cost model
// ---------------------------------------------------------------------------

/// Expected member earnings per week as a fraction of market value.
pub const WEEKLY_EARNINGS_RATE: f64 = 0.025;

/// Governance term length in weeks (earnings forgone when defecting).
pub const TERM_LENGTH_WEEKS: f64 = 12.0;

/// Fraction of reputation slashed when a member is caught colluding.
pub const SLASH_PENALTY: f64 = 0.10;

/// Per-member probability that collusion is detected and slashed.
pub const SLASH_DETECTION_PROBABILITY: f64 = 0.30;

/// Coordination overhead rate per additional coalition member.
pub const COORDINATION_OVERHEAD_RATE: f64 = 0.05;

/// Smallest coalition size considered by the exhaustive search.
pub const MIN_COALITION_SIZE: usize = 1;

/// Exhaustive enumeration is exponential -- refuse populations beyond this.
pub const MAX_EXHAUSTIVE_POPULATION: usize = 20;

// ---------------------------------------------------------------------------
// Attack outcome model (harness)
// ---------------------------------------------------------------------------

/// Detection probability grows by this much per coalition member...
pub const DETECTION_PROB_PER_MEMBER: f64 = 0.05;

/// ...capped here.
pub const DETECTION_PROB_CAP: f64 = 0.95;

/// Fraction of market value an undetected attacker can extract.
pub const EXTRACTABLE_VALUE_FRACTION: f64 = 0.50;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from policy configuration validation.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParamsError {
    #[error("tier schedule is empty")]
    EmptySchedule,
    #[error("tier {index}: min_reputation must be strictly descending")]
    ReputationOrdering { index: usize },
    #[error("tier {index}: limit_fraction must be strictly descending")]
    LimitOrdering { index: usize },
    #[error("tier {index}: limit_fraction {fraction} outside (0, 1]")]
    LimitOutOfRange { index: usize, fraction: f64 },
    #[error("last tier must be a catch-all (zero reputation/accuracy floor)")]
    NoCatchAll,
}

// ---------------------------------------------------------------------------
// Tier schedule
// ---------------------------------------------------------------------------

/// One position-limit tier: reputation/accuracy floors mapping to a capital
/// ceiling expressed as a fraction of market liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub min_reputation: f64,
    pub min_accuracy: f64,
    pub limit_fraction: f64,
}

/// Ordered five-tier schedule, evaluated from the most restrictive
/// requirement down to the catch-all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSchedule {
    tiers: Vec<Tier>,
}

impl Default for TierSchedule {
    fn default() -> Self {
        Self {
            tiers: vec![
                Tier { min_reputation: 10_000.0, min_accuracy: 0.70, limit_fraction: 0.05 },
                Tier { min_reputation: 5_000.0, min_accuracy: 0.65, limit_fraction: 0.04 },
                Tier { min_reputation: 1_000.0, min_accuracy: 0.60, limit_fraction: 0.03 },
                Tier { min_reputation: 500.0, min_accuracy: 0.55, limit_fraction: 0.02 },
                Tier { min_reputation: 0.0, min_accuracy: 0.0, limit_fraction: 0.01 },
            ],
        }
    }
}

impl TierSchedule {
    /// Construct a validated schedule from an ordered tier list.
    pub fn new(tiers: Vec<Tier>) -> Result<Self, ParamsError> {
        let schedule = Self { tiers };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Check the schedule invariants: strictly descending reputation floors
    /// and limit fractions, fractions in (0, 1], catch-all last.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.tiers.is_empty() {
            return Err(ParamsError::EmptySchedule);
        }
        for (index, tier) in self.tiers.iter().enumerate() {
            if tier.limit_fraction <= 0.0 || tier.limit_fraction > 1.0 {
                return Err(ParamsError::LimitOutOfRange {
                    index,
                    fraction: tier.limit_fraction,
                });
            }
            if index > 0 {
                let prev = &self.tiers[index - 1];
                if tier.min_reputation >= prev.min_reputation {
                    return Err(ParamsError::ReputationOrdering { index });
                }
                if tier.limit_fraction >= prev.limit_fraction {
                    return Err(ParamsError::LimitOrdering { index });
                }
            }
        }
        if let Some(last) = self.tiers.last() {
            if last.min_reputation != 0.0 || last.min_accuracy != 0.0 {
                return Err(ParamsError::NoCatchAll);
            }
        }
        Ok(())
    }

    /// Capital-ceiling fraction for a participant with the given reputation
    /// and accuracy: the first tier (highest requirement first) whose floors
    /// are both met. Total, deterministic -- the catch-all always matches.
    pub fn limit_fraction(&self, reputation: f64, accuracy: f64) -> f64 {
        for tier in &self.tiers {
            if reputation >= tier.min_reputation && accuracy >= tier.min_accuracy {
                return tier.limit_fraction;
            }
        }
        // Unreachable for a validated schedule; the catch-all has no floor.
        self.tiers.last().map(|t| t.limit_fraction).unwrap_or(0.0)
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }
}
