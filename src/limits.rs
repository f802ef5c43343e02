// Governance Market Security Suite ("The Agora") - Position Limits

//! Phased, tiered position-limit state machine.
//!
//! A market moves through three lifecycle phases derived purely from elapsed
//! blocks. Each phase caps how much capital one participant may deploy:
//!
//! * Genesis -- hard reputation gate, small reputation-scaled ceilings;
//! * EarlyGrowth -- ceiling ramps linearly from 30% to 50% of liquidity;
//! * Standard -- the five-tier reputation/accuracy schedule applies.
//!
//! Reputation and accuracy gate the capital ceiling only. Vote weight is
//! still driven by deployed capital; capital beyond the ceiling is capped
//! (Standard/EarlyGrowth) or refused entirely (genesis-ineligible).

use crate::params::{
    self, ParamsError, TierSchedule, EARLY_GROWTH_BLOCKS, GENESIS_BLOCKS,
};
use crate::types::{Market, Participant};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Market lifecycle phase, a pure function of elapsed blocks. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Genesis,
    EarlyGrowth,
    Standard,
}

impl Phase {
    /// Derive the phase from the market's creation block and the current
    /// block. A current block before creation is treated as zero elapsed.
    pub fn at(creation_block: u64, current_block: u64) -> Self {
        let elapsed = current_block.saturating_sub(creation_block);
        if elapsed < GENESIS_BLOCKS {
            Phase::Genesis
        } else if elapsed < EARLY_GROWTH_BLOCKS {
            Phase::EarlyGrowth
        } else {
            Phase::Standard
        }
    }
}

// ---------------------------------------------------------------------------
// PositionLimitEngine
// ---------------------------------------------------------------------------

/// Computes a participant's maximum allowed stake in a market at a given
/// block height, composing the phase clock with the tier schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionLimitEngine {
    tiers: TierSchedule,
}

impl Default for PositionLimitEngine {
    fn default() -> Self {
        Self {
            tiers: TierSchedule::default(),
        }
    }
}

impl PositionLimitEngine {
    /// Build an engine over a custom tier schedule (validated).
    pub fn new(tiers: TierSchedule) -> Result<Self, ParamsError> {
        tiers.validate()?;
        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &TierSchedule {
        &self.tiers
    }

    /// Whether the participant may take any position while the market is in
    /// its genesis phase.
    pub fn genesis_eligible(&self, participant: &Participant) -> bool {
        participant.reputation >= params::MIN_REP_FOR_GENESIS
    }

    /// Maximum allowed stake for `participant` in `market` at `current_block`.
    /// Always in `[0, market.total_liquidity]`.
    pub fn position_limit(
        &self,
        participant: &Participant,
        market: &Market,
        current_block: u64,
    ) -> f64 {
        let elapsed = current_block.saturating_sub(market.creation_block);
        match Phase::at(market.creation_block, current_block) {
            Phase::Genesis => self.genesis_limit(participant, market),
            Phase::EarlyGrowth => {
                let progress =
                    (elapsed - GENESIS_BLOCKS) as f64 / (EARLY_GROWTH_BLOCKS - GENESIS_BLOCKS) as f64;
                let fraction = params::EARLY_GROWTH_BASE_FRACTION
                    + progress * params::EARLY_GROWTH_RAMP_FRACTION;
                market.total_liquidity * fraction
            }
            Phase::Standard => {
                let fraction = self
                    .tiers
                    .limit_fraction(participant.reputation, participant.accuracy);
                market.total_liquidity * fraction
            }
        }
    }

    /// The stake a participant actually gets to deploy: desired capital
    /// clipped to the phase/tier ceiling.
    pub fn effective_stake(
        &self,
        participant: &Participant,
        market: &Market,
        current_block: u64,
    ) -> f64 {
        participant
            .capital
            .min(self.position_limit(participant, market, current_block))
    }

    /// Genesis bootstrap protection: only already-reputable actors can move
    /// a market before price discovery matures, and never more than 20% of
    /// its liquidity.
    fn genesis_limit(&self, participant: &Participant, market: &Market) -> f64 {
        if !self.genesis_eligible(participant) {
            return 0.0;
        }
        let rep_factor = (participant.reputation / params::MIN_REP_FOR_GENESIS)
            .min(params::MAX_GENESIS_REP_FACTOR);
        let scaled = params::BASE_GENESIS_LIQUIDITY * params::GENESIS_LIQUIDITY_CAP * rep_factor
            / params::MAX_GENESIS_REP_FACTOR;
        scaled.min(market.total_liquidity * params::GENESIS_LIQUIDITY_CAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(reputation: f64, accuracy: f64) -> Participant {
        Participant::new("p", 1_000_000.0, reputation, accuracy, 10).unwrap()
    }

    #[test]
    fn phase_boundaries() {
        assert_eq!(Phase::at(0, 0), Phase::Genesis);
        assert_eq!(Phase::at(0, 99), Phase::Genesis);
        assert_eq!(Phase::at(0, 100), Phase::EarlyGrowth);
        assert_eq!(Phase::at(0, 499), Phase::EarlyGrowth);
        assert_eq!(Phase::at(0, 500), Phase::Standard);
        // Non-zero creation block shifts the window
        assert_eq!(Phase::at(1000, 1050), Phase::Genesis);
        assert_eq!(Phase::at(1000, 1600), Phase::Standard);
    }

    #[test]
    fn genesis_blocks_low_reputation() {
        let engine = PositionLimitEngine::default();
        let market = Market::new(0, 10_000.0).unwrap();
        let low_rep = participant(999.0, 0.9);
        assert_eq!(engine.position_limit(&low_rep, &market, 50), 0.0);
        // Hard block, not merely small: effective stake is zero too
        assert_eq!(engine.effective_stake(&low_rep, &market, 50), 0.0);
    }

    #[test]
    fn genesis_limit_scales_with_reputation() {
        let engine = PositionLimitEngine::default();
        let market = Market::new(0, 10_000.0).unwrap();
        // rep_factor 1.0 => 1000 * 0.20 * 1 / 10 = 20
        assert_eq!(engine.position_limit(&participant(1000.0, 0.5), &market, 50), 20.0);
        // rep_factor saturates at 10 => 200
        assert_eq!(
            engine.position_limit(&participant(50_000.0, 0.5), &market, 50),
            200.0
        );
        // Small market: capped at 20% of liquidity
        let small = Market::new(0, 100.0).unwrap();
        assert_eq!(
            engine.position_limit(&participant(50_000.0, 0.5), &small, 50),
            20.0
        );
    }

    #[test]
    fn early_growth_ramps_linearly() {
        let engine = PositionLimitEngine::default();
        let market = Market::new(0, 1000.0).unwrap();
        let p = participant(100.0, 0.5);
        // Phase start: 30%
        assert!((engine.position_limit(&p, &market, 100) - 300.0).abs() < 1e-9);
        // Midpoint: 40%
        assert!((engine.position_limit(&p, &market, 300) - 400.0).abs() < 1e-9);
        // Near phase end: just under 50%
        let near_end = engine.position_limit(&p, &market, 499);
        assert!(near_end > 499.0 && near_end < 500.0);
    }

    #[test]
    fn standard_phase_uses_tier_schedule() {
        let engine = PositionLimitEngine::default();
        let market = Market::new(0, 1000.0).unwrap();
        // Tier 3: rep >= 1000, acc >= 0.60 => 3%
        let p = participant(1500.0, 0.75);
        assert!((engine.position_limit(&p, &market, 600) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn limit_never_exceeds_liquidity() {
        let engine = PositionLimitEngine::default();
        let market = Market::new(0, 500.0).unwrap();
        let blocks = [0, 50, 100, 250, 499, 500, 600, 10_000];
        let reps = [0.0, 100.0, 1000.0, 10_000.0, 100_000.0];
        for &block in &blocks {
            for &rep in &reps {
                let p = participant(rep, 0.8);
                let limit = engine.position_limit(&p, &market, block);
                assert!(limit >= 0.0);
                assert!(limit <= market.total_liquidity);
            }
        }
    }

    #[test]
    fn effective_stake_is_capped_not_refused() {
        let engine = PositionLimitEngine::default();
        let market = Market::new(0, 1000.0).unwrap();
        let whale = Participant::new("whale", 10_000.0, 200.0, 0.52, 5).unwrap();
        // Standard phase, catch-all tier: limit 10, stake capped to it
        assert_eq!(engine.effective_stake(&whale, &market, 600), 10.0);
        // A small holder deploys everything
        let minnow = Participant::new("minnow", 2.0, 200.0, 0.52, 5).unwrap();
        assert_eq!(engine.effective_stake(&minnow, &market, 600), 2.0);
    }
}
