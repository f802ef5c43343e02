// Governance Market Security Suite ("The Agora") - Reputation Decay

//! Inactivity-driven reputation decay.
//!
//! Reputation is untouched for the first 90 days of inactivity, then loses
//! 1% per 30-day period, floored at 25% of its pre-decay value. Pure
//! inactivity can therefore never fully evaporate a reputation; active
//! slashing is a separate mechanism outside this engine.

use crate::params::{
    DECAY_PERIOD_DAYS, DECAY_RATE_PER_PERIOD, MIN_ACTIVITY_THRESHOLD_DAYS, MIN_PROTECTION_RATE,
};
use crate::types::Participant;
use serde::{Deserialize, Serialize};

/// Reputation remaining after `inactive_days` of inactivity.
///
/// Monotone non-increasing in `inactive_days`; `remaining(r, 0) == r` and
/// `remaining(r, d) >= r * MIN_PROTECTION_RATE` for all `d`.
pub fn remaining_reputation(initial: f64, inactive_days: f64) -> f64 {
    if inactive_days <= MIN_ACTIVITY_THRESHOLD_DAYS {
        return initial;
    }
    let decay_periods = (inactive_days - MIN_ACTIVITY_THRESHOLD_DAYS) / DECAY_PERIOD_DAYS;
    let total_rate = (DECAY_RATE_PER_PERIOD * decay_periods).min(1.0 - MIN_PROTECTION_RATE);
    (initial * (1.0 - total_rate)).max(initial * MIN_PROTECTION_RATE)
}

/// Apply inactivity decay to a participant in place.
pub fn apply(participant: &mut Participant, inactive_days: f64) {
    participant.reputation = remaining_reputation(participant.reputation, inactive_days);
}

// ---------------------------------------------------------------------------
// Decay-resistance sweep
// ---------------------------------------------------------------------------

/// One row of a decay-resistance table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayPoint {
    pub months_inactive: u32,
    pub initial_reputation: f64,
    pub decayed_reputation: f64,
    pub decay_amount: f64,
    pub decay_percentage: f64,
    pub remaining_percentage: f64,
}

/// Sweep decay over a range of inactive months (30 days each), producing a
/// table consumable by downstream reporting without further transformation.
pub fn decay_curve(
    initial: f64,
    months: std::ops::RangeInclusive<u32>,
) -> Vec<DecayPoint> {
    months
        .map(|month| {
            let remaining = remaining_reputation(initial, month as f64 * 30.0);
            let decayed = initial - remaining;
            DecayPoint {
                months_inactive: month,
                initial_reputation: initial,
                decayed_reputation: remaining,
                decay_amount: decayed,
                decay_percentage: if initial > 0.0 { decayed / initial * 100.0 } else { 0.0 },
                remaining_percentage: if initial > 0.0 {
                    remaining / initial * 100.0
                } else {
                    0.0
                },
            }
        })
        .collect()
}
