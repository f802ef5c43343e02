// Governance Market Security Suite ("The Agora") - Type Definitions

//! Core data records: participants, markets, and coalitions.
//!
//! All quantities are plain f64 statistical aggregates. Invalid inputs
//! (negative capital, accuracy outside [0, 1], non-positive liquidity)
//! are rejected at construction, never discovered mid-computation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from participant/market/population construction.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PopulationError {
    #[error("participant {id}: capital {capital} is negative")]
    NegativeCapital { id: String, capital: f64 },
    #[error("participant {id}: reputation {reputation} is negative")]
    NegativeReputation { id: String, reputation: f64 },
    #[error("participant {id}: accuracy {accuracy} outside [0, 1]")]
    AccuracyOutOfRange { id: String, accuracy: f64 },
    #[error("market liquidity {liquidity} must be positive")]
    NonPositiveLiquidity { liquidity: f64 },
    #[error("population must be non-empty")]
    EmptyPopulation,
    #[error("score and reputation vectors differ in length ({scores} vs {reputations})")]
    LengthMismatch { scores: usize, reputations: usize },
    #[error("entry {index}: {field} {value} is negative")]
    NegativeEntry { index: usize, field: &'static str, value: f64 },
}

// ---------------------------------------------------------------------------
// Participant
// ---------------------------------------------------------------------------

/// A market participant. Reputation starts at [`crate::params::INITIAL_REPUTATION`]
/// and is mutated only by the decay engine (inactivity) and by trade
/// outcomes (accuracy, applied externally).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    /// Deployable capital in external currency units.
    pub capital: f64,
    pub reputation: f64,
    /// Historical prediction correctness rate in [0, 1].
    pub accuracy: f64,
    pub markets_participated: u32,
}

impl Participant {
    pub fn new(
        id: impl Into<String>,
        capital: f64,
        reputation: f64,
        accuracy: f64,
        markets_participated: u32,
    ) -> Result<Self, PopulationError> {
        let participant = Self {
            id: id.into(),
            capital,
            reputation,
            accuracy,
            markets_participated,
        };
        participant.validate()?;
        Ok(participant)
    }

    pub fn validate(&self) -> Result<(), PopulationError> {
        if self.capital < 0.0 || !self.capital.is_finite() {
            return Err(PopulationError::NegativeCapital {
                id: self.id.clone(),
                capital: self.capital,
            });
        }
        if self.reputation < 0.0 || !self.reputation.is_finite() {
            return Err(PopulationError::NegativeReputation {
                id: self.id.clone(),
                reputation: self.reputation,
            });
        }
        if !(0.0..=1.0).contains(&self.accuracy) {
            return Err(PopulationError::AccuracyOutOfRange {
                id: self.id.clone(),
                accuracy: self.accuracy,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Market
// ---------------------------------------------------------------------------

/// A governance market. Immutable after creation; only the external logical
/// clock (block height) advances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub creation_block: u64,
    pub total_liquidity: f64,
}

impl Market {
    pub fn new(creation_block: u64, total_liquidity: f64) -> Result<Self, PopulationError> {
        if total_liquidity <= 0.0 || !total_liquidity.is_finite() {
            return Err(PopulationError::NonPositiveLiquidity {
                liquidity: total_liquidity,
            });
        }
        Ok(Self {
            creation_block,
            total_liquidity,
        })
    }
}

// ---------------------------------------------------------------------------
// Coalition
// ---------------------------------------------------------------------------

/// A duplicate-free set of member indices into a fixed population.
/// Power is always recomputed from current participant state; nothing
/// derived is cached here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coalition {
    members: Vec<usize>,
}

impl Coalition {
    /// Build a coalition, sorting and de-duplicating the member indices.
    pub fn new(mut members: Vec<usize>) -> Self {
        members.sort_unstable();
        members.dedup();
        Self { members }
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
