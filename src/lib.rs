// Governance Market Security Suite ("The Agora")

//! Economic security analysis for reputation-weighted governance markets.
//!
//! The engine models the protection mechanisms of a reputation-weighted
//! prediction-market DAO (phased position limits, reputation decay,
//! coalition override thresholds) and prices the canonical attacks against
//! them: cartel formation among seat holders, whale capital concentration,
//! and sybil identity splitting. The `bench` binary drives the Monte Carlo
//! harness in [`simulation`] across scenario tables and emits a structured
//! JSON report.

pub mod cartel;
pub mod decay;
pub mod limits;
pub mod params;
pub mod power;
pub mod report;
pub mod simulation;
pub mod types;

pub use cartel::{CartelOptimizer, CartelOutcome, CartelSolution, CostModel, Strategy};
pub use limits::{Phase, PositionLimitEngine};
pub use params::TierSchedule;
pub use power::{CoalitionPower, CoalitionPowerModel, SeatPopulation};
pub use simulation::AttackHarness;
pub use types::{Coalition, Market, Participant};
