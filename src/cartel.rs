// Governance Market Security Suite ("The Agora") - Cartel Optimizer

//! Minimum-cost override coalition search.
//!
//! Two interchangeable strategies share one cost model and one power model:
//!
//! * [`Strategy::Exhaustive`] enumerates subsets by ascending size and keeps
//!   the cheapest feasible coalition. Exponential; guarded by a population
//!   cap and used as ground truth for small populations.
//! * [`Strategy::LinearProgram`] solves the continuous relaxation of the 0/1
//!   formulation with one decision variable per seat, rounds membership at
//!   x > 0.5, and repairs the rounded set until it clears the override
//!   threshold. The reported cost is the repaired coalition's real
//!   (overhead-inclusive) cost; the raw LP objective is carried alongside
//!   as a lower bound on the exhaustive optimum.
//!
//! An unreachable threshold (including an empty population) is a normal
//! [`CartelOutcome::Infeasible`] result, never an error.

use crate::params::{
    COORDINATION_OVERHEAD_RATE, MAX_EXHAUSTIVE_POPULATION, MIN_COALITION_SIZE, SLASH_DETECTION_PROBABILITY,
    SLASH_PENALTY, TERM_LENGTH_WEEKS, WEEKLY_EARNINGS_RATE,
};
use crate::power::{CoalitionPower, CoalitionPowerModel, SeatPopulation};
use crate::types::Coalition;
use minilp::{ComparisonOp, OptimizationDirection, Problem};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from optimizer misuse. Infeasibility is not an error; see
/// [`CartelOutcome`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CartelError {
    #[error("population of {size} exceeds exhaustive-search cap of {max}; use the LP strategy")]
    PopulationTooLarge { size: usize, max: usize },
}

// ---------------------------------------------------------------------------
// Cost model
// ---------------------------------------------------------------------------

/// Cost of bribing one coalition together, shared by both strategies.
///
/// Per member: expected term earnings forgone plus expected reputation-slash
/// loss. The coalition total adds a coordination overhead that grows with
/// group size -- which is why optimal coalitions trade size against
/// per-member cost instead of simply taking the cheapest individuals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    pub market_value: f64,
    pub weekly_earnings_rate: f64,
    pub term_weeks: f64,
    pub slash_penalty: f64,
    pub detection_probability: f64,
    pub overhead_rate_per_member: f64,
}

impl CostModel {
    pub fn for_market(market_value: f64) -> Self {
        Self {
            market_value,
            weekly_earnings_rate: WEEKLY_EARNINGS_RATE,
            term_weeks: TERM_LENGTH_WEEKS,
            slash_penalty: SLASH_PENALTY,
            detection_probability: SLASH_DETECTION_PROBABILITY,
            overhead_rate_per_member: COORDINATION_OVERHEAD_RATE,
        }
    }

    /// Bribe required for one member, independent of final coalition size.
    pub fn member_cost(&self, reputation: f64) -> f64 {
        let expected_earnings = self.market_value * self.weekly_earnings_rate * self.term_weeks;
        let reputation_risk = reputation * self.slash_penalty * self.detection_probability;
        expected_earnings + reputation_risk
    }

    /// Full coalition cost: member costs plus coordination overhead.
    pub fn coalition_cost(&self, members: &[usize], reputations: &[f64]) -> f64 {
        let base: f64 = members
            .iter()
            .filter(|&&m| m < reputations.len())
            .map(|&m| self.member_cost(reputations[m]))
            .sum();
        let overhead = base
            * members.len().saturating_sub(1) as f64
            * self.overhead_rate_per_member;
        base + overhead
    }
}

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Which search backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Exact subset enumeration; ground truth, small populations only.
    Exhaustive,
    /// Continuous relaxation of the 0/1 program; scalable lower-bound estimate.
    LinearProgram,
}

/// A feasible minimum-cost coalition. `power.power` always clears the
/// override threshold, whichever strategy produced the solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartelSolution {
    pub coalition: Coalition,
    /// Overhead-inclusive cost of this coalition under the cost model.
    pub cost: f64,
    pub power: CoalitionPower,
    pub strategy: Strategy,
    /// Raw LP objective: a lower bound on the exhaustive optimum that
    /// ignores coordination overhead. `None` for exhaustive solutions.
    pub cost_lower_bound: Option<f64>,
}

/// Optimizer result: either a coalition or a defined "no solution" state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CartelOutcome {
    Feasible(CartelSolution),
    Infeasible,
}

impl CartelOutcome {
    pub fn solution(&self) -> Option<&CartelSolution> {
        match self {
            CartelOutcome::Feasible(solution) => Some(solution),
            CartelOutcome::Infeasible => None,
        }
    }

    pub fn is_feasible(&self) -> bool {
        matches!(self, CartelOutcome::Feasible(_))
    }
}

// ---------------------------------------------------------------------------
// Optimizer
// ---------------------------------------------------------------------------

/// Minimum-cost override coalition finder over a fixed seat population.
#[derive(Debug, Clone)]
pub struct CartelOptimizer {
    power_model: CoalitionPowerModel,
    cost_model: CostModel,
}

impl CartelOptimizer {
    pub fn new(power_model: CoalitionPowerModel, cost_model: CostModel) -> Self {
        Self {
            power_model,
            cost_model,
        }
    }

    pub fn for_market(market_value: f64) -> Self {
        Self::new(CoalitionPowerModel::default(), CostModel::for_market(market_value))
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    pub fn power_model(&self) -> &CoalitionPowerModel {
        &self.power_model
    }

    /// Find the minimum-cost coalition able to cross the override threshold.
    pub fn solve(
        &self,
        population: &SeatPopulation,
        strategy: Strategy,
    ) -> Result<CartelOutcome, CartelError> {
        if population.is_empty() {
            return Ok(CartelOutcome::Infeasible);
        }
        match strategy {
            Strategy::Exhaustive => self.solve_exhaustive(population),
            Strategy::LinearProgram => Ok(self.solve_lp(population)),
        }
    }

    /// Enumerate subsets by ascending size, keeping the strict-minimum-cost
    /// feasible coalition. Because sizes ascend and combinations are emitted
    /// in lexicographic order, cost ties resolve to the smallest
    /// member-index set.
    fn solve_exhaustive(&self, population: &SeatPopulation) -> Result<CartelOutcome, CartelError> {
        let n = population.len();
        if n > MAX_EXHAUSTIVE_POPULATION {
            return Err(CartelError::PopulationTooLarge {
                size: n,
                max: MAX_EXHAUSTIVE_POPULATION,
            });
        }

        let mut best: Option<(Vec<usize>, f64)> = None;
        for size in MIN_COALITION_SIZE..=n {
            let mut indices: Vec<usize> = (0..size).collect();
            loop {
                let coalition = Coalition::new(indices.clone());
                let power = self.power_model.power(&coalition, population);
                if self.power_model.can_override(&power) {
                    let cost = self
                        .cost_model
                        .coalition_cost(coalition.members(), &population.reputations);
                    let cheaper = best.as_ref().map_or(true, |(_, c)| cost < *c);
                    if cheaper {
                        best = Some((indices.clone(), cost));
                    }
                }
                if !next_combination(&mut indices, n) {
                    break;
                }
            }
        }

        Ok(match best {
            Some((members, cost)) => {
                let coalition = Coalition::new(members);
                let power = self.power_model.power(&coalition, population);
                CartelOutcome::Feasible(CartelSolution {
                    coalition,
                    cost,
                    power,
                    strategy: Strategy::Exhaustive,
                    cost_lower_bound: None,
                })
            }
            None => CartelOutcome::Infeasible,
        })
    }

    /// Solve the continuous relaxation: minimize sum(cost_i * x_i) subject
    /// to sum(weight_i * x_i) >= threshold, 0 <= x_i <= 1. Membership is
    /// read off as x_i > 0.5 and then repaired (see [`Self::repair_members`]):
    /// rounding can drop the fractional seat and leave the set short of the
    /// threshold, and a set below the threshold is not a coalition at all.
    /// The reported cost is the repaired coalition's overhead-inclusive
    /// cost; the raw objective rides along as the documented lower bound.
    fn solve_lp(&self, population: &SeatPopulation) -> CartelOutcome {
        let n = population.len();
        let weights = self.power_model.member_weights(population);

        let mut problem = Problem::new(OptimizationDirection::Minimize);
        let vars: Vec<_> = (0..n)
            .map(|i| problem.add_var(self.cost_model.member_cost(population.reputations[i]), (0.0, 1.0)))
            .collect();

        let constraint: Vec<_> = vars.iter().copied().zip(weights.iter().copied()).collect();
        problem.add_constraint(
            constraint.as_slice(),
            ComparisonOp::Ge,
            self.power_model.override_threshold,
        );

        match problem.solve() {
            Ok(solution) => {
                let members: Vec<usize> = vars
                    .iter()
                    .enumerate()
                    .filter(|(_, &var)| solution[var] > 0.5)
                    .map(|(i, _)| i)
                    .collect();
                match self.repair_members(members, &weights, population) {
                    Some(coalition) => {
                        let power = self.power_model.power(&coalition, population);
                        let cost = self
                            .cost_model
                            .coalition_cost(coalition.members(), &population.reputations);
                        CartelOutcome::Feasible(CartelSolution {
                            coalition,
                            cost,
                            power,
                            strategy: Strategy::LinearProgram,
                            cost_lower_bound: Some(solution.objective()),
                        })
                    }
                    None => CartelOutcome::Infeasible,
                }
            }
            Err(_) => CartelOutcome::Infeasible,
        }
    }

    /// Top the rounded member set back up to the override threshold by
    /// adding remaining seats in ascending cost-per-power order. Returns
    /// `None` when even the full population falls short.
    fn repair_members(
        &self,
        mut members: Vec<usize>,
        weights: &[f64],
        population: &SeatPopulation,
    ) -> Option<Coalition> {
        let mut in_set = vec![false; population.len()];
        for &m in &members {
            in_set[m] = true;
        }
        let mut total: f64 = members.iter().map(|&m| weights[m]).sum();

        if total < self.power_model.override_threshold {
            let mut rest: Vec<usize> = (0..population.len()).filter(|&i| !in_set[i]).collect();
            rest.sort_by(|&a, &b| {
                let ra = cost_per_power(self.cost_model.member_cost(population.reputations[a]), weights[a]);
                let rb = cost_per_power(self.cost_model.member_cost(population.reputations[b]), weights[b]);
                ra.total_cmp(&rb)
            });
            for i in rest {
                members.push(i);
                total += weights[i];
                if total >= self.power_model.override_threshold {
                    break;
                }
            }
            if total < self.power_model.override_threshold {
                return None;
            }
        }

        Some(Coalition::new(members))
    }
}

fn cost_per_power(cost: f64, weight: f64) -> f64 {
    if weight > 0.0 {
        cost / weight
    } else {
        f64::INFINITY
    }
}

/// Advance `indices` to the next k-combination of `0..n` in lexicographic
/// order. Returns false once the last combination has been consumed.
fn next_combination(indices: &mut [usize], n: usize) -> bool {
    let k = indices.len();
    let mut i = k;
    while i > 0 {
        i -= 1;
        if indices[i] < i + n - k {
            indices[i] += 1;
            for j in i + 1..k {
                indices[j] = indices[j - 1] + 1;
            }
            return true;
        }
    }
    false
}
