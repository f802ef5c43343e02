// Governance Market Security Suite ("The Agora") - Attack Harness

//! Monte Carlo attack simulation.
//!
//! Three adversary models run against sampled populations:
//!
//! * cartel formation among governance seat holders,
//! * a single whale (high capital, fresh reputation),
//! * the same capital split across sybil identities.
//!
//! Every trial derives its own `ChaCha8Rng` from `base_seed + trial`, so a
//! report is reproducible from its base seed alone and trials are
//! independent of execution order.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Beta, Distribution, LogNormal, Poisson};

use crate::cartel::{CartelError, CartelOptimizer, Strategy};
use crate::limits::PositionLimitEngine;
use crate::params::{
    DETECTION_PROB_CAP, DETECTION_PROB_PER_MEMBER, EXTRACTABLE_VALUE_FRACTION, INITIAL_REPUTATION,
};
use crate::power::SeatPopulation;
use crate::report::{
    CartelScenarioReport, CartelTrial, Stats, SybilScenarioReport, SybilTrial,
    WhaleScenarioReport, WhaleTrial,
};
use crate::types::{Market, Participant, PopulationError};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("invalid parameters for the {0} distribution")]
    Distribution(&'static str),
    #[error(transparent)]
    Cartel(#[from] CartelError),
    #[error(transparent)]
    Population(#[from] PopulationError),
}

// ---------------------------------------------------------------------------
// Population sampling
// ---------------------------------------------------------------------------

/// Distribution set for synthetic populations. Honest-user marginals are
/// heavy-tailed on capital and reputation with accuracy clustered near
/// 0.8; seat holders skew toward high scores and high reputation.
struct PopulationSampler {
    honest_capital: LogNormal<f64>,
    honest_reputation: LogNormal<f64>,
    accuracy: Beta<f64>,
    markets: Poisson<f64>,
    seat_reputation: LogNormal<f64>,
}

impl PopulationSampler {
    fn new() -> Result<Self, SimError> {
        Ok(Self {
            honest_capital: LogNormal::new(0.0, 1.5)
                .map_err(|_| SimError::Distribution("honest-capital log-normal"))?,
            honest_reputation: LogNormal::new(7.0, 1.0)
                .map_err(|_| SimError::Distribution("honest-reputation log-normal"))?,
            accuracy: Beta::new(8.0, 2.0)
                .map_err(|_| SimError::Distribution("accuracy beta"))?,
            markets: Poisson::new(10.0)
                .map_err(|_| SimError::Distribution("market-count poisson"))?,
            seat_reputation: LogNormal::new(9.0, 0.5)
                .map_err(|_| SimError::Distribution("seat-reputation log-normal"))?,
        })
    }

    /// Sample between 20 and 99 honest users.
    fn honest_population(&self, rng: &mut ChaCha8Rng) -> Result<Vec<Participant>, SimError> {
        let n = rng.gen_range(20..100);
        (0..n)
            .map(|i| {
                Participant::new(
                    format!("honest_{i}"),
                    self.honest_capital.sample(rng) * 0.1,
                    self.honest_reputation.sample(rng) * INITIAL_REPUTATION,
                    self.accuracy.sample(rng),
                    self.markets.sample(rng) as u32 + 5,
                )
                .map_err(SimError::from)
            })
            .collect()
    }

    /// Sample a governance seat population of `n` holders.
    fn seat_population(&self, rng: &mut ChaCha8Rng, n: usize) -> Result<SeatPopulation, SimError> {
        let scores = (0..n).map(|_| self.accuracy.sample(rng) * 10_000.0).collect();
        let reputations = (0..n)
            .map(|_| self.seat_reputation.sample(rng) * INITIAL_REPUTATION)
            .collect();
        SeatPopulation::new(scores, reputations).map_err(SimError::from)
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// Attacker shape shared by the whale and sybil scenarios: ten times the
/// mean honest capital, double the starting reputation, coin-flip accuracy.
const WHALE_CAPITAL_MULTIPLE: f64 = 10.0;
const WHALE_ACCURACY: f64 = 0.52;
const SYBIL_ACCURACY: f64 = 0.50;

/// Block heights sampled by the whale/sybil trials: mid-genesis and
/// well into the standard phase.
const GENESIS_CHECK_BLOCK: u64 = 50;
const STANDARD_CHECK_BLOCK: u64 = 600;

pub struct AttackHarness {
    sampler: PopulationSampler,
    limits: PositionLimitEngine,
}

impl AttackHarness {
    pub fn new() -> Result<Self, SimError> {
        Ok(Self {
            sampler: PopulationSampler::new()?,
            limits: PositionLimitEngine::default(),
        })
    }

    pub fn limits(&self) -> &PositionLimitEngine {
        &self.limits
    }

    // -- cartel ------------------------------------------------------------

    /// One cartel trial: sample a seat population, find the minimum-cost
    /// override coalition, and price the attack against its expected gain.
    pub fn cartel_trial(
        &self,
        trial: usize,
        base_seed: u64,
        n_seats: usize,
        market_value: f64,
        strategy: Strategy,
    ) -> Result<CartelTrial, SimError> {
        let seed = base_seed + trial as u64;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let population = self.sampler.seat_population(&mut rng, n_seats)?;

        let optimizer = CartelOptimizer::for_market(market_value);
        let outcome = optimizer.solve(&population, strategy)?;

        let attack_gain = market_value * EXTRACTABLE_VALUE_FRACTION;
        Ok(match outcome.solution() {
            Some(solution) => {
                let size = solution.power.size;
                let detection_probability =
                    (DETECTION_PROB_PER_MEMBER * size as f64).min(DETECTION_PROB_CAP);
                let expected_value =
                    attack_gain * (1.0 - detection_probability) - solution.cost;
                CartelTrial {
                    trial,
                    seed,
                    n_seats,
                    market_value,
                    feasible: true,
                    min_cartel_size: size,
                    cartel_cost: solution.cost,
                    cartel_power: solution.power.power,
                    attack_gain,
                    detection_probability,
                    expected_value,
                    profitable: expected_value > 0.0,
                }
            }
            None => CartelTrial {
                trial,
                seed,
                n_seats,
                market_value,
                feasible: false,
                min_cartel_size: 0,
                cartel_cost: 0.0,
                cartel_power: 0.0,
                attack_gain,
                detection_probability: 0.0,
                expected_value: 0.0,
                profitable: false,
            },
        })
    }

    pub fn cartel_scenario(
        &self,
        name: &str,
        n_seats: usize,
        market_value: f64,
        n_trials: usize,
        base_seed: u64,
        strategy: Strategy,
    ) -> Result<CartelScenarioReport, SimError> {
        let mut trials = Vec::with_capacity(n_trials);
        for trial in 0..n_trials {
            trials.push(self.cartel_trial(trial, base_seed, n_seats, market_value, strategy)?);
        }

        let feasible: Vec<&CartelTrial> = trials.iter().filter(|t| t.feasible).collect();
        let infeasible_count = trials.len() - feasible.len();
        let profitable = trials.iter().filter(|t| t.profitable).count();

        Ok(CartelScenarioReport {
            scenario_name: name.to_string(),
            n_seats,
            market_value,
            n_trials,
            pass: None,
            infeasible_count,
            profitability_rate: profitable as f64 / n_trials.max(1) as f64,
            min_cartel_size: Stats::from_samples(
                &feasible.iter().map(|t| t.min_cartel_size as f64).collect::<Vec<_>>(),
            ),
            cartel_cost: Stats::from_samples(
                &feasible.iter().map(|t| t.cartel_cost).collect::<Vec<_>>(),
            ),
            cartel_power: Stats::from_samples(
                &feasible.iter().map(|t| t.cartel_power).collect::<Vec<_>>(),
            ),
            expected_value: Stats::from_samples(
                &feasible.iter().map(|t| t.expected_value).collect::<Vec<_>>(),
            ),
            trials,
        })
    }

    // -- whale -------------------------------------------------------------

    /// One whale trial in a standard-phase market: influence with position
    /// limits applied versus raw capital share without them.
    pub fn whale_trial(
        &self,
        trial: usize,
        base_seed: u64,
        market_size: f64,
    ) -> Result<WhaleTrial, SimError> {
        let seed = base_seed + trial as u64;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let honest = self.sampler.honest_population(&mut rng)?;
        let market = Market::new(0, market_size)?;

        let mean_capital =
            honest.iter().map(|u| u.capital).sum::<f64>() / honest.len() as f64;
        let whale = Participant::new(
            "whale",
            mean_capital * WHALE_CAPITAL_MULTIPLE,
            INITIAL_REPUTATION * 2.0,
            WHALE_ACCURACY,
            5,
        )?;

        let attacker_limit = self.limits.position_limit(&whale, &market, STANDARD_CHECK_BLOCK);
        let attacker_stake = self.limits.effective_stake(&whale, &market, STANDARD_CHECK_BLOCK);
        let honest_stake: f64 = honest
            .iter()
            .map(|u| self.limits.effective_stake(u, &market, STANDARD_CHECK_BLOCK))
            .sum();

        let total_effective = attacker_stake + honest_stake;
        let attacker_influence = share(attacker_stake, total_effective);

        let total_capital = whale.capital + honest.iter().map(|u| u.capital).sum::<f64>();
        let expected_influence = share(whale.capital, total_capital);

        Ok(WhaleTrial {
            trial,
            seed,
            market_size,
            n_honest: honest.len(),
            attacker_capital: whale.capital,
            attacker_reputation: whale.reputation,
            attacker_limit,
            attacker_effective_stake: attacker_stake,
            attacker_capital_pct: share(whale.capital, total_capital) * 100.0,
            attacker_influence_pct: attacker_influence * 100.0,
            expected_influence_pct: expected_influence * 100.0,
            gain_ratio: share(attacker_influence, expected_influence),
            protection_effectiveness: if expected_influence > 0.0 {
                (expected_influence - attacker_influence) / expected_influence * 100.0
            } else {
                0.0
            },
        })
    }

    pub fn whale_scenario(
        &self,
        name: &str,
        market_size: f64,
        n_trials: usize,
        base_seed: u64,
    ) -> Result<WhaleScenarioReport, SimError> {
        let mut trials = Vec::with_capacity(n_trials);
        for trial in 0..n_trials {
            trials.push(self.whale_trial(trial, base_seed, market_size)?);
        }

        Ok(WhaleScenarioReport {
            scenario_name: name.to_string(),
            market_size,
            n_trials,
            pass: None,
            gain_ratio: Stats::from_samples(
                &trials.iter().map(|t| t.gain_ratio).collect::<Vec<_>>(),
            ),
            attacker_influence_pct: Stats::from_samples(
                &trials.iter().map(|t| t.attacker_influence_pct).collect::<Vec<_>>(),
            ),
            expected_influence_pct: Stats::from_samples(
                &trials.iter().map(|t| t.expected_influence_pct).collect::<Vec<_>>(),
            ),
            protection_effectiveness: Stats::from_samples(
                &trials.iter().map(|t| t.protection_effectiveness).collect::<Vec<_>>(),
            ),
            trials,
        })
    }

    // -- sybil -------------------------------------------------------------

    /// One sybil trial: the whale's capital split across fresh identities,
    /// measured in genesis and in the standard phase, with the combined limit
    /// compared against single-identity benchmarks at tier 3 and tier 5.
    pub fn sybil_trial(
        &self,
        trial: usize,
        base_seed: u64,
        market_size: f64,
        sybil_count: usize,
    ) -> Result<SybilTrial, SimError> {
        let seed = base_seed + trial as u64;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let honest = self.sampler.honest_population(&mut rng)?;
        let market = Market::new(0, market_size)?;

        let mean_capital =
            honest.iter().map(|u| u.capital).sum::<f64>() / honest.len() as f64;
        let total_capital = mean_capital * WHALE_CAPITAL_MULTIPLE;
        let capital_per_sybil = total_capital / sybil_count as f64;

        let sybils: Vec<Participant> = (0..sybil_count)
            .map(|i| {
                Participant::new(
                    format!("sybil_{i}"),
                    capital_per_sybil,
                    INITIAL_REPUTATION,
                    SYBIL_ACCURACY,
                    1,
                )
            })
            .collect::<Result<_, _>>()?;

        // Genesis check: fresh identities carry starting reputation only,
        // so the reputation gate should exclude every one of them.
        let genesis_eligible_count = sybils
            .iter()
            .filter(|s| {
                self.limits.position_limit(s, &market, GENESIS_CHECK_BLOCK) > 0.0
            })
            .count();
        let genesis_blocked = genesis_eligible_count == 0;

        // Standard-phase check.
        let sybil_limits: Vec<f64> = sybils
            .iter()
            .map(|s| self.limits.position_limit(s, &market, STANDARD_CHECK_BLOCK))
            .collect();
        let sybil_total_limit: f64 = sybil_limits.iter().sum();

        // Benchmark: the same capital under one identity that earned its
        // way to tier 3, and one that reached tier 5.
        let tier3 = Participant::new("single_tier3", total_capital, 1000.0, 0.60, sybil_count as u32)?;
        let tier5 = Participant::new(
            "single_tier5",
            total_capital,
            10_000.0,
            0.70,
            sybil_count as u32 * 10,
        )?;
        let single_tier3_limit = self.limits.position_limit(&tier3, &market, STANDARD_CHECK_BLOCK);
        let single_tier5_limit = self.limits.position_limit(&tier5, &market, STANDARD_CHECK_BLOCK);

        let honest_total: f64 = honest
            .iter()
            .map(|u| self.limits.effective_stake(u, &market, STANDARD_CHECK_BLOCK))
            .sum();
        let total_market = sybil_total_limit + honest_total;
        let sybil_influence = share(sybil_total_limit, total_market);

        Ok(SybilTrial {
            trial,
            seed,
            market_size,
            n_honest: honest.len(),
            sybil_count,
            capital_per_sybil,
            genesis_blocked,
            genesis_eligible_count,
            sybil_total_limit,
            sybil_per_identity_limit: sybil_limits.first().copied().unwrap_or(0.0),
            single_tier3_limit,
            sybil_advantage_tier3: advantage(sybil_total_limit, single_tier3_limit),
            single_tier5_limit,
            sybil_advantage_tier5: advantage(sybil_total_limit, single_tier5_limit),
            sybil_influence_pct: sybil_influence * 100.0,
            honest_influence_pct: (1.0 - sybil_influence) * 100.0,
        })
    }

    pub fn sybil_scenario(
        &self,
        name: &str,
        market_size: f64,
        sybil_count: usize,
        n_trials: usize,
        base_seed: u64,
    ) -> Result<SybilScenarioReport, SimError> {
        let mut trials = Vec::with_capacity(n_trials);
        for trial in 0..n_trials {
            trials.push(self.sybil_trial(trial, base_seed, market_size, sybil_count)?);
        }

        let blocked = trials.iter().filter(|t| t.genesis_blocked).count();

        Ok(SybilScenarioReport {
            scenario_name: name.to_string(),
            market_size,
            n_trials,
            pass: None,
            genesis_block_rate: blocked as f64 / n_trials.max(1) as f64,
            sybil_advantage_tier3: Stats::from_samples(
                &trials.iter().map(|t| t.sybil_advantage_tier3).collect::<Vec<_>>(),
            ),
            sybil_advantage_tier5: Stats::from_samples(
                &trials.iter().map(|t| t.sybil_advantage_tier5).collect::<Vec<_>>(),
            ),
            sybil_influence_pct: Stats::from_samples(
                &trials.iter().map(|t| t.sybil_influence_pct).collect::<Vec<_>>(),
            ),
            trials,
        })
    }
}

fn share(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total
    } else {
        0.0
    }
}

fn advantage(combined_limit: f64, single_limit: f64) -> f64 {
    if single_limit > 0.0 {
        combined_limit / single_limit
    } else {
        f64::INFINITY
    }
}
