// Scenario Definitions — cartel, whale, and sybil attack grids
// All scenario logic lives in the library harness; this table only names
// the configurations and their acceptance thresholds.

use agora_engine::report::{CartelScenarioReport, SybilScenarioReport, WhaleScenarioReport};
use agora_engine::Strategy;

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub kind: ScenarioKind,
    pub criteria: PassCriteria,
}

pub enum ScenarioKind {
    Cartel {
        n_seats: usize,
        market_value: f64,
        strategy: Strategy,
    },
    Whale {
        market_size: f64,
    },
    Sybil {
        market_size: f64,
        sybil_count: usize,
    },
}

#[derive(Default)]
pub struct PassCriteria {
    /// Cartel: highest acceptable fraction of profitable trials.
    pub max_profitability_rate: Option<f64>,
    /// Cartel: highest acceptable number of infeasible trials.
    pub max_infeasible: Option<usize>,
    /// Whale: highest acceptable mean gain ratio (1.0 = no amplification).
    pub max_mean_gain_ratio: Option<f64>,
    /// Sybil: lowest acceptable fraction of trials fully blocked in genesis.
    pub min_genesis_block_rate: Option<f64>,
    /// Sybil: highest acceptable mean combined-limit advantage over a
    /// tier-5 single identity.
    pub max_mean_sybil_advantage: Option<f64>,
}

const TOL: f64 = 1e-9;

impl PassCriteria {
    pub fn evaluate_cartel(&self, report: &CartelScenarioReport) -> bool {
        if let Some(max) = self.max_profitability_rate {
            if report.profitability_rate > max + TOL {
                return false;
            }
        }
        if let Some(max) = self.max_infeasible {
            if report.infeasible_count > max {
                return false;
            }
        }
        true
    }

    pub fn evaluate_whale(&self, report: &WhaleScenarioReport) -> bool {
        if let Some(max) = self.max_mean_gain_ratio {
            if report.gain_ratio.mean > max + TOL {
                return false;
            }
        }
        true
    }

    pub fn evaluate_sybil(&self, report: &SybilScenarioReport) -> bool {
        if let Some(min) = self.min_genesis_block_rate {
            if report.genesis_block_rate < min - TOL {
                return false;
            }
        }
        if let Some(max) = self.max_mean_sybil_advantage {
            if report.sybil_advantage_tier5.mean > max + TOL {
                return false;
            }
        }
        true
    }
}

// ─── Scenario Table ─────────────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    let mut table = Vec::new();

    // Cartel grid: seat counts from council minimum to maximum, across
    // small, medium, and large markets. The LP relaxation scales to all of
    // them; exact enumeration is cross-checked in the test suite.
    let cartel_criteria = || PassCriteria {
        max_profitability_rate: Some(0.0),
        max_infeasible: Some(0),
        ..PassCriteria::default()
    };
    for &n_seats in &[7usize, 10, 15, 21] {
        for &market_value in &[100.0, 1_000.0, 10_000.0] {
            table.push(Scenario {
                name: cartel_name(n_seats, market_value),
                label: cartel_label(n_seats, market_value),
                category: "cartel",
                kind: ScenarioKind::Cartel {
                    n_seats,
                    market_value,
                    strategy: Strategy::LinearProgram,
                },
                criteria: cartel_criteria(),
            });
        }
    }

    // Whale grid. In markets large enough that the catch-all ceiling
    // exceeds the whale's capital the limit cannot bite, so the bound
    // there is "no amplification" rather than a reduction.
    for &(market_size, name, label, max_ratio) in &[
        (10.0, "WHALE_10", "Whale / 10 ETH market", 0.5),
        (100.0, "WHALE_100", "Whale / 100 ETH market", 1.0),
        (1_000.0, "WHALE_1K", "Whale / 1k ETH market", 1.01),
        (10_000.0, "WHALE_10K", "Whale / 10k ETH market", 1.01),
    ] {
        table.push(Scenario {
            name,
            label,
            category: "whale",
            kind: ScenarioKind::Whale { market_size },
            criteria: PassCriteria {
                max_mean_gain_ratio: Some(max_ratio),
                ..PassCriteria::default()
            },
        });
    }

    // Sybil grid: ten-way identity split, every market size. Genesis must
    // block every identity, and the combined standard-phase limit must stay
    // within 2x of an earned tier-5 single identity.
    for &(market_size, name, label) in &[
        (10.0, "SYBIL_10", "Sybil x10 / 10 ETH market"),
        (100.0, "SYBIL_100", "Sybil x10 / 100 ETH market"),
        (1_000.0, "SYBIL_1K", "Sybil x10 / 1k ETH market"),
        (10_000.0, "SYBIL_10K", "Sybil x10 / 10k ETH market"),
    ] {
        table.push(Scenario {
            name,
            label,
            category: "sybil",
            kind: ScenarioKind::Sybil {
                market_size,
                sybil_count: 10,
            },
            criteria: PassCriteria {
                min_genesis_block_rate: Some(1.0),
                max_mean_sybil_advantage: Some(2.0),
                ..PassCriteria::default()
            },
        });
    }

    table
}

fn cartel_name(n_seats: usize, market_value: f64) -> &'static str {
    match (n_seats, market_value as u64) {
        (7, 100) => "CARTEL_7_100",
        (7, 1_000) => "CARTEL_7_1K",
        (7, 10_000) => "CARTEL_7_10K",
        (10, 100) => "CARTEL_10_100",
        (10, 1_000) => "CARTEL_10_1K",
        (10, 10_000) => "CARTEL_10_10K",
        (15, 100) => "CARTEL_15_100",
        (15, 1_000) => "CARTEL_15_1K",
        (15, 10_000) => "CARTEL_15_10K",
        (21, 100) => "CARTEL_21_100",
        (21, 1_000) => "CARTEL_21_1K",
        (21, 10_000) => "CARTEL_21_10K",
        _ => "CARTEL",
    }
}

fn cartel_label(n_seats: usize, market_value: f64) -> &'static str {
    match (n_seats, market_value as u64) {
        (7, 100) => "Cartel 7 seats / 100 ETH",
        (7, 1_000) => "Cartel 7 seats / 1k ETH",
        (7, 10_000) => "Cartel 7 seats / 10k ETH",
        (10, 100) => "Cartel 10 seats / 100 ETH",
        (10, 1_000) => "Cartel 10 seats / 1k ETH",
        (10, 10_000) => "Cartel 10 seats / 10k ETH",
        (15, 100) => "Cartel 15 seats / 100 ETH",
        (15, 1_000) => "Cartel 15 seats / 1k ETH",
        (15, 10_000) => "Cartel 15 seats / 10k ETH",
        (21, 100) => "Cartel 21 seats / 100 ETH",
        (21, 1_000) => "Cartel 21 seats / 1k ETH",
        (21, 10_000) => "Cartel 21 seats / 10k ETH",
        _ => "Cartel",
    }
}
