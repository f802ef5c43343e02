// Agora Benchmark Runner — governance attack-resistance validation
// Monte Carlo (N=30), seedable PRNG, structured JSON output
//
// Usage:
//   cargo run --release --bin bench                 # Run all scenarios (30 trials each)
//   cargo run --release --bin bench -- --trials 5   # Quick mode (5 trials each)
//   cargo run --release --bin bench -- CARTEL       # Filter by name
//   cargo run --release --bin bench -- --seed 42    # Custom base seed

mod scenarios;

use agora_engine::decay::decay_curve;
use agora_engine::report::{SuiteReport, Summary};
use agora_engine::AttackHarness;
use scenarios::{scenarios, Scenario, ScenarioKind};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    trials: usize,
    seed: u64,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        trials: 30,
        seed: 0,
        filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--trials" => {
                i += 1;
                if i < args.len() {
                    cli.trials = args[i].parse().unwrap_or(30);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    let cli = parse_args();
    let all_scenarios = scenarios();

    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios
                .iter()
                .filter(|s| {
                    s.name.to_lowercase().contains(&f_lower)
                        || s.label.to_lowercase().contains(&f_lower)
                        || s.category.to_lowercase().contains(&f_lower)
                })
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        eprintln!("No scenarios match filter: {:?}", cli.filter);
        std::process::exit(1);
    }

    let harness = AttackHarness::new().expect("Failed to build attack harness");

    println!("\n  Agora Benchmark Runner v0.2.0 (governance attack resistance)");
    println!(
        "  PRNG: ChaCha8Rng | Trials/scenario: {} | Base seed: {}",
        cli.trials, cli.seed
    );
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!(
        "  {:<28} {:>6}  {:<42} {}",
        "Scenario", "Trials", "Key metrics", "Status"
    );
    println!("  {}", "-".repeat(86));

    let suite_start = Instant::now();
    let mut cartel_reports = Vec::new();
    let mut whale_reports = Vec::new();
    let mut sybil_reports = Vec::new();
    let mut passed = 0usize;

    for scenario in &to_run {
        let (pass, metrics) = match &scenario.kind {
            ScenarioKind::Cartel {
                n_seats,
                market_value,
                strategy,
            } => {
                let mut report = harness
                    .cartel_scenario(
                        scenario.name,
                        *n_seats,
                        *market_value,
                        cli.trials,
                        cli.seed,
                        *strategy,
                    )
                    .expect("cartel scenario failed");
                let pass = scenario.criteria.evaluate_cartel(&report);
                report.pass = Some(pass);
                let metrics = format!(
                    "size {:>4.1}±{:<4.1} cost {:>8.0} ETH  profit {:>3.0}%",
                    report.min_cartel_size.mean,
                    half_ci(&report.min_cartel_size),
                    report.cartel_cost.mean,
                    report.profitability_rate * 100.0,
                );
                cartel_reports.push(report);
                (pass, metrics)
            }
            ScenarioKind::Whale { market_size } => {
                let mut report = harness
                    .whale_scenario(scenario.name, *market_size, cli.trials, cli.seed)
                    .expect("whale scenario failed");
                let pass = scenario.criteria.evaluate_whale(&report);
                report.pass = Some(pass);
                let metrics = format!(
                    "gain {:>5.3}±{:<5.3}  protection {:>5.1}%",
                    report.gain_ratio.mean,
                    half_ci(&report.gain_ratio),
                    report.protection_effectiveness.mean,
                );
                whale_reports.push(report);
                (pass, metrics)
            }
            ScenarioKind::Sybil {
                market_size,
                sybil_count,
            } => {
                let mut report = harness
                    .sybil_scenario(
                        scenario.name,
                        *market_size,
                        *sybil_count,
                        cli.trials,
                        cli.seed,
                    )
                    .expect("sybil scenario failed");
                let pass = scenario.criteria.evaluate_sybil(&report);
                report.pass = Some(pass);
                let metrics = format!(
                    "genesis block {:>3.0}%  adv(T5) {:>4.2}±{:<4.2}",
                    report.genesis_block_rate * 100.0,
                    report.sybil_advantage_tier5.mean,
                    half_ci(&report.sybil_advantage_tier5),
                );
                sybil_reports.push(report);
                (pass, metrics)
            }
        };

        if pass {
            passed += 1;
        }
        println!(
            "  {:<28} {:>6}  {:<42} {}",
            scenario.label,
            cli.trials,
            metrics,
            if pass { "PASS" } else { "FAIL" },
        );
    }

    let suite_elapsed = suite_start.elapsed();
    let total = to_run.len();
    let failed = total - passed;

    println!("  {}", "-".repeat(86));
    println!(
        "  Total: {}  Passed: {}  Failed: {}  Suite time: {:.1}s\n",
        total,
        passed,
        failed,
        suite_elapsed.as_secs_f64()
    );

    // ─── Decay Resistance Table ─────────────────────────────────────────

    let curve = decay_curve(10_000.0, 0..=12);
    println!("  Reputation decay resistance (initial 10,000 REP):");
    println!(
        "    {:>6} {:>12} {:>10} {:>10}",
        "Months", "Remaining", "Decay%", "Remain%"
    );
    for point in &curve {
        println!(
            "    {:>6} {:>12.1} {:>9.1}% {:>9.1}%",
            point.months_inactive,
            point.decayed_reputation,
            point.decay_percentage,
            point.remaining_percentage,
        );
    }
    println!();

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_millis();
    let timestamp = format!("{}", ts);

    let report = SuiteReport {
        timestamp: timestamp.clone(),
        version: "0.2.0",
        prng: "ChaCha8Rng",
        n_trials_per_scenario: cli.trials,
        base_seed: cli.seed,
        summary: Summary::from_counts(total, passed),
        cartel_scenarios: cartel_reports,
        whale_scenarios: whale_reports,
        sybil_scenarios: sybil_reports,
        decay_curve: curve,
    };

    let dir = std::path::Path::new("benchmark-results");
    if !dir.exists() {
        std::fs::create_dir_all(dir).expect("Failed to create benchmark-results/");
    }
    let path = dir.join(format!("agora-{}.json", timestamp));
    let json = serde_json::to_string_pretty(&report).expect("Failed to serialize");
    std::fs::write(&path, &json).expect("Failed to write benchmark file");
    println!("  Results saved to: {}\n", path.display());

    if failed > 0 {
        std::process::exit(1);
    }
}

fn half_ci(stats: &agora_engine::report::Stats) -> f64 {
    (stats.ci_upper - stats.ci_lower) / 2.0
}
