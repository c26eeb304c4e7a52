//! Towercover Headless Simulation Harness
//!
//! Runs coverage scenarios against `towercover-logic` and checks the
//! invariants of each run: disjoint towers, conserved area, termination.
//! Runs entirely in-process, no rendering.
//!
//! Usage:
//!   cargo run -p towercover-simtest
//!   cargo run -p towercover-simtest -- --rows 20 --cols 30 --seed 7 --verbose
//!   cargo run -p towercover-simtest -- --config sim.json --report run.json

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use towercover_logic::{
    average_towers_needed, find_maximal_rectangle, tower_counts, Budget, CoverageLoop,
    CoverageReport, Grid, Patch, RunOptions, SimulationConfig, Termination,
};

#[derive(Parser)]
#[command(author, version, about = "Run and validate randomized tower coverage scenarios", long_about = None)]
struct Args {
    /// JSON configuration file; flags below override its fields
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    #[arg(long)]
    rows: Option<usize>,

    #[arg(long)]
    cols: Option<usize>,

    /// Seed for the random source
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Run in fixed-budget mode with this many towers
    #[arg(short = 'b', long = "budget")]
    tower_budget: Option<usize>,

    /// Stop a run after this many loop iterations
    #[arg(long = "iteration-cap")]
    iteration_cap: Option<u64>,

    /// Trials for tower-count averaging
    #[arg(short = 't', long)]
    trials: Option<usize>,

    /// Write the main run's report as JSON
    #[arg(short = 'r', long = "report")]
    report: Option<PathBuf>,

    /// Print passing checks too
    #[arg(short = 'v', long)]
    verbose: bool,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let args = Args::parse();
    let mut config = load_config(&args)?;
    if config.seed.is_none() {
        // pin a seed so a failing run can be replayed
        config.seed = Some(rand::thread_rng().gen());
    }
    info!(
        "grid {}x{}, seed {:?}, budget {:?}, cap {:?}",
        config.rows,
        config.cols,
        config.seed,
        config.budget(),
        config.iteration_cap
    );

    println!("=== Towercover Simulation Harness ===\n");
    let mut results = Vec::new();

    // 1. Maximal rectangle finder
    results.extend(validate_finder(&config));

    // 2. Configured run
    let main_run = run_configured(&config)?;
    results.extend(validate_run("configured", &main_run, &config));

    // 3. Fixed budget
    results.extend(validate_fixed_budget(&config)?);

    // 4. Iteration cap
    results.extend(validate_iteration_cap(&config)?);

    // 5. Averaging
    results.extend(validate_averaging(&config)?);

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&main_run)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing report to {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        results.len(),
        failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config: SimulationConfig = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };

    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.tower_budget.is_some() {
        config.tower_budget = args.tower_budget;
    }
    if args.iteration_cap.is_some() {
        config.iteration_cap = args.iteration_cap;
    }
    if let Some(trials) = args.trials {
        config.trials = trials;
    }

    Ok(config.validated()?)
}

fn run_with(
    config: &SimulationConfig,
    budget: Budget,
    rng: &mut StdRng,
) -> Result<CoverageReport> {
    let grid = Grid::new(config.rows, config.cols)?;
    Ok(CoverageLoop::new(grid)
        .with_options(RunOptions::from(config))
        .run(budget, rng)?)
}

fn run_configured(config: &SimulationConfig) -> Result<CoverageReport> {
    run_with(config, config.budget(), &mut config.rng())
}

// ── 1. Finder ───────────────────────────────────────────────────────────

fn validate_finder(config: &SimulationConfig) -> Vec<TestResult> {
    println!("--- Maximal Rectangle Finder ---");
    let mut results = Vec::new();

    let canonical = Patch::from_rows(&[vec![1, 1, 0], vec![1, 1, 1], vec![0, 1, 1]])
        .map(|p| find_maximal_rectangle(&p, 0, 0));
    let shape = canonical.ok().and_then(|m| {
        m.rectangle
            .map(|r| (m.area, r.origin().row, r.origin().col, r.length(), r.width()))
    });
    results.push(TestResult {
        name: "finder_canonical".into(),
        passed: shape == Some((4, 0, 0, 2, 2)),
        detail: format!("got {:?}, want 2x2 block at (0,0)", shape),
    });

    let mut rng = config.rng();
    let mut mismatches = 0;
    let samples = 300;
    for _ in 0..samples {
        let h = rng.gen_range(1..=8);
        let w = rng.gen_range(1..=8);
        let bits: Vec<u8> = (0..h * w).map(|_| u8::from(rng.gen_bool(0.7))).collect();
        let Ok(patch) = Patch::new(h, w, bits) else {
            mismatches += 1;
            continue;
        };
        if find_maximal_rectangle(&patch, 0, 0).area != brute_force_area(&patch) {
            mismatches += 1;
        }
    }
    results.push(TestResult {
        name: "finder_vs_brute_force".into(),
        passed: mismatches == 0,
        detail: format!("{} of {} random patches disagree", mismatches, samples),
    });

    results
}

fn brute_force_area(p: &Patch) -> usize {
    let mut best = 0;
    for top in 0..p.height() {
        for left in 0..p.width() {
            for bottom in top..p.height() {
                for right in left..p.width() {
                    if (top..=bottom).all(|r| p.row(r)[left..=right].iter().all(|&b| b == 1)) {
                        best = best.max((bottom - top + 1) * (right - left + 1));
                    }
                }
            }
        }
    }
    best
}

// ── 2. Run invariants ───────────────────────────────────────────────────

fn validate_run(
    label: &str,
    report: &CoverageReport,
    config: &SimulationConfig,
) -> Vec<TestResult> {
    println!("--- Run: {} ---", label);
    let mut results = Vec::new();

    let mut counts = vec![0u32; config.rows * config.cols];
    for t in &report.towers {
        for c in t.cells() {
            counts[c.row * config.cols + c.col] += 1;
        }
    }
    let overlapping = counts.iter().filter(|&&n| n > 1).count();
    results.push(TestResult {
        name: format!("{}_no_overlap", label),
        passed: overlapping == 0 && report.grid.first_overlap().is_none(),
        detail: format!("{} cells covered more than once", overlapping),
    });

    let tower_area: usize = report.towers.iter().map(|t| t.area()).sum();
    results.push(TestResult {
        name: format!("{}_area_conserved", label),
        passed: tower_area == report.area && report.grid.covered_cells() == report.area,
        detail: format!(
            "towers sum to {}, report says {}, grid has {}",
            tower_area,
            report.area,
            report.grid.covered_cells()
        ),
    });

    let termination_ok = match report.termination {
        Termination::FullCoverage => report.grid.is_fully_covered(),
        Termination::BudgetExhausted => {
            matches!(config.budget(), Budget::Towers(n) if report.tower_count() == n)
        }
        Termination::IterationCap => config.iteration_cap == Some(report.iterations),
    };
    results.push(TestResult {
        name: format!("{}_termination", label),
        passed: termination_ok,
        detail: format!(
            "{:?}: {} towers, {} iterations, {} discarded, {:.1}% covered",
            report.termination,
            report.tower_count(),
            report.iterations,
            report.discarded,
            report.percent_covered
        ),
    });

    results
}

// ── 3. Fixed budget ─────────────────────────────────────────────────────

fn validate_fixed_budget(config: &SimulationConfig) -> Result<Vec<TestResult>> {
    println!("--- Fixed Budget ---");
    let budget = config.tower_budget.unwrap_or(5);
    let capped = SimulationConfig {
        tower_budget: Some(budget),
        iteration_cap: None,
        ..config.clone()
    };
    let report = run_configured(&capped)?;
    let mut results = validate_run("fixed_budget", &report, &capped);
    results.push(TestResult {
        name: "fixed_budget_length".into(),
        passed: report.tower_count() <= budget
            && (report.tower_count() == budget
                || report.termination == Termination::FullCoverage),
        detail: format!("{} towers for a budget of {}", report.tower_count(), budget),
    });
    Ok(results)
}

// ── 4. Iteration cap ────────────────────────────────────────────────────

fn validate_iteration_cap(config: &SimulationConfig) -> Result<Vec<TestResult>> {
    println!("--- Iteration Cap ---");
    let capped = SimulationConfig {
        iteration_cap: Some(1),
        tower_budget: None,
        ..config.clone()
    };
    let report = run_configured(&capped)?;
    let full_in_one = report.tower_count() == 1 && report.grid.is_fully_covered();
    if full_in_one {
        warn!("first candidate covered the whole grid; cap check is trivial");
    }
    Ok(vec![TestResult {
        name: "iteration_cap_distinct_outcome".into(),
        passed: full_in_one
            || (report.termination == Termination::IterationCap
                && !report.converged()
                && report.iterations == 1),
        detail: format!("{:?} after {} iteration(s)", report.termination, report.iterations),
    }])
}

// ── 5. Averaging ────────────────────────────────────────────────────────

fn validate_averaging(config: &SimulationConfig) -> Result<Vec<TestResult>> {
    println!("--- Averaging ---");
    let seed = config.seed.unwrap_or_default();
    let counts = tower_counts(
        config.rows,
        config.cols,
        config.trials,
        &mut StdRng::seed_from_u64(seed),
    )?;
    let average = average_towers_needed(
        config.rows,
        config.cols,
        config.trials,
        &mut StdRng::seed_from_u64(seed),
    )?;
    let min = counts.iter().copied().min().unwrap_or(0);
    let max = counts.iter().copied().max().unwrap_or(0);
    info!(
        "{} trials on {}x{}: average {} towers (min {}, max {})",
        config.trials, config.rows, config.cols, average, min, max
    );

    Ok(vec![TestResult {
        name: "average_within_trial_range".into(),
        passed: (min..=max).contains(&average)
            && average == counts.iter().sum::<usize>() / counts.len(),
        detail: format!("average {} over {} trials", average, counts.len()),
    }])
}
