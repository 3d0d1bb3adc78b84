//! CLI command handlers.
//!
//! Each handler has a fallible core (`execute_*`) returning a report, and a
//! thin wrapper that prints it and maps the outcome to an exit code.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use super::output::{print_help, print_run_report, print_verify_summary, print_version};
use super::{Args, Command};
use crate::config::TwistConfig;
use crate::engine::rng::SimRng;
use crate::error::TwistResult;
use crate::render::{write_svg, Figure};
use crate::twist::ensemble::{run_ensemble, Ensemble, EnsembleSummary};

/// What a `run` produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Experiment name from the configuration.
    pub name: String,
    /// Seed of the PRNG stream.
    pub seed: u64,
    /// Perturbation strength.
    pub epsilon: f64,
    /// Ensemble counts and ranges.
    pub summary: EnsembleSummary,
    /// Blake3 fingerprint of the orbits.
    pub fingerprint: String,
    /// Where the figure was written.
    pub output: PathBuf,
}

/// Outcome of a reproducibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifySummary {
    /// Whether every run matched the first.
    pub passed: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Whether all fingerprints were identical.
    pub identical: bool,
    /// Fingerprint of the first run.
    pub reference_hash: String,
    /// Fingerprint of every run, in order.
    pub run_hashes: Vec<String>,
    /// Target architecture the check ran on.
    pub platform: String,
}

/// Main CLI entry point.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run {
            config_path,
            seed_override,
            output_override,
            verbose,
        } => run_experiment(
            config_path.as_deref(),
            seed_override,
            output_override,
            verbose,
        ),
        Command::Verify { config_path, runs } => {
            verify_reproducibility(config_path.as_deref(), runs)
        }
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Load a configuration file, or the built-in experiment when `path` is
/// `None`.
///
/// # Errors
///
/// Returns error if the file cannot be read, parsed or validated.
pub fn load_config(path: Option<&Path>) -> TwistResult<TwistConfig> {
    match path {
        Some(p) => TwistConfig::load(p),
        None => Ok(TwistConfig::default()),
    }
}

fn simulate(config: &TwistConfig) -> Ensemble {
    let mut rng = SimRng::new(config.reproducibility.seed);
    run_ensemble(&config.map, &mut rng)
}

/// Run the ensemble described by `config` and write its figure.
///
/// # Errors
///
/// Returns error if the configuration is invalid, or the figure cannot be
/// rendered or written.
pub fn execute_run(config: &TwistConfig) -> TwistResult<RunReport> {
    config.check()?;
    let ensemble = simulate(config);
    let fingerprint = ensemble.fingerprint()?;
    write_svg(&Figure::from_config(config), &ensemble.orbits, &config.plot.output)?;

    Ok(RunReport {
        name: config.simulation.name.clone(),
        seed: ensemble.seed,
        epsilon: ensemble.epsilon,
        summary: ensemble.summary(),
        fingerprint,
        output: config.plot.output.clone(),
    })
}

/// Run the ensemble `runs` times and compare fingerprints.
///
/// At least one run is always performed.
///
/// # Errors
///
/// Returns error if the configuration is invalid or fingerprinting fails.
pub fn execute_verify(config: &TwistConfig, runs: usize) -> TwistResult<VerifySummary> {
    config.check()?;
    let runs = runs.max(1);
    let run_hashes = (0..runs)
        .map(|_| simulate(config).fingerprint())
        .collect::<TwistResult<Vec<_>>>()?;
    let reference_hash = run_hashes[0].clone();
    let identical = run_hashes.iter().all(|h| *h == reference_hash);

    Ok(VerifySummary {
        passed: identical,
        runs,
        identical,
        reference_hash,
        run_hashes,
        platform: std::env::consts::ARCH.to_string(),
    })
}

/// Run the experiment and print a report.
///
/// # Arguments
///
/// * `path` - Optional YAML configuration
/// * `seed_override` - Seed replacing the configured one
/// * `output_override` - Figure path replacing the configured one
/// * `verbose` - Whether to print per-orbit detail
#[must_use]
pub fn run_experiment(
    path: Option<&Path>,
    seed_override: Option<u64>,
    output_override: Option<PathBuf>,
    verbose: bool,
) -> ExitCode {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║           kamtwist - KAM Twist Map Ensemble                   ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    let mut config = match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };
    if let Some(seed) = seed_override {
        config.reproducibility.seed = seed;
    }
    if let Some(output) = output_override {
        config.plot.output = output;
    }

    info!(
        name = %config.simulation.name,
        seed = config.reproducibility.seed,
        "starting run"
    );

    match execute_run(&config) {
        Ok(report) => {
            print_run_report(&report, verbose);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "run failed");
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Verify reproducibility across multiple runs.
///
/// # Arguments
///
/// * `path` - Optional YAML configuration
/// * `runs` - Number of verification runs to perform
#[must_use]
pub fn verify_reproducibility(path: Option<&Path>, runs: usize) -> ExitCode {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║        kamtwist - Reproducibility Verification                ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    let result = load_config(path).and_then(|config| execute_verify(&config, runs));
    match result {
        Ok(summary) => {
            print_verify_summary(&summary);
            if summary.passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            error!(error = %e, "verification failed");
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
