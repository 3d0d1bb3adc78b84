//! CLI output formatting.

use super::commands::{RunReport, VerifySummary};

/// Print version information.
pub fn print_version() {
    match option_env!("KAMTWIST_GIT_HASH") {
        Some(hash) => println!("kamtwist {} ({hash})", env!("CARGO_PKG_VERSION")),
        None => println!("kamtwist {}", env!("CARGO_PKG_VERSION")),
    }
}

/// Print help message.
pub fn print_help() {
    println!(
        r"kamtwist - KAM twist map (standard map) phase portraits

USAGE:
    kamtwist <COMMAND> [OPTIONS]

COMMANDS:
    run [config.yaml]           Run the orbit ensemble and write the figure
        --seed <N>              Override the configured seed
        -o, --output <PATH>     Override the figure path
        -v, --verbose           Enable verbose output

    verify [config.yaml]        Verify bit-identical orbits across runs
        --runs <N>              Number of verification runs (default: 3)

    help                        Show this help message
    version                     Show version information

Without a config file the built-in experiment is used:
ε = 0.3, seed 2, 50 orbits, written to kam_twist.svg.

EXAMPLES:
    kamtwist run
    kamtwist run experiments/kam_twist.yaml --seed 12345
    kamtwist verify experiments/kam_twist.yaml --runs 5

Set RUST_LOG=kamtwist=debug for per-orbit logging.
"
    );
}

fn format_action(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.6}"))
}

/// Print the report of a `run`.
pub fn print_run_report(report: &RunReport, verbose: bool) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Experiment: {}", report.name);
    println!("Seed: {}", report.seed);
    println!("Epsilon: {}", report.epsilon);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    let s = &report.summary;
    println!("Orbits:");
    println!("  Plotted:  {}", s.orbits);
    println!("  Empty:    {}", s.empty_orbits);
    println!("  Rejected: {}", s.rejected);
    println!("  Points:   {}", s.total_points);

    if verbose {
        println!("\nAction range:");
        println!("  Min: {}", format_action(s.action_min));
        println!("  Max: {}", format_action(s.action_max));
    }

    println!("\nFingerprint: {}", report.fingerprint);
    println!("Figure: {}", report.output.display());
}

/// Print the outcome of a `verify`.
pub fn print_verify_summary(summary: &VerifySummary) {
    let status = if summary.passed { "PASSED" } else { "FAILED" };
    let sym = if summary.passed { "✓" } else { "✗" };

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Reproducibility Check");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    println!("  Runs:      {}", summary.runs);
    println!("  Identical: {}", summary.identical);
    println!("  Platform:  {}", summary.platform);
    println!("\n  Reference Hash: {}", summary.reference_hash);

    if summary.run_hashes.len() > 1 {
        println!("\n  Run Hashes:");
        for (i, hash) in summary.run_hashes.iter().enumerate() {
            let match_sym = if hash == &summary.reference_hash {
                "="
            } else {
                "!"
            };
            println!("    Run {}: {} {}", i + 1, hash, match_sym);
        }
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{sym} Result: {status}");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}
