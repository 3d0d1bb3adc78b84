//! CLI module for kamtwist.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested.
//! The entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, DEFAULT_VERIFY_RUNS};
pub use commands::{
    execute_run, execute_verify, load_config, run_cli, run_experiment, verify_reproducibility,
    RunReport, VerifySummary,
};
pub use output::{print_help, print_run_report, print_verify_summary, print_version};
