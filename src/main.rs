//! kamtwist CLI - KAM twist map phase portraits
//!
//! Argument parsing and command handling live in `kamtwist::cli`.

use kamtwist::cli::{run_cli, Args};
use kamtwist::logging::init_logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose());
    run_cli(args)
}
