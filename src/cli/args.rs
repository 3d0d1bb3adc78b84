//! CLI argument parsing.
//!
//! Hand-rolled so that parsing can be driven from any iterator of strings
//! in tests, not just `std::env::args()`.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the ensemble and write the figure.
    Run {
        /// Optional YAML configuration; defaults to the built-in experiment.
        config_path: Option<PathBuf>,
        /// Optional seed override.
        seed_override: Option<u64>,
        /// Optional figure path override.
        output_override: Option<PathBuf>,
        /// Enable verbose output.
        verbose: bool,
    },
    /// Check that repeated runs reproduce bit-identical orbits.
    Verify {
        /// Optional YAML configuration.
        config_path: Option<PathBuf>,
        /// Number of verification runs.
        runs: usize,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

/// Default number of `verify` runs.
pub const DEFAULT_VERIFY_RUNS: usize = 3;

impl Args {
    /// Parse command-line arguments from an iterator.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Whether the command asked for verbose output.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        matches!(self.command, Command::Run { verbose: true, .. })
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(&args[2..]),
            "verify" => Self::parse_verify_command(&args[2..]),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    /// Parse the 'run' command arguments (everything after `run`).
    fn parse_run_command(rest: &[String]) -> Command {
        let mut config_path = None;
        let mut seed_override = None;
        let mut output_override = None;
        let mut verbose = false;

        let mut i = 0;
        while i < rest.len() {
            match rest[i].as_str() {
                "--seed" => {
                    if let Some(value) = rest.get(i + 1) {
                        match value.parse() {
                            Ok(seed) => seed_override = Some(seed),
                            Err(_) => eprintln!("Warning: ignoring invalid seed '{value}'"),
                        }
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "-o" | "--output" => {
                    if let Some(value) = rest.get(i + 1) {
                        output_override = Some(PathBuf::from(value));
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "-v" | "--verbose" => {
                    verbose = true;
                    i += 1;
                }
                other if !other.starts_with('-') && config_path.is_none() => {
                    config_path = Some(PathBuf::from(other));
                    i += 1;
                }
                _ => i += 1,
            }
        }

        Command::Run {
            config_path,
            seed_override,
            output_override,
            verbose,
        }
    }

    /// Parse the 'verify' command arguments (everything after `verify`).
    fn parse_verify_command(rest: &[String]) -> Command {
        let mut config_path = None;
        let mut runs = DEFAULT_VERIFY_RUNS;

        let mut i = 0;
        while i < rest.len() {
            match rest[i].as_str() {
                "--runs" => {
                    if let Some(n) = rest.get(i + 1).and_then(|v| v.parse().ok()) {
                        runs = n;
                    }
                    i += 2;
                }
                other if !other.starts_with('-') && config_path.is_none() => {
                    config_path = Some(PathBuf::from(other));
                    i += 1;
                }
                _ => i += 1,
            }
        }

        Command::Verify { config_path, runs }
    }
}
