use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

use super::presenter::LEGEND;
use crate::utils::config::MAX_WORKERS;

const EXAMPLES: &str = "\
Examples:
  # Show status of all your packages
  go list all | gostatus

  # Show status of all dependencies (recursive) of package in cur working dir
  go list -f '{{join .Deps \"\\n\"}}' . | gostatus";

/// Show the status of (many) Go packages.
#[derive(Clone, Debug, Parser)]
#[command(name = "gostatus", version)]
#[command(about = "Show the status of (many) Go packages read from stdin.")]
#[command(override_usage = "[newline separated packages] | gostatus [OPTIONS]")]
pub struct Cli {
    /// Number of packages checked concurrently. Default: 8.
    #[arg(long, short = 'j', value_parser = clap::value_parser!(u32).range(1..=MAX_WORKERS as i64))]
    pub jobs: Option<u32>,

    /// Verbose output (logs skipped packages and a run summary to stderr).
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Do not contact remotes; the `+` flag is never shown.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub offline: Option<bool>,

    /// Config file. Default: `.gostatus.toml` in the current directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Trailing arguments are accepted and ignored; packages are only read from stdin.
    #[arg(hide = true)]
    pub ignored: Vec<String>,
}

/// Usage, examples and legend, as printed on stderr for `-h` and bad invocations.
pub fn usage_text() -> String {
    let usage = Cli::command().render_help();
    format!("{}\n{}\n\n{}\n", usage, EXAMPLES, LEGEND)
}

/// First line of clap's rendered error (`error: ...`), without its own usage block.
pub fn error_line(err: &clap::Error) -> String {
    err.render()
        .to_string()
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Parse args; on `--help`, an unknown flag, or a bad value print usage to stderr and
/// exit with status 2. `--version` prints to stdout and exits 0.
pub fn parse_or_exit() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::DisplayVersion => err.exit(),
        Err(err) => {
            if err.kind() != ErrorKind::DisplayHelp {
                eprintln!("{}\n", error_line(&err));
            }
            eprint!("{}", usage_text());
            std::process::exit(2);
        }
    }
}
