//! CLI command handler: stdin import paths → status lines on stdout.

use anyhow::{Context, Result};
use log::debug;
use std::io::{self, BufReader};
use std::path::Path;

use crate::Opts;
use crate::engine::arg_parser::Cli;
use crate::status_lines;
use crate::utils::gostatus_toml::{apply_file_to_opts, load_gostatus_toml};
use crate::utils::config::MAX_WORKERS;
use crate::utils::setup_logging;

/// Defaults → config file → CLI flags.
pub fn build_opts(cli: &Cli, dir: &Path) -> Result<Opts> {
    let mut opts = Opts::default();
    if let Some(file) = load_gostatus_toml(cli.config.as_deref(), dir)? {
        apply_file_to_opts(&file, &mut opts);
    }
    if let Some(jobs) = cli.jobs {
        opts.jobs = jobs as usize;
    }
    if let Some(v) = cli.verbose {
        opts.verbose = v;
    }
    if let Some(o) = cli.offline {
        opts.offline = o;
    }
    opts.jobs = opts.jobs.clamp(1, MAX_WORKERS);
    Ok(opts)
}

/// Run the status check over stdin, printing to stdout as results arrive.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("current directory")?;
    let opts = build_opts(cli, &cwd)?;
    setup_logging(opts.verbose);
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );
    if !cli.ignored.is_empty() {
        debug!("Ignoring arguments: {:?}", cli.ignored);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    status_lines(BufReader::new(io::stdin()), &mut out, &opts, &cwd)?;
    Ok(())
}
