//! gostatus: show the status of (many) Go packages.
//!
//! Import paths come in one per line; each distinct repository is checked once, in parallel,
//! and a status line is written as soon as it is ready.

pub mod engine;
pub mod package;
pub mod pipeline;
pub mod types;
pub mod utils;
pub mod vcs;

/// Re-export types for API
pub use types::*;

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use crate::engine::StatusEnricher;
use crate::pipeline::{run_pipeline, write_results};
use crate::utils::GoEnv;
use crate::vcs::{CommandInspector, RepoInspector};

/// Result alias used by public gostatus API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Read import paths from `reader`, write status lines to `writer`.
///
/// GOROOT/GOPATH come from `opts` or are resolved relative to `dir` (see [`GoEnv::resolve`]).
/// Repos are queried with `git`/`hg`; use [`status_lines_with`] to supply another inspector.
pub fn status_lines<R, W>(reader: R, writer: &mut W, opts: &Opts, dir: &Path) -> Result<PipelineSummary>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    let env = GoEnv::resolve(opts, dir);
    status_lines_with(reader, writer, env, CommandInspector::new(opts.offline), opts.jobs)
}

/// [`status_lines`] with explicit roots and repo inspector.
pub fn status_lines_with<R, W, I>(
    reader: R,
    writer: &mut W,
    env: GoEnv,
    inspector: I,
    jobs: usize,
) -> Result<PipelineSummary>
where
    R: BufRead + Send + 'static,
    W: Write,
    I: RepoInspector + 'static,
{
    let enricher = Arc::new(StatusEnricher::new(env, inspector));
    let handles = run_pipeline(reader, enricher, jobs);
    write_results(handles, writer)
}
