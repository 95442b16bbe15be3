//! Public and internal types for the gostatus API and pipeline.

use std::fmt;
use std::path::PathBuf;

use crate::utils::config::DEFAULT_WORKERS;

/// What the enricher made of one input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Formatted status line, sent to the sink.
    Status(String),
    /// Nothing to print. The reason is only counted and logged.
    Skipped(SkipReason),
}

pub(crate) const SKIP_REASON_COUNT: usize = 5;

/// Why a line produced no output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Empty line, malformed import path, or no package found.
    Invalid,
    /// Standard library package.
    Standard,
    /// Another line already claimed the same repository.
    Duplicate,
    /// Querying the repository failed.
    VcsFailure,
    /// The enricher panicked on this line.
    Panicked,
}

impl SkipReason {
    pub const ALL: [SkipReason; SKIP_REASON_COUNT] = [
        SkipReason::Invalid,
        SkipReason::Standard,
        SkipReason::Duplicate,
        SkipReason::VcsFailure,
        SkipReason::Panicked,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::Invalid => "invalid",
            SkipReason::Standard => "standard",
            SkipReason::Duplicate => "duplicate",
            SkipReason::VcsFailure => "vcs-failure",
            SkipReason::Panicked => "panicked",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters for a finished run. `attempted == emitted + skipped()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    pub attempted: usize,
    pub emitted: usize,
    pub skipped: [usize; SKIP_REASON_COUNT],
}

impl PipelineSummary {
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped[reason.index()]
    }

    pub fn skipped(&self) -> usize {
        self.skipped.iter().sum()
    }
}

impl fmt::Display for PipelineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines, {} printed, {} skipped",
            self.attempted,
            self.emitted,
            self.skipped()
        )?;
        for reason in SkipReason::ALL {
            let n = self.skipped_for(reason);
            if n > 0 {
                write!(f, " [{}: {}]", reason, n)?;
            }
        }
        Ok(())
    }
}

/// Full options (CLI and lib).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opts {
    /// Worker thread count. Bounds concurrent enrichment calls.
    pub jobs: usize,
    /// Debug logging, including per-line skip reasons.
    pub verbose: bool,
    /// Do not contact remotes; the `+` flag is never shown.
    pub offline: bool,
    /// GOROOT override. When None, resolved from env, `.env`, or `go env`.
    pub goroot: Option<PathBuf>,
    /// GOPATH override (list separated like `$PATH`). When None, resolved like GOROOT.
    pub gopath: Option<String>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            jobs: DEFAULT_WORKERS,
            verbose: false,
            offline: false,
            goroot: None,
            gopath: None,
        }
    }
}
