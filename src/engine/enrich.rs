//! The per-line status check run by pipeline workers.

use log::debug;
use std::path::PathBuf;

use crate::package::resolve_package;
use crate::pipeline::{ClaimSet, Enricher};
use crate::utils::GoEnv;
use crate::vcs::{CommandInspector, RepoInspector, find_vcs_root};
use crate::{Outcome, SkipReason};

use super::presenter::present;

/// Import path → status line. Each repo root is inspected by the first line that claims it;
/// later lines in the same repo print nothing.
pub struct StatusEnricher<I = CommandInspector> {
    env: GoEnv,
    inspector: I,
    claims: ClaimSet<PathBuf>,
}

impl<I: RepoInspector> StatusEnricher<I> {
    /// Fresh enricher with an empty claim set. Build one per run.
    pub fn new(env: GoEnv, inspector: I) -> Self {
        Self {
            env,
            inspector,
            claims: ClaimSet::new(),
        }
    }

    /// Repo roots claimed so far.
    pub fn claims(&self) -> &ClaimSet<PathBuf> {
        &self.claims
    }

    fn status(&self, item: &str) -> Outcome {
        let Some(pkg) = resolve_package(item, &self.env) else {
            return Outcome::Skipped(SkipReason::Invalid);
        };
        if pkg.is_standard() {
            return Outcome::Skipped(SkipReason::Standard);
        }
        let Some(repo) = find_vcs_root(&pkg.dir, &pkg.src_root) else {
            return Outcome::Status(present(&pkg, None));
        };
        if !self.claims.claim(repo.root.clone()) {
            return Outcome::Skipped(SkipReason::Duplicate);
        }
        match self.inspector.inspect(&repo) {
            Ok(state) => Outcome::Status(present(&pkg, Some(&state))),
            Err(e) => {
                debug!("{}: {}", repo.root.display(), e);
                Outcome::Skipped(SkipReason::VcsFailure)
            }
        }
    }
}

impl<I: RepoInspector> Enricher for StatusEnricher<I> {
    fn enrich(&self, item: &str) -> Outcome {
        self.status(item)
    }
}
