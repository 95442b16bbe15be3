//! Version control: finding the repo a package lives in and querying its state.

pub mod command;
pub mod git;
pub mod hg;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::utils::config::{GIT_FALLBACK_DEFAULT_BRANCH, HG_DEFAULT_BRANCH};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VcsKind {
    Git,
    Hg,
}

impl VcsKind {
    /// Entry that marks a repo root. Git worktrees and submodules use a `.git` file.
    fn marker(self) -> &'static str {
        match self {
            VcsKind::Git => ".git",
            VcsKind::Hg => ".hg",
        }
    }

    fn detect(dir: &Path) -> Option<VcsKind> {
        [VcsKind::Git, VcsKind::Hg].into_iter().find(|k| {
            let m = dir.join(k.marker());
            match k {
                VcsKind::Git => m.exists(),
                VcsKind::Hg => m.is_dir(),
            }
        })
    }

    pub fn default_branch(self) -> &'static str {
        match self {
            VcsKind::Git => GIT_FALLBACK_DEFAULT_BRANCH,
            VcsKind::Hg => HG_DEFAULT_BRANCH,
        }
    }
}

/// A checked-out repository. `root` is the dedup key: packages sharing it are one repo.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VcsRepo {
    pub kind: VcsKind,
    pub root: PathBuf,
}

/// Nearest repo root at or above `dir`, stopping before `src_root` (a workspace `src` is
/// never itself treated as a package repo).
pub fn find_vcs_root(dir: &Path, src_root: &Path) -> Option<VcsRepo> {
    dir.ancestors()
        .take_while(|d| *d != src_root && d.starts_with(src_root))
        .find_map(|d| {
            VcsKind::detect(d).map(|kind| VcsRepo {
                kind,
                root: d.to_path_buf(),
            })
        })
}

/// Local and remote state of one repo.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RepoState {
    pub branch: String,
    pub default_branch: String,
    pub local_rev: String,
    /// Latest revision on the remote. `None` when not checked (offline).
    pub remote_rev: Option<String>,
    pub dirty: bool,
}

impl RepoState {
    pub fn on_default_branch(&self) -> bool {
        self.branch == self.default_branch
    }

    pub fn update_available(&self) -> bool {
        self.remote_rev
            .as_deref()
            .is_some_and(|remote| remote != self.local_rev)
    }
}

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` in {dir} exited with {status}: {stderr}")]
    Failed {
        command: String,
        dir: PathBuf,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("unexpected output from `{command}`: {output:?}")]
    Parse { command: String, output: String },
}

/// Queries a repo's state. Called from worker threads, at most once per repo per run.
pub trait RepoInspector: Send + Sync {
    fn inspect(&self, repo: &VcsRepo) -> Result<RepoState, VcsError>;
}

/// Lets a caller keep a handle on the inspector it hands to the pipeline.
impl<T: RepoInspector + ?Sized> RepoInspector for Arc<T> {
    fn inspect(&self, repo: &VcsRepo) -> Result<RepoState, VcsError> {
        (**self).inspect(repo)
    }
}

/// Inspector that shells out to `git` / `hg`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandInspector {
    /// Skip the remote query.
    pub offline: bool,
}

impl CommandInspector {
    pub fn new(offline: bool) -> Self {
        Self { offline }
    }
}

impl RepoInspector for CommandInspector {
    fn inspect(&self, repo: &VcsRepo) -> Result<RepoState, VcsError> {
        match repo.kind {
            VcsKind::Git => git::inspect(&repo.root, self.offline),
            VcsKind::Hg => hg::inspect(&repo.root, self.offline),
        }
    }
}
