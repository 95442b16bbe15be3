use std::path::Path;

use super::command::{first_field, run};
use super::{RepoState, VcsError, VcsKind};
use crate::utils::config::GIT_REMOTE;

/// `origin/main` → `main`. Anything not under the remote is left alone.
pub fn strip_remote_prefix(symref: &str) -> &str {
    symref
        .strip_prefix(GIT_REMOTE)
        .and_then(|s| s.strip_prefix('/'))
        .unwrap_or(symref)
}

/// Branch the remote's HEAD points at, or the fallback when no remote HEAD is recorded.
fn default_branch(root: &Path) -> String {
    let symref = format!("refs/remotes/{}/HEAD", GIT_REMOTE);
    match run(root, "git", &["symbolic-ref", "--short", symref.as_str()]) {
        Ok(s) if !s.is_empty() => strip_remote_prefix(&s).to_string(),
        _ => VcsKind::Git.default_branch().to_string(),
    }
}

pub fn inspect(root: &Path, offline: bool) -> Result<RepoState, VcsError> {
    let branch = run(root, "git", &["rev-parse", "--abbrev-ref", "HEAD"])?;
    let local_rev = run(root, "git", &["rev-parse", "HEAD"])?;
    let dirty = !run(root, "git", &["status", "--porcelain"])?.is_empty();
    let default_branch = default_branch(root);
    let remote_rev = if offline {
        None
    } else {
        let out = run(root, "git", &["ls-remote", GIT_REMOTE, "HEAD"])?;
        Some(first_field("git ls-remote", &out)?)
    };
    Ok(RepoState {
        branch,
        default_branch,
        local_rev,
        remote_rev,
        dirty,
    })
}
