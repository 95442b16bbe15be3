use std::path::Path;

use super::command::{first_field, run};
use super::{RepoState, VcsError, VcsKind};

/// `hg identify -i` marks a dirty working copy with a trailing `+`.
pub fn strip_dirty_marker(rev: &str) -> &str {
    rev.strip_suffix('+').unwrap_or(rev)
}

pub fn inspect(root: &Path, offline: bool) -> Result<RepoState, VcsError> {
    let branch = run(root, "hg", &["branch"])?;
    let id = run(root, "hg", &["--debug", "identify", "-i"])?;
    let local_rev = strip_dirty_marker(&first_field("hg identify", &id)?).to_string();
    let dirty = !run(root, "hg", &["status"])?.is_empty();
    let default_branch = VcsKind::Hg.default_branch().to_string();
    let remote_rev = if offline {
        None
    } else {
        let out = run(
            root,
            "hg",
            &["--debug", "identify", "-i", "-r", default_branch.as_str(), "default"],
        )?;
        Some(first_field("hg identify default", &out)?)
    };
    Ok(RepoState {
        branch,
        default_branch,
        local_rev,
        remote_rev,
        dirty,
    })
}
