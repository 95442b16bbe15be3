//! Status line formatting.

use crate::package::GoPackage;
use crate::vcs::RepoState;

/// Legend printed with the usage text. Column order matches [`present`].
pub const LEGEND: &str = "\
Legend:
  @ - Vcs repo
  b - Non-master branch checked out
  * - Uncommited changes in working dir
  + - Update available (latest remote revision doesn't match local revision)
  / - Command (package main)";

fn flag(on: bool, c: char) -> char {
    if on { c } else { ' ' }
}

/// Five flag columns (`@b*+/`, space when unset), a space, then the import path.
/// `state` is `None` for packages not under version control.
pub fn present(pkg: &GoPackage, state: Option<&RepoState>) -> String {
    let flags: String = [
        flag(state.is_some(), '@'),
        flag(state.is_some_and(|s| !s.on_default_branch()), 'b'),
        flag(state.is_some_and(|s| s.dirty), '*'),
        flag(state.is_some_and(RepoState::update_available), '+'),
        flag(pkg.is_command, '/'),
    ]
    .into_iter()
    .collect();
    format!("{} {}", flags, pkg.import_path)
}
