//! Go package lookup: import path → directory under GOROOT or GOPATH.

pub mod clause;

use std::path::{Path, PathBuf};

use crate::utils::GoEnv;

pub use clause::{package_clause, package_name};

/// A Go package found on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoPackage {
    pub import_path: String,
    /// Package directory.
    pub dir: PathBuf,
    /// The `src` directory it was found under.
    pub src_root: PathBuf,
    /// Found under GOROOT rather than a GOPATH entry.
    pub goroot: bool,
    /// Declares `package main`.
    pub is_command: bool,
}

impl GoPackage {
    /// Standard library: lives in GOROOT and its import path has no dot (no domain).
    pub fn is_standard(&self) -> bool {
        self.goroot && !self.import_path.is_empty() && !self.import_path.contains('.')
    }
}

/// Syntactic check only: relative, slash-separated, no `.`/`..` segments, no whitespace.
pub fn is_valid_import_path(path: &str) -> bool {
    if path.is_empty() || path.contains('\\') || path.chars().any(char::is_whitespace) {
        return false;
    }
    // A leading `/` yields an empty first segment.
    !path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..")
}

fn is_go_source(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "go") && path.is_file()
}

fn is_test_source(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with("_test.go"))
}

/// Go source files directly in `dir`, sorted for stable results.
fn go_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = rd
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| is_go_source(p))
        .collect();
    files.sort();
    files
}

/// Resolve `import_path` against `env`. `None` when the path is malformed or no root has a
/// directory with Go files for it.
pub fn resolve_package(import_path: &str, env: &GoEnv) -> Option<GoPackage> {
    let import_path = import_path.trim();
    if !is_valid_import_path(import_path) {
        return None;
    }
    for (src_root, goroot) in env.src_roots() {
        let dir = src_root.join(import_path);
        if !dir.is_dir() {
            continue;
        }
        let files = go_files(&dir);
        if files.is_empty() {
            continue;
        }
        let is_command = files
            .iter()
            .filter(|f| !is_test_source(f))
            .any(|f| package_name(f).as_deref() == Some("main"));
        return Some(GoPackage {
            import_path: import_path.to_string(),
            dir,
            src_root,
            goroot,
            is_command,
        });
    }
    None
}
