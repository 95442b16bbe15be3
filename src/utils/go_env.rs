//! Go workspace roots: override → env var → .env in dir → `go env` → fallback.

use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::Opts;

const GOROOT_KEY: &str = "GOROOT";
const GOPATH_KEY: &str = "GOPATH";

/// Where import paths are looked up. `goroot` is searched first, then each `gopath` entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GoEnv {
    pub goroot: Option<PathBuf>,
    pub gopath: Vec<PathBuf>,
}

impl GoEnv {
    /// Resolve roots for a run started in `dir` (used for `.env` lookup).
    pub fn resolve(opts: &Opts, dir: &Path) -> Self {
        let goroot = opts
            .goroot
            .clone()
            .or_else(|| lookup(GOROOT_KEY, dir).map(PathBuf::from));

        let gopath_raw = opts.gopath.clone().or_else(|| lookup(GOPATH_KEY, dir));
        let mut gopath: Vec<PathBuf> = gopath_raw
            .as_deref()
            .map(|s| std::env::split_paths(s).filter(|p| !p.as_os_str().is_empty()).collect())
            .unwrap_or_default();
        if gopath.is_empty()
            && let Some(home) = std::env::var_os("HOME")
        {
            gopath.push(PathBuf::from(home).join("go"));
        }

        let env = GoEnv { goroot, gopath };
        debug!("Go env: {:?}", env);
        env
    }

    /// `src` directories in search order, paired with whether they belong to GOROOT.
    pub fn src_roots(&self) -> impl Iterator<Item = (PathBuf, bool)> + '_ {
        self.goroot
            .iter()
            .map(|r| (r.join("src"), true))
            .chain(self.gopath.iter().map(|p| (p.join("src"), false)))
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn from_dotenv(key: &str, dir: &Path) -> Option<String> {
    let env_path = dir.join(".env");
    if !env_path.is_file() {
        return None;
    }
    dotenvy::from_path_iter(&env_path)
        .ok()?
        .filter_map(|item| item.ok())
        .find(|(k, _)| k == key)
        .and_then(|(_, v)| non_empty(&v))
}

fn from_go_tool(key: &str) -> Option<String> {
    let out = Command::new("go").args(["env", key]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    non_empty(&String::from_utf8_lossy(&out.stdout))
}

fn lookup(key: &str, dir: &Path) -> Option<String> {
    if let Ok(s) = std::env::var(key)
        && let Some(s) = non_empty(&s)
    {
        return Some(s);
    }
    if let Some(s) = from_dotenv(key, dir) {
        debug!("{} found in .env", key);
        return Some(s);
    }
    from_go_tool(key)
}
