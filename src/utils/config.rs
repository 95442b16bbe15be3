//! Application configuration constants.
//! Tuning and names in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    /// Config file looked up in the current directory when `--config` is not given.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Worker threads ----

/// Default worker count. Work is dominated by VCS subprocess latency, so this does not
/// follow the CPU count.
pub const DEFAULT_WORKERS: usize = 8;

/// Upper bound accepted for `--jobs` / `jobs` in the config file.
pub const MAX_WORKERS: usize = 256;

// ---- Channels ----

/// Capacity of the result channel between workers and the sink. Workers block on send
/// when the sink falls behind.
pub const RESULT_CHANNEL_CAP: usize = 64;

// ---- VCS ----

/// Branch treated as "not the default" reference when the remote HEAD is unknown (git).
pub const GIT_FALLBACK_DEFAULT_BRANCH: &str = "master";

/// Default branch name for Mercurial repos.
pub const HG_DEFAULT_BRANCH: &str = "default";

/// Remote name queried for the latest revision.
pub const GIT_REMOTE: &str = "origin";
