//! Load `.gostatus.toml` (CLI only). Lib callers build [`Opts`] themselves.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GostatusToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsSection {
    jobs: Option<usize>,
    verbose: Option<bool>,
    offline: Option<bool>,
    goroot: Option<String>,
    gopath: Option<String>,
}

/// Parse config text. Errors name the offending key.
pub(crate) fn parse_gostatus_toml(s: &str) -> Result<GostatusToml> {
    toml::from_str(s).context("parse config")
}

/// Load the config file. An explicit path must exist; the implicit `.gostatus.toml` in `dir`
/// is optional. Either one failing to parse is an error (logging is not set up yet).
pub(crate) fn load_gostatus_toml(explicit: Option<&Path>, dir: &Path) -> Result<Option<GostatusToml>> {
    if let Some(path) = explicit {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        return parse_gostatus_toml(&s)
            .with_context(|| path.display().to_string())
            .map(Some);
    }
    let path = dir.join(PackagePaths::get().config_filename());
    let Ok(s) = std::fs::read_to_string(&path) else {
        return Ok(None);
    };
    parse_gostatus_toml(&s)
        .with_context(|| path.display().to_string())
        .map(Some)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $opts:expr, $field:ident) => {
        if let Some(v) = $section.$field {
            $opts.$field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI.
pub(crate) fn apply_file_to_opts(file: &GostatusToml, opts: &mut Opts) {
    let s = &file.settings;
    apply_file_opt!(s, opts, jobs);
    apply_file_opt!(s, opts, verbose);
    apply_file_opt!(s, opts, offline);
    if let Some(ref p) = s.goroot {
        opts.goroot = Some(PathBuf::from(p));
    }
    if let Some(ref p) = s.gopath {
        opts.gopath = Some(p.clone());
    }
}
