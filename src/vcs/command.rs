use log::debug;
use std::path::Path;
use std::process::{Command, Stdio};

use super::VcsError;

/// Run `program args..` in `dir` and return trimmed stdout. Non-zero exit is an error.
/// Never prompts: stdin is closed and git's credential prompt is disabled.
pub fn run(dir: &Path, program: &str, args: &[&str]) -> Result<String, VcsError> {
    let command = format!("{} {}", program, args.join(" "));
    debug!("{}: {}", dir.display(), command);
    let out = Command::new(program)
        .args(args)
        .current_dir(dir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .output()
        .map_err(|source| VcsError::Spawn {
            program: program.to_string(),
            source,
        })?;
    if !out.status.success() {
        return Err(VcsError::Failed {
            command,
            dir: dir.to_path_buf(),
            status: out.status,
            stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
}

/// First whitespace-separated field of the first line, e.g. the hash in `ls-remote` output.
pub fn first_field(command: &str, output: &str) -> Result<String, VcsError> {
    output
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().next())
        .map(str::to_string)
        .ok_or_else(|| VcsError::Parse {
            command: command.to_string(),
            output: output.to_string(),
        })
}
