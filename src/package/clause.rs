//! Reading the `package` clause of Go source files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Package name from Go source text: the first token after `package` on the first line
/// that is not blank or a comment. Only the header is scanned.
pub fn package_clause<R: BufRead>(reader: R) -> Option<String> {
    let mut in_block = false;
    for line in reader.lines() {
        let line = line.ok()?;
        let mut rest = line.trim();
        loop {
            if in_block {
                match rest.find("*/") {
                    Some(end) => {
                        rest = rest[end + 2..].trim_start();
                        in_block = false;
                    }
                    None => break,
                }
            } else if let Some(after) = rest.strip_prefix("/*") {
                rest = after;
                in_block = true;
            } else {
                break;
            }
        }
        if in_block || rest.is_empty() || rest.starts_with("//") {
            continue;
        }
        let name = rest.strip_prefix("package")?;
        if !name.starts_with(char::is_whitespace) {
            return None;
        }
        return name
            .split(|c: char| c.is_whitespace() || c == ';' || c == '/')
            .find(|t| !t.is_empty())
            .map(str::to_string);
    }
    None
}

/// Package name declared by the Go file at `path`.
pub fn package_name(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    package_clause(BufReader::new(file))
}
