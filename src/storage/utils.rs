use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::constants::STATUS_SUFFIX;

/// Replaces characters that cannot appear in a file name.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "account".to_string()
    } else {
        cleaned
    }
}

/// Output file for an account: `pattern` with `{name}` substituted, inside `dir`.
pub fn output_path(dir: &str, pattern: &str, name: &str) -> PathBuf {
    Path::new(dir).join(pattern.replace("{name}", &sanitize_file_name(name)))
}

/// Sidecar holding the run status, next to the output file.
pub fn status_path(output: &Path) -> PathBuf {
    let mut path: OsString = output.as_os_str().to_owned();
    path.push(STATUS_SUFFIX);
    PathBuf::from(path)
}
