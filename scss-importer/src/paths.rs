// Path normalization helpers

use std::fs;
use std::path::{Path, PathBuf};

/// Collapse runs of `/` and `\` into a single `/`
pub fn to_slash(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut last_was_sep = false;

    for c in path.chars() {
        if c == '/' || c == '\\' {
            if !last_was_sep {
                out.push('/');
            }
            last_was_sep = true;
        } else {
            out.push(c);
            last_was_sep = false;
        }
    }

    out
}

/// Canonicalize a path, falling back to textual separator cleanup when it cannot be resolved
pub fn normalize_path(path: &Path) -> PathBuf {
    match fs::canonicalize(path) {
        Ok(real) => PathBuf::from(to_slash(&real.to_string_lossy())),
        Err(_) => PathBuf::from(to_slash(&path.to_string_lossy())),
    }
}

/// Directory containing the importing file.
///
/// `prev` is split on `/` the way the host reports it, so a bare name such as
/// `stdin` yields the empty (current) directory.
pub fn importer_dir(prev: &str) -> PathBuf {
    let slashed = to_slash(prev);
    let dir = match slashed.rfind('/') {
        Some(0) => "/",
        Some(pos) => &slashed[..pos],
        None => "",
    };
    normalize_path(Path::new(dir))
}

/// Forward-slash string form of a path
pub fn display_path(path: &Path) -> String {
    to_slash(&path.to_string_lossy())
}
