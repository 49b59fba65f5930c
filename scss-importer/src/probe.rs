// Filesystem probing for SCSS partials, extensions and index files

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// File name prefixes, tried in order ("" before the partial `_`)
pub const SCSS_PREFIXES: &[&str] = &["", "_"];

/// Extensions tried for every prefix
pub const SCSS_EXTENSIONS: &[&str] = &[".scss", ".css", ""];

/// Stems recognized as directory index files
pub const SCSS_INDEX_NAMES: &[&str] = &["index"];

/// Every path `find_existing` would test, in probing order
///
/// A `name` containing `/` is split so that only its last segment receives
/// the prefix and extension: `"lib/x"` in `dir` probes `dir/lib/x.scss`,
/// `dir/lib/x.css`, `dir/lib/x`, `dir/lib/_x.scss`, ...
///
/// Leading `/` never escapes `dir`: `"/lib/x"` probes the same files as `"lib/x"`.
pub fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    let (dir, stem) = match name.rsplit_once('/') {
        Some((sub_dir, stem)) => (append(dir, sub_dir), stem),
        None => (dir.to_path_buf(), name),
    };

    SCSS_PREFIXES
        .iter()
        .flat_map(|prefix| {
            SCSS_EXTENSIONS
                .iter()
                .map(move |ext| format!("{}{}{}", prefix, stem, ext))
        })
        .map(|file_name| dir.join(file_name))
        .collect()
}

/// Join `rel` below `dir` even when it starts with `/`
fn append(dir: &Path, rel: &str) -> PathBuf {
    dir.join(rel.trim_start_matches('/'))
}

/// First existing candidate for `name` in `dir`
pub fn find_existing(dir: &Path, name: &str) -> Option<PathBuf> {
    candidates(dir, name)
        .into_iter()
        .find(|candidate| raw_file_exists(candidate))
}

/// Check that `path` is a regular file.
///
/// Missing entries are silent; any other I/O error is logged and treated as missing.
pub fn raw_file_exists(path: &Path) -> bool {
    is_file_from(path, fs::metadata(path))
}

fn is_file_from(path: &Path, metadata: io::Result<fs::Metadata>) -> bool {
    match metadata {
        Ok(metadata) => metadata.is_file(),
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                log::warn!("Cannot stat {}: {}", path.display(), e);
            }
            false
        }
    }
}

/// Classic (relative) import: the literal file first, then `name/index`
pub fn classic_import_path(dir: &Path, name: &str) -> Option<PathBuf> {
    if let Some(found) = find_existing(dir, name) {
        return Some(found);
    }

    let alt_dir = append(dir, name);
    SCSS_INDEX_NAMES.iter().find_map(|index| {
        log::trace!(
            "Looking for {} -> {} in {}",
            name,
            index,
            alt_dir.display()
        );
        find_existing(&alt_dir, index)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, rel: &str) -> PathBuf {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn test_candidate_order() {
        let names: Vec<String> = candidates(Path::new("/d"), "foo")
            .iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect();

        assert_eq!(
            names,
            vec![
                "/d/foo.scss",
                "/d/foo.css",
                "/d/foo",
                "/d/_foo.scss",
                "/d/_foo.css",
                "/d/_foo",
            ]
        );
    }

    #[test]
    fn test_candidates_split_sub_directory() {
        let first = candidates(Path::new("/d"), "lib/x");
        assert_eq!(first.len(), 6);
        assert_eq!(first[0], PathBuf::from("/d/lib/x.scss"));
        assert_eq!(first[3], PathBuf::from("/d/lib/_x.scss"));
    }

    #[test]
    fn test_plain_file_beats_partial() {
        let dir = tempfile::tempdir().unwrap();
        let plain = touch(&dir, "foo.scss");
        touch(&dir, "_foo.scss");

        assert_eq!(find_existing(dir.path(), "foo"), Some(plain));
    }

    #[test]
    fn test_partial_found_when_alone() {
        let dir = tempfile::tempdir().unwrap();
        let partial = touch(&dir, "_foo.scss");

        assert_eq!(find_existing(dir.path(), "foo"), Some(partial));
    }

    #[test]
    fn test_plain_css_beats_partial_scss() {
        let dir = tempfile::tempdir().unwrap();
        let css = touch(&dir, "foo.css");
        touch(&dir, "_foo.scss");

        assert_eq!(find_existing(dir.path(), "foo"), Some(css));
    }

    #[test]
    fn test_directories_are_not_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("foo")).unwrap();

        assert_eq!(find_existing(dir.path(), "foo"), None);
        assert!(!raw_file_exists(&dir.path().join("foo")));
    }

    #[test]
    fn test_missing_directory_is_not_an_error() {
        assert_eq!(find_existing(Path::new("/no/such/dir/anywhere"), "foo"), None);
    }

    #[test]
    fn test_stat_errors_count_as_missing() {
        let path = Path::new("/locked/foo.scss");
        let denied = io::Error::new(ErrorKind::PermissionDenied, "permission denied");
        let missing = io::Error::new(ErrorKind::NotFound, "no such file");

        assert!(!is_file_from(path, Err(denied)));
        assert!(!is_file_from(path, Err(missing)));
    }

    #[test]
    fn test_leading_slash_stays_inside_dir() {
        assert_eq!(
            candidates(Path::new("/d"), "/lib/x")[0],
            PathBuf::from("/d/lib/x.scss")
        );

        let dir = tempfile::tempdir().unwrap();
        let index = touch(&dir, "theme/_index.scss");
        let nested = touch(&dir, "lib/_x.scss");
        let partial = touch(&dir, "_btn.scss");

        assert_eq!(classic_import_path(dir.path(), "/theme"), Some(index));
        assert_eq!(classic_import_path(dir.path(), "/lib/x"), Some(nested));
        assert_eq!(classic_import_path(dir.path(), "/btn"), Some(partial));
    }

    #[test]
    fn test_classic_prefers_literal_file_over_index() {
        let dir = tempfile::tempdir().unwrap();
        let literal = touch(&dir, "theme.scss");
        touch(&dir, "theme/index.scss");

        assert_eq!(classic_import_path(dir.path(), "theme"), Some(literal));
    }

    #[test]
    fn test_classic_falls_back_to_index() {
        let dir = tempfile::tempdir().unwrap();
        let index = touch(&dir, "theme/_index.scss");

        assert_eq!(classic_import_path(dir.path(), "theme"), Some(index));
    }

    #[test]
    fn test_classic_empty_name_finds_root_index() {
        let dir = tempfile::tempdir().unwrap();
        let index = touch(&dir, "index.scss");

        assert_eq!(classic_import_path(dir.path(), ""), Some(index));
    }
}
