// Package manifest parser - package.json entry fields

use crate::error::{ImportError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// File name of a package manifest
pub const MANIFEST_FILE: &str = "package.json";

/// Extensions that always count as style sheets
const STYLE_EXTENSIONS: &[&str] = &[".scss", ".css"];

/// Script extensions that rule out a manifest entry
const SCRIPT_EXTENSIONS: &[&str] = &[".js", ".ts", ".es6"];

/// The entry-point fields of a package.json, everything else is ignored
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub main: Option<String>,

    #[serde(default)]
    pub style: Option<String>,

    #[serde(default)]
    pub sass: Option<String>,

    /// Eyeglass integration block; only `sassDir` is read
    #[serde(default)]
    pub eyeglass: Option<Value>,
}

impl PackageManifest {
    /// Read `package.json` from a package directory
    pub fn from_dir<P: AsRef<Path>>(package_dir: P) -> Result<Self> {
        Self::from_file(package_dir.as_ref().join(MANIFEST_FILE))
    }

    /// Parse a manifest file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ImportError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ImportError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Eyeglass `sassDir`, if declared as a string
    pub fn eyeglass_sass_dir(&self) -> Option<&str> {
        self.eyeglass.as_ref()?.get("sassDir")?.as_str()
    }

    /// Entry candidates in priority order: main, style, sass, eyeglass.sassDir,
    /// then `""` for an index file at the package root
    pub fn entry_candidates(&self) -> Vec<String> {
        let mut candidates: Vec<String> = [
            self.main.as_deref(),
            self.style.as_deref(),
            self.sass.as_deref(),
            self.eyeglass_sass_dir(),
        ]
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();

        candidates.push(String::new());
        candidates
    }
}

/// Whether a candidate entry may point at a style sheet.
///
/// Style-sheet extensions always pass; known script extensions are rejected;
/// anything else (no extension, unknown extension) passes.
pub fn is_style_candidate(candidate: &str) -> bool {
    STYLE_EXTENSIONS.iter().any(|ext| candidate.ends_with(ext))
        || !SCRIPT_EXTENSIONS.iter().any(|ext| candidate.ends_with(ext))
}
