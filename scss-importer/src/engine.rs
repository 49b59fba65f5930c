// Resolution engine: dispatch, classification and the host callback adapter

use crate::config::ImporterConfig;
use crate::error::{ImportError, Result};
use crate::locator::{NodeModulesLookup, PackageLocator, PackageLookup};
use crate::paths::{display_path, importer_dir, normalize_path};
use crate::probe::classic_import_path;
use crate::reference::Reference;
use crate::source::{ModuleValueSource, NodeEvaluator, ValueSource};
use crate::temp::TempArea;
use crate::values::to_declarations;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// What kind of file a reference resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// `.scss` / `.css`, read by the host itself
    StyleSheet,
    /// `.js` / `.json` value module, compiled to declarations
    ManifestData,
    /// Anything else, handed over verbatim
    RawStatic,
}

impl TargetKind {
    pub fn classify(path: &str) -> Self {
        if path.ends_with(".scss") || path.ends_with(".css") {
            TargetKind::StyleSheet
        } else if path.ends_with(".js") || path.ends_with(".json") {
            TargetKind::ManifestData
        } else {
            TargetKind::RawStatic
        }
    }
}

/// A successful resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Resolved file, absolute with `/` separators
    pub file_path: String,
    pub kind: TargetKind,
    /// Declarations (ManifestData) or raw text (RawStatic)
    pub inline_contents: Option<String>,
    /// Temp-area copy of generated declarations (ManifestData only)
    pub persisted_path: Option<String>,
}

/// Answer handed back to the host compiler.
///
/// Serializes to the host protocol: `null`, `{"file"}` or `{"file","contents"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ImportResult {
    /// Let the host apply its own resolution
    Defer,
    StyleSheetFile { file: String },
    InlineFile { file: String, contents: String },
}

impl From<ResolvedTarget> for ImportResult {
    fn from(target: ResolvedTarget) -> Self {
        match (target.kind, target.inline_contents) {
            (TargetKind::StyleSheet, _) | (_, None) => ImportResult::StyleSheetFile {
                file: target.file_path,
            },
            (TargetKind::ManifestData, Some(contents)) => ImportResult::InlineFile {
                file: target.persisted_path.unwrap_or(target.file_path),
                contents,
            },
            (TargetKind::RawStatic, Some(contents)) => ImportResult::InlineFile {
                file: target.file_path,
                contents,
            },
        }
    }
}

/// The importer: resolves one `@import` reference per call, without caching
pub struct ScssImporter<L: PackageLookup = NodeModulesLookup, S: ValueSource = ModuleValueSource> {
    packages: PackageLocator<L>,
    values: S,
    temp: TempArea,
}

impl ScssImporter {
    /// Build the default importer and prepare (wipe) its temp area
    pub fn new(config: &ImporterConfig) -> Result<Self> {
        let temp = TempArea::prepare(config.tmp_dir())?;
        let lookup = NodeModulesLookup::new(config.module_search_dirs());
        let values = ModuleValueSource::new(NodeEvaluator::new(config.node_binary.clone()));

        Ok(Self::with_parts(lookup, values, temp))
    }
}

impl<L: PackageLookup, S: ValueSource> ScssImporter<L, S> {
    pub fn with_parts(lookup: L, values: S, temp: TempArea) -> Self {
        Self {
            packages: PackageLocator::new(lookup),
            values,
            temp,
        }
    }

    pub fn temp_area(&self) -> &TempArea {
        &self.temp
    }

    /// Resolve `reference` imported from the file `prev`.
    ///
    /// `Ok(None)` means nothing matched and the host should resolve it itself.
    pub fn resolve(&self, reference: &str, prev: &str) -> Result<Option<ResolvedTarget>> {
        log::trace!("Trying to resolve {}", reference);

        let found = match self.find(reference, prev)? {
            Some(path) => path,
            None => {
                log::trace!("Not found, deferring {} to the compiler", reference);
                return Ok(None);
            }
        };

        let file_path = display_path(&normalize_path(&found));
        self.load(file_path).map(Some)
    }

    /// `resolve` mapped onto the host protocol
    pub fn import(&self, reference: &str, prev: &str) -> Result<ImportResult> {
        Ok(self
            .resolve(reference, prev)?
            .map(ImportResult::from)
            .unwrap_or(ImportResult::Defer))
    }

    /// Callback-style entry point; `done` is invoked exactly once
    pub fn importer_callback<F>(&self, reference: &str, prev: &str, done: F)
    where
        F: FnOnce(Result<ImportResult>),
    {
        done(self.import(reference, prev))
    }

    fn find(&self, reference: &str, prev: &str) -> Result<Option<PathBuf>> {
        let reference = Reference::new(reference);

        match reference.dependency() {
            Some(dependency) => self.packages.resolve(&dependency),
            None => {
                let current_dir = importer_dir(prev);
                Ok(classic_import_path(&current_dir, reference.raw()))
            }
        }
    }

    fn load(&self, file_path: String) -> Result<ResolvedTarget> {
        let kind = TargetKind::classify(&file_path);

        let target = match kind {
            TargetKind::StyleSheet => {
                log::debug!("Resolved to SCSS file: {}", file_path);
                ResolvedTarget {
                    file_path,
                    kind,
                    inline_contents: None,
                    persisted_path: None,
                }
            }
            TargetKind::ManifestData => {
                log::debug!("Resolved to value module: {}", file_path);
                let tree = self.values.load(Path::new(&file_path))?;
                let contents = to_declarations(&tree);
                let persisted = self.temp.persist(&file_path, &contents)?;

                ResolvedTarget {
                    file_path,
                    kind,
                    inline_contents: Some(contents),
                    persisted_path: Some(display_path(&persisted)),
                }
            }
            TargetKind::RawStatic => {
                log::debug!("Resolved to external file: {}", file_path);
                let bytes = fs::read(&file_path).map_err(|source| ImportError::ReadFile {
                    path: PathBuf::from(&file_path),
                    source,
                })?;

                ResolvedTarget {
                    file_path,
                    kind,
                    inline_contents: Some(String::from_utf8_lossy(&bytes).into_owned()),
                    persisted_path: None,
                }
            }
        };

        Ok(target)
    }
}
