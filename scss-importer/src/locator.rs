// Dependency-style reference resolution (installed packages)

use crate::error::Result;
use crate::manifest::{is_style_candidate, PackageManifest};
use crate::probe::classic_import_path;
use crate::reference::DependencyReference;
use std::path::{Path, PathBuf};

/// Host lookup of installed packages by name
pub trait PackageLookup {
    /// Root directory of the installed package, `None` when not installed
    fn locate(&self, package: &str) -> Option<PathBuf>;
}

/// Looks packages up in local `node_modules`-style directories
#[derive(Debug, Clone)]
pub struct NodeModulesLookup {
    search_dirs: Vec<PathBuf>,
}

impl NodeModulesLookup {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// `<project_root>/node_modules` only
    pub fn for_project<P: AsRef<Path>>(project_root: P) -> Self {
        Self::new(vec![project_root.as_ref().join("node_modules")])
    }
}

impl PackageLookup for NodeModulesLookup {
    fn locate(&self, package: &str) -> Option<PathBuf> {
        self.search_dirs
            .iter()
            .map(|dir| dir.join(package))
            .find(|candidate| candidate.is_dir())
    }
}

/// Resolves `~package[/sub/path]` references to files inside installed packages
pub struct PackageLocator<L: PackageLookup> {
    lookup: L,
}

impl<L: PackageLookup> PackageLocator<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Find the file a dependency reference points at.
    ///
    /// Returns `Ok(None)` when the package is not installed or no candidate
    /// exists; a missing or malformed `package.json` is an error.
    pub fn resolve(&self, reference: &DependencyReference) -> Result<Option<PathBuf>> {
        if !reference.has_package_name() {
            log::trace!("No package name in '{}'", reference.package);
            return Ok(None);
        }

        let package_dir = match self.lookup.locate(&reference.package) {
            Some(dir) => dir,
            None => {
                log::trace!("Package {} is not installed", reference.package);
                return Ok(None);
            }
        };

        let candidates = if reference.sub_path.is_empty() {
            PackageManifest::from_dir(&package_dir)?.entry_candidates()
        } else {
            vec![reference.sub_path.clone()]
        };

        Ok(first_existing_candidate(&package_dir, &candidates))
    }
}

/// Classic-import each style candidate in order; the first hit wins
fn first_existing_candidate(package_dir: &Path, candidates: &[String]) -> Option<PathBuf> {
    candidates
        .iter()
        .filter(|candidate| is_style_candidate(candidate))
        .find_map(|candidate| {
            log::trace!(
                "Trying package entry '{}' in {}",
                candidate,
                package_dir.display()
            );
            classic_import_path(package_dir, candidate)
        })
}
