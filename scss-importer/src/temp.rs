// Temp area for generated declaration files
//
// Compiled value modules are written here so source maps can point at a real file.

use crate::error::{ImportError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Owned scratch directory, wiped once when prepared
#[derive(Debug, Clone)]
pub struct TempArea {
    dir: PathBuf,
}

impl TempArea {
    /// Remove anything left from a previous run and recreate the directory
    pub fn prepare<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let area = Self {
            dir: dir.as_ref().to_path_buf(),
        };
        area.clear()?;
        Ok(area)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Wipe and recreate the directory
    pub fn clear(&self) -> Result<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir).map_err(|source| self.io_error(source))?;
        }

        fs::create_dir_all(&self.dir).map_err(|source| self.io_error(source))
    }

    /// Deterministic file for a resolved path: `[^A-Za-z0-9]` → `_`, plus `.scss`
    pub fn path_for(&self, resolved: &str) -> PathBuf {
        self.dir.join(format!("{}.scss", sanitize_file_name(resolved)))
    }

    /// Write generated declarations for `resolved`, returning the written file
    pub fn persist(&self, resolved: &str, contents: &str) -> Result<PathBuf> {
        let path = self.path_for(resolved);
        fs::write(&path, contents).map_err(|source| ImportError::TempArea {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    fn io_error(&self, source: std::io::Error) -> ImportError {
        ImportError::TempArea {
            path: self.dir.clone(),
            source,
        }
    }
}

fn sanitize_file_name(path: &str) -> String {
    path.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
