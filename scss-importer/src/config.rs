// Importer configuration (.scss-importer.json + environment)

use crate::error::{ImportError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the temp area location
pub const TMP_DIR_ENV: &str = "SCSS_IMPORTER_TMP";

/// Environment variable overriding the Node binary used for `.js` value modules
pub const NODE_BINARY_ENV: &str = "SCSS_IMPORTER_NODE";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImporterConfig {
    /// Project root; installed packages are looked up below it
    #[serde(default = "default_project_root")]
    pub project_root: PathBuf,

    /// Directory for generated declaration files (default: node_modules/.tmp/scss-importer)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmp_dir: Option<PathBuf>,

    /// Package directories relative to the project root, searched in order
    #[serde(default = "default_module_dirs")]
    pub module_dirs: Vec<String>,

    /// Node binary for evaluating `.js` value modules (default: `node` on PATH)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_binary: Option<PathBuf>,
}

fn default_project_root() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn default_module_dirs() -> Vec<String> {
    vec!["node_modules".to_string()]
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self::for_root(default_project_root())
    }
}

impl ImporterConfig {
    /// Defaults anchored at the given project root
    pub fn for_root<P: AsRef<Path>>(project_root: P) -> Self {
        Self {
            project_root: project_root.as_ref().to_path_buf(),
            tmp_dir: None,
            module_dirs: default_module_dirs(),
            node_binary: None,
        }
    }

    /// Parse a JSON config file. Relative paths in it are taken from the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ImportError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut config: ImporterConfig =
            serde_json::from_str(&content).map_err(|e| ImportError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if let Some(base) = path.parent() {
            if config.project_root.is_relative() {
                config.project_root = base.join(&config.project_root);
            }
            if let Some(tmp) = config.tmp_dir.as_mut() {
                if tmp.is_relative() {
                    *tmp = base.join(&*tmp);
                }
            }
        }

        Ok(config)
    }

    /// Apply `SCSS_IMPORTER_TMP` / `SCSS_IMPORTER_NODE` if set
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(tmp) = std::env::var_os(TMP_DIR_ENV) {
            self.tmp_dir = Some(PathBuf::from(tmp));
        }
        if let Some(node) = std::env::var_os(NODE_BINARY_ENV) {
            self.node_binary = Some(PathBuf::from(node));
        }
        self
    }

    /// Effective temp area location
    pub fn tmp_dir(&self) -> PathBuf {
        self.tmp_dir.clone().unwrap_or_else(|| {
            self.project_root
                .join("node_modules")
                .join(".tmp")
                .join("scss-importer")
        })
    }

    /// Copy with the derived temp area filled in
    pub fn effective(&self) -> Self {
        Self {
            tmp_dir: Some(self.tmp_dir()),
            ..self.clone()
        }
    }

    /// Absolute package search directories
    pub fn module_search_dirs(&self) -> Vec<PathBuf> {
        self.module_dirs
            .iter()
            .map(|dir| self.project_root.join(dir))
            .collect()
    }
}
