// Loading value trees from `.json` and `.js` value modules

use crate::error::{ImportError, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Node snippet printing the module's exports as JSON
const NODE_EXPORT_SCRIPT: &str =
    "process.stdout.write(JSON.stringify(require(require('path').resolve(process.argv[1]))))";

/// Produces the exported value tree of a value module.
///
/// Implementations must not cache: every call reflects the file as it is now.
pub trait ValueSource {
    fn load(&self, path: &Path) -> Result<Value>;
}

/// Reads `.json` directly and evaluates `.js` with Node
#[derive(Debug, Clone, Default)]
pub struct ModuleValueSource {
    node: NodeEvaluator,
}

impl ModuleValueSource {
    pub fn new(node: NodeEvaluator) -> Self {
        Self { node }
    }
}

impl ValueSource for ModuleValueSource {
    fn load(&self, path: &Path) -> Result<Value> {
        if path.extension().is_some_and(|ext| ext == "json") {
            read_json(path)
        } else {
            self.node.evaluate(path)
        }
    }
}

/// Parse a JSON file
pub fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|source| ImportError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ImportError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Evaluates CommonJS value modules in a fresh Node process
#[derive(Debug, Clone, Default)]
pub struct NodeEvaluator {
    /// Explicit binary; `node` is looked up on PATH when unset
    binary: Option<PathBuf>,
}

impl NodeEvaluator {
    pub fn new(binary: Option<PathBuf>) -> Self {
        Self { binary }
    }

    fn binary(&self, module: &Path) -> Result<PathBuf> {
        if let Some(binary) = &self.binary {
            return Ok(binary.clone());
        }

        which::which("node").map_err(|e| ImportError::Evaluate {
            path: module.to_path_buf(),
            message: format!("node not found on PATH: {}", e),
        })
    }

    pub fn evaluate(&self, module: &Path) -> Result<Value> {
        let binary = self.binary(module)?;
        log::trace!("Evaluating {} with {}", module.display(), binary.display());

        let output = Command::new(&binary)
            .arg("-e")
            .arg(NODE_EXPORT_SCRIPT)
            .arg(module)
            .output()
            .map_err(|e| ImportError::Evaluate {
                path: module.to_path_buf(),
                message: format!("failed to run {}: {}", binary.display(), e),
            })?;

        if !output.status.success() {
            return Err(ImportError::Evaluate {
                path: module.to_path_buf(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // `JSON.stringify(undefined)` prints nothing
        if output.stdout.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&output.stdout).map_err(|source| ImportError::ManifestParse {
            path: module.to_path_buf(),
            source,
        })
    }
}
