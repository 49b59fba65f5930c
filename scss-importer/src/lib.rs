// scss-importer - @import/@use resolution for SCSS compilation
// Partials, index files, installed packages and JSON/JS value modules

pub mod config;
pub mod engine;
pub mod error;
pub mod locator;
pub mod manifest;
pub mod paths;
pub mod probe;
pub mod reference;
pub mod source;
pub mod temp;
pub mod values;

pub use config::ImporterConfig;
pub use engine::{ImportResult, ResolvedTarget, ScssImporter, TargetKind};
pub use error::{ImportError, Result};
pub use locator::{NodeModulesLookup, PackageLocator, PackageLookup};
pub use manifest::PackageManifest;
pub use reference::{DependencyReference, Reference};
pub use source::{ModuleValueSource, NodeEvaluator, ValueSource};
pub use temp::TempArea;
pub use values::{format_value, to_declarations};

/// Importer version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
