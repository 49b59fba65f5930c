// Import reference parsing (`~pkg/sub/path`, `~@scope/pkg/sub/path`)

/// Marks a reference as "look this up among installed packages"
pub const DEPENDENCY_MARKER: char = '~';

/// Second character of a scoped package reference
pub const SCOPE_MARKER: char = '@';

/// A raw import string as written in the style sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    raw: &'a str,
}

/// Package name and requested sub-path of a dependency-style reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyReference {
    pub package: String,
    /// Empty when the manifest defaults should be used
    pub sub_path: String,
}

impl DependencyReference {
    /// A usable package name: `name`, or `@scope/name` with both parts present
    pub fn has_package_name(&self) -> bool {
        let parts: Vec<&str> = self.package.split('/').collect();
        let expected = if self.package.starts_with(SCOPE_MARKER) { 2 } else { 1 };

        parts.len() == expected && parts.iter().all(|part| !part.is_empty())
    }
}

impl<'a> Reference<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn is_dependency_style(&self) -> bool {
        self.raw.starts_with(DEPENDENCY_MARKER)
    }

    pub fn is_scoped(&self) -> bool {
        self.is_dependency_style() && self.raw.chars().nth(1) == Some(SCOPE_MARKER)
    }

    /// Split into package name and sub-path; `None` for classic references
    ///
    /// - `~bootstrap` → (`bootstrap`, ``)
    /// - `~bootstrap/scss/grid` → (`bootstrap`, `scss/grid`)
    /// - `~@scope/pkg/lib/x` → (`@scope/pkg`, `lib/x`)
    pub fn dependency(&self) -> Option<DependencyReference> {
        let rest = self.raw.strip_prefix(DEPENDENCY_MARKER)?;
        let segments: Vec<&str> = rest.split('/').collect();
        let name_len = if self.is_scoped() { 2 } else { 1 };

        let package = segments
            .iter()
            .take(name_len)
            .copied()
            .collect::<Vec<_>>()
            .join("/");
        let sub_path = segments
            .iter()
            .skip(name_len)
            .copied()
            .collect::<Vec<_>>()
            .join("/");

        Some(DependencyReference { package, sub_path })
    }
}
