//! Declared-dependency extraction from manifest files.
//!
//! Only bare package names are retained. Versions, extras, and
//! environment markers are manifest noise as far as risk
//! classification is concerned.

use crate::config::PackageManager;
use crate::types::{DeclaredDependency, DepsiftError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// npm-style manifest. Values are version ranges and are ignored; the
/// keys are the declared names.
#[derive(Debug, Deserialize)]
struct NpmManifest {
    #[serde(default)]
    dependencies: serde_json::Map<String, serde_json::Value>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: serde_json::Map<String, serde_json::Value>,
}

/// Parses manifests into declared-dependency lists, preserving
/// manifest order.
pub struct ManifestLoader {
    requirement_name: Regex,
}

impl ManifestLoader {
    pub fn new() -> Self {
        Self {
            // Leading name portion of a requirement line, before any
            // extras, version specifier, or environment marker.
            requirement_name: Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?").unwrap(),
        }
    }

    /// Load declared dependencies from a manifest file.
    ///
    /// An unreadable or unparseable manifest is fatal to the run.
    pub fn load(&self, path: &Path, package_manager: PackageManager) -> Result<Vec<DeclaredDependency>> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DepsiftError::ManifestError(format!("cannot read {}: {}", path.display(), e))
        })?;

        let dependencies = match package_manager {
            PackageManager::Pip => self.parse_requirements(&content),
            PackageManager::Npm => parse_package_json(&content)?,
        };

        debug!(
            "Loaded {} declared dependencies from {}",
            dependencies.len(),
            path.display()
        );
        Ok(dependencies)
    }

    /// Parse a requirements.txt-style file: one requirement per line,
    /// blank lines, comments, and pip option lines skipped.
    fn parse_requirements(&self, content: &str) -> Vec<DeclaredDependency> {
        let mut dependencies = Vec::new();

        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('-') {
                continue;
            }

            if let Some(name) = self.requirement_name.find(trimmed) {
                dependencies.push(DeclaredDependency::new(name.as_str()));
            }
        }

        dependencies
    }
}

impl Default for ManifestLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a package.json manifest; `dependencies` first, then
/// `devDependencies`, each in manifest order.
fn parse_package_json(content: &str) -> Result<Vec<DeclaredDependency>> {
    let manifest: NpmManifest = serde_json::from_str(content)
        .map_err(|e| DepsiftError::ManifestError(format!("invalid package.json: {}", e)))?;

    Ok(manifest
        .dependencies
        .keys()
        .chain(manifest.dev_dependencies.keys())
        .map(DeclaredDependency::new)
        .collect())
}
