//! Core types and errors for the dependency risk scanner.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during a scan.
#[derive(Error, Debug)]
pub enum DepsiftError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Manifest error: {0}")]
    ManifestError(String),

    #[error("Registry error: {0}")]
    RegistryError(String),

    #[error("Registry namespace fetch failed: {0}")]
    NamespaceError(String),
}

pub type Result<T> = std::result::Result<T, DepsiftError>;

/// A dependency name declared in a manifest.
///
/// Only the bare name is retained; version pins and metadata are
/// stripped during manifest parsing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DeclaredDependency {
    pub name: String,
}

impl DeclaredDependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Outcome of classifying one declared dependency.
///
/// Exactly one outcome is produced per dependency; the classifier
/// short-circuits on the first matching category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Classification {
    /// Name is on the operator allowlist.
    Allowed,
    /// Name is a near-miss of one or more allowlist entries.
    LikelyTypo { suggestions: Vec<String> },
    /// Name resolves on the public registry (confusion vector).
    ConfusionRisk,
    /// Name is absent but confusable public names exist.
    TyposquatRisk { suggestions: Vec<String> },
    /// No signal in any category.
    Clean,
}

/// Severity tag attached to console output lines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    Info,
    TypoAlert,
    ConfusionAlert,
    TyposquatWarning,
}
