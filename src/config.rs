//! Configuration handling for the scanner.

use clap::{Parser, ValueEnum};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Dependency confusion and typosquat scanner for declared manifests.
#[derive(Parser, Debug, Clone)]
#[command(name = "depsift")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Path to the dependency manifest (requirements.txt or package.json)
    pub manifest: PathBuf,

    /// Package ecosystem the manifest belongs to
    #[arg(short = 'p', long, value_enum)]
    pub package_manager: PackageManager,

    /// Path to the allowlist file (one trusted name per line)
    #[arg(short = 'a', long, env = "DEPSIFT_ALLOWLIST", default_value = "allowlist.txt")]
    pub allowlist: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Request timeout in seconds for registry calls
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Similarity cutoff for typo and typosquat matching (0.0-1.0)
    #[arg(long, default_value = "0.8")]
    pub cutoff: f64,

    /// Maximum number of similar names to report per dependency
    #[arg(long, default_value = "5")]
    pub max_suggestions: usize,
}

/// Ecosystem selector, fixed once at startup.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    /// requirements.txt against the PyPI registry
    Pip,
    /// package.json against the npm registry
    Npm,
}

/// Operator-curated set of trusted names, normalized at load time.
///
/// Membership checks use the set; similarity matching uses the sorted
/// pool so tie ordering is stable across runs.
#[derive(Debug, Clone, Default)]
pub struct Allowlist {
    names: HashSet<String>,
    pool: Vec<String>,
}

impl Allowlist {
    /// Load an allowlist from a text file.
    ///
    /// Blank lines and `#` comments are skipped. A missing file is not
    /// an error: the scan continues with an empty allowlist.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => {
                warn!(
                    "No allowlist file found at {:?}. Continuing without an allowlist.",
                    path
                );
                return Self::default();
            }
        };

        Self::from_lines(content.lines())
    }

    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut names = HashSet::new();
        for line in lines {
            let trimmed = line.trim();
            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                names.insert(crate::matcher::normalize(trimmed));
            }
        }

        let mut pool: Vec<String> = names.iter().cloned().collect();
        pool.sort();

        Self { names, pool }
    }

    /// Membership check against the normalized name set.
    pub fn contains(&self, normalized_name: &str) -> bool {
        self.names.contains(normalized_name)
    }

    /// Entries as a similarity pool, sorted for stable iteration.
    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}
