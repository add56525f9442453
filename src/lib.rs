//! depsift - dependency confusion and typosquat scanner.
//!
//! This library scans a project's declared dependencies against the
//! public registries by:
//! - Extracting bare package names from a requirements.txt or
//!   package.json manifest
//! - Checking each name against an operator-curated allowlist, with
//!   near-miss typo detection
//! - Checking whether the name resolves on the public registry
//!   (dependency confusion vector)
//! - Matching absent names against published names to surface
//!   typosquat exposure
//!
//! # Example
//!
//! ```no_run
//! use depsift::{Allowlist, DeclaredDependency, NpmClient, RiskClassifier, SimilarityMatcher};
//!
//! fn main() -> depsift::Result<()> {
//!     let allowlist = Allowlist::from_lines(["left-pad"]);
//!     let registry = NpmClient::new(30)?;
//!     let classifier =
//!         RiskClassifier::new(&allowlist, SimilarityMatcher::default(), &registry);
//!     let outcome = classifier.classify(&DeclaredDependency::new("internal-auth-lib"));
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

pub mod classifier;
pub mod config;
pub mod manifest;
pub mod matcher;
pub mod notify;
pub mod registry;
pub mod report;
pub mod types;

pub use classifier::RiskClassifier;
pub use config::{Allowlist, Config, PackageManager};
pub use manifest::ManifestLoader;
pub use matcher::{normalize, SimilarityMatcher};
pub use notify::ConsoleOutput;
pub use registry::{NpmClient, PypiClient, RegistryClient};
pub use report::{RunSummary, TypoAlert};
pub use types::{Classification, DeclaredDependency, DepsiftError, Result, Severity};
