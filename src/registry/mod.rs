//! Registry clients for the supported ecosystems.
//!
//! Both clients answer "is this name published"; the pip-style client
//! additionally materializes the full registry namespace for
//! similarity matching, while the npm-style client leans on the
//! registry's own suggestion endpoint.

mod npm;
mod pypi;

pub use npm::NpmClient;
pub use pypi::PypiClient;

use crate::matcher::SimilarityMatcher;
use crate::types::Result;

/// Registry access as the classifier sees it.
///
/// Implementations are selected once at startup from the
/// `--package-manager` flag. Errors carry the degrade-vs-fatal policy
/// in the signature: the classifier maps a per-name `Err` to "assume
/// absent" / "no suggestions" and keeps going.
pub trait RegistryClient {
    /// True iff the registry reports `name` as a published package.
    fn exists(&self, name: &str) -> Result<bool>;

    /// Published names confusable with `name`, best first.
    ///
    /// The pip-style client matches against its pre-fetched namespace;
    /// the npm-style client queries the registry's suggestion endpoint
    /// and applies the same similarity cutoff locally.
    fn similar_names(&self, name: &str, matcher: &SimilarityMatcher) -> Result<Vec<String>>;
}
