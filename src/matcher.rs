//! Name normalization and string-similarity matching.

use std::cmp::Ordering;
use strsim::normalized_damerau_levenshtein;

/// Default similarity cutoff for typo and typosquat matching.
pub const DEFAULT_CUTOFF: f64 = 0.8;

/// Default maximum number of similar names returned per query.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Canonicalize a package name for comparison.
///
/// Registries treat names case-insensitively, so comparison is done on
/// the case-folded form. Idempotent: `normalize(normalize(x)) ==
/// normalize(x)`.
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
}

/// Finds pool entries confusable with a query name.
pub struct SimilarityMatcher {
    cutoff: f64,
    max_results: usize,
}

impl SimilarityMatcher {
    pub fn new(cutoff: f64, max_results: usize) -> Self {
        Self {
            cutoff,
            max_results,
        }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Return pool entries scoring at least `cutoff` against the query,
    /// best first, capped at `max_results`.
    ///
    /// Scoring is case-folded; returned entries keep their original
    /// casing. Ties keep pool iteration order (the sort is stable), so
    /// results are deterministic for a fixed pool. An empty query or
    /// pool yields an empty result.
    pub fn find_similar(&self, query: &str, pool: &[String]) -> Vec<String> {
        if query.is_empty() || pool.is_empty() {
            return Vec::new();
        }

        let query = normalize(query);

        let mut scored: Vec<(f64, &String)> = pool
            .iter()
            .filter_map(|entry| {
                let score = normalized_damerau_levenshtein(&query, &normalize(entry));
                (score >= self.cutoff).then_some((score, entry))
            })
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        scored
            .into_iter()
            .take(self.max_results)
            .map(|(_, entry)| entry.clone())
            .collect()
    }
}

impl Default for SimilarityMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_CUTOFF, DEFAULT_MAX_RESULTS)
    }
}
