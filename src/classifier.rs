//! Risk classification for declared dependencies.

use crate::config::Allowlist;
use crate::matcher::{normalize, SimilarityMatcher};
use crate::registry::RegistryClient;
use crate::types::{Classification, DeclaredDependency};
use tracing::{debug, warn};

/// The decision core: classifies one declared dependency into exactly
/// one outcome.
///
/// Categories are checked in strict priority order, short-circuiting
/// on the first match: allowlisted, then near-miss of the allowlist,
/// then published on the registry, then confusable with published
/// names. Typo detection runs before any registry call: a near-miss of
/// a trusted name is almost certainly a typo, not a real third-party
/// package, so no lookup is spent on it.
pub struct RiskClassifier<'a> {
    allowlist: &'a Allowlist,
    matcher: SimilarityMatcher,
    registry: &'a dyn RegistryClient,
}

impl<'a> RiskClassifier<'a> {
    pub fn new(
        allowlist: &'a Allowlist,
        matcher: SimilarityMatcher,
        registry: &'a dyn RegistryClient,
    ) -> Self {
        Self {
            allowlist,
            matcher,
            registry,
        }
    }

    pub fn classify(&self, dependency: &DeclaredDependency) -> Classification {
        let name = &dependency.name;
        let normalized = normalize(name);

        if self.allowlist.contains(&normalized) {
            debug!("'{}' is allowlisted", name);
            return Classification::Allowed;
        }

        let typo_suggestions = self.matcher.find_similar(name, self.allowlist.pool());
        if !typo_suggestions.is_empty() {
            debug!("'{}' is a near-miss of the allowlist", name);
            return Classification::LikelyTypo {
                suggestions: typo_suggestions,
            };
        }

        match self.registry.exists(name) {
            Ok(true) => {
                debug!("'{}' is published on the registry", name);
                return Classification::ConfusionRisk;
            }
            Ok(false) => {}
            Err(e) => {
                // Degrade to "assume not present" and keep scanning.
                warn!("Existence check failed for '{}': {}", name, e);
            }
        }

        let candidates = match self.registry.similar_names(name, &self.matcher) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Suggestion lookup failed for '{}': {}", name, e);
                Vec::new()
            }
        };

        // An allowlisted name is never reported, not even as a
        // suggestion for some other declared name.
        let suggestions: Vec<String> = candidates
            .into_iter()
            .filter(|candidate| !self.allowlist.contains(&normalize(candidate)))
            .collect();

        if !suggestions.is_empty() {
            debug!("'{}' is confusable with published names", name);
            return Classification::TyposquatRisk { suggestions };
        }

        Classification::Clean
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DepsiftError, Result};
    use std::cell::Cell;

    /// Scripted registry with call counters.
    struct MockRegistry {
        exists_response: Option<bool>,
        pool: Vec<String>,
        fail_suggestions: bool,
        exists_calls: Cell<usize>,
        similar_calls: Cell<usize>,
    }

    impl MockRegistry {
        fn new(exists: bool, pool: &[&str]) -> Self {
            Self {
                exists_response: Some(exists),
                pool: pool.iter().map(|s| s.to_string()).collect(),
                fail_suggestions: false,
                exists_calls: Cell::new(0),
                similar_calls: Cell::new(0),
            }
        }

        fn failing_exists(pool: &[&str]) -> Self {
            let mut mock = Self::new(false, pool);
            mock.exists_response = None;
            mock
        }
    }

    impl RegistryClient for MockRegistry {
        fn exists(&self, _name: &str) -> Result<bool> {
            self.exists_calls.set(self.exists_calls.get() + 1);
            match self.exists_response {
                Some(exists) => Ok(exists),
                None => Err(DepsiftError::RegistryError("transport down".to_string())),
            }
        }

        fn similar_names(&self, name: &str, matcher: &SimilarityMatcher) -> Result<Vec<String>> {
            self.similar_calls.set(self.similar_calls.get() + 1);
            if self.fail_suggestions {
                return Err(DepsiftError::RegistryError("search down".to_string()));
            }
            Ok(matcher.find_similar(name, &self.pool))
        }
    }

    fn classify(allowlist: &Allowlist, registry: &MockRegistry, name: &str) -> Classification {
        let classifier = RiskClassifier::new(allowlist, SimilarityMatcher::default(), registry);
        classifier.classify(&DeclaredDependency::new(name))
    }

    #[test]
    fn allowlisted_any_case_is_allowed() {
        let allowlist = Allowlist::from_lines(["requests"]);
        let registry = MockRegistry::new(true, &[]);

        for declared in ["requests", "Requests", "REQUESTS"] {
            assert_eq!(classify(&allowlist, &registry, declared), Classification::Allowed);
        }
        assert_eq!(registry.exists_calls.get(), 0);
    }

    #[test]
    fn near_miss_of_allowlist_is_typo_without_registry_calls() {
        // Scenario: declared "reqeusts", allowlist ["requests"].
        let allowlist = Allowlist::from_lines(["requests"]);
        let registry = MockRegistry::new(true, &[]);

        let outcome = classify(&allowlist, &registry, "reqeusts");
        assert_eq!(
            outcome,
            Classification::LikelyTypo {
                suggestions: vec!["requests".to_string()]
            }
        );
        assert_eq!(registry.exists_calls.get(), 0);
        assert_eq!(registry.similar_calls.get(), 0);
    }

    #[test]
    fn existing_name_is_confusion_risk() {
        // Scenario: internal name that resolves publicly.
        let allowlist = Allowlist::default();
        let registry = MockRegistry::new(true, &[]);

        let outcome = classify(&allowlist, &registry, "internal-tool");
        assert_eq!(outcome, Classification::ConfusionRisk);
    }

    #[test]
    fn existing_name_skips_similarity_search() {
        let allowlist = Allowlist::default();
        let registry = MockRegistry::new(true, &["internal-tool2"]);

        classify(&allowlist, &registry, "internal-tool");
        assert_eq!(registry.exists_calls.get(), 1);
        assert_eq!(registry.similar_calls.get(), 0);
    }

    #[test]
    fn absent_name_with_confusable_neighbors_is_typosquat_risk() {
        // Scenario: "my-intern-lib" absent, "my-internal-lib" published.
        let allowlist = Allowlist::default();
        let registry = MockRegistry::new(false, &["my-internal-lib", "django"]);

        let outcome = classify(&allowlist, &registry, "my-intern-lib");
        assert_eq!(
            outcome,
            Classification::TyposquatRisk {
                suggestions: vec!["my-internal-lib".to_string()]
            }
        );
        assert_eq!(registry.exists_calls.get(), 1);
        assert_eq!(registry.similar_calls.get(), 1);
    }

    #[test]
    fn absent_name_with_no_neighbors_is_clean() {
        // Scenario: "safe-pkg" absent, nothing similar published.
        let allowlist = Allowlist::default();
        let registry = MockRegistry::new(false, &["django", "lodash"]);

        let outcome = classify(&allowlist, &registry, "safe-pkg");
        assert_eq!(outcome, Classification::Clean);
    }

    #[test]
    fn allowlisted_suggestions_are_filtered() {
        let allowlist = Allowlist::from_lines(["serde-json"]);
        // Both pool entries are confusable with the query, one is trusted.
        let registry = MockRegistry::new(false, &["serde-json", "serde-jsom"]);

        let outcome = classify(&allowlist, &registry, "serde-json2");
        assert_eq!(
            outcome,
            Classification::TyposquatRisk {
                suggestions: vec!["serde-jsom".to_string()]
            }
        );
    }

    #[test]
    fn failed_existence_check_degrades_to_absent() {
        let allowlist = Allowlist::default();
        let registry = MockRegistry::failing_exists(&["my-internal-lib"]);

        // The run continues into the similarity step instead of aborting.
        let outcome = classify(&allowlist, &registry, "my-intern-lib");
        assert_eq!(
            outcome,
            Classification::TyposquatRisk {
                suggestions: vec!["my-internal-lib".to_string()]
            }
        );
    }

    #[test]
    fn failed_suggestion_lookup_degrades_to_clean() {
        let allowlist = Allowlist::default();
        let mut registry = MockRegistry::new(false, &["my-internal-lib"]);
        registry.fail_suggestions = true;

        let outcome = classify(&allowlist, &registry, "my-intern-lib");
        assert_eq!(outcome, Classification::Clean);
    }

    #[test]
    fn name_that_is_both_typo_and_published_reports_as_typo() {
        // Deliberate precedence: allowlist typo detection wins over the
        // registry existence signal.
        let allowlist = Allowlist::from_lines(["requests"]);
        let registry = MockRegistry::new(true, &[]);

        let outcome = classify(&allowlist, &registry, "reqeusts");
        assert!(matches!(outcome, Classification::LikelyTypo { .. }));
        assert_eq!(registry.exists_calls.get(), 0);
    }
}
