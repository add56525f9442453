//! npm registry client.

use crate::matcher::SimilarityMatcher;
use crate::registry::RegistryClient;
use crate::types::{DepsiftError, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, trace};

/// npm registry API response for the suggestion search.
#[derive(Debug, Deserialize)]
struct NpmSearchResponse {
    objects: Vec<NpmSearchObject>,
}

#[derive(Debug, Deserialize)]
struct NpmSearchObject {
    package: NpmSearchPackage,
}

#[derive(Debug, Deserialize)]
struct NpmSearchPackage {
    name: String,
}

/// Client for the npm registry.
///
/// The npm registry exposes no practical way to enumerate its full
/// namespace, so similarity candidates come from the registry's own
/// `/-/v1/search` endpoint instead of a static pool.
pub struct NpmClient {
    client: Client,
    registry_url: String,
}

impl NpmClient {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        Self::with_registry_url(timeout_secs, "https://registry.npmjs.org")
    }

    pub fn with_registry_url(timeout_secs: u64, registry_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("depsift/0.1")
            .build()?;

        Ok(Self {
            client,
            registry_url: registry_url.trim_end_matches('/').to_string(),
        })
    }

    fn suggest(&self, name: &str, size: usize) -> Result<Vec<String>> {
        let url = format!(
            "{}/-/v1/search?text={}&size={}",
            self.registry_url,
            urlencoding::encode(name),
            size
        );
        trace!("Querying npm suggestions: {}", url);

        let response = self.client.get(&url).send()?;
        let status = response.status();

        if !status.is_success() {
            return Err(DepsiftError::RegistryError(format!(
                "HTTP {} from suggestion search for {}",
                status, name
            )));
        }

        let search: NpmSearchResponse = response.json()?;
        Ok(search.objects.into_iter().map(|o| o.package.name).collect())
    }
}

impl RegistryClient for NpmClient {
    fn exists(&self, name: &str) -> Result<bool> {
        // Scoped names (@scope/pkg) are checked as opaque, urlencoded
        // package paths like any other name.
        let url = format!("{}/{}", self.registry_url, urlencoding::encode(name));
        trace!("Checking npm: {}", url);

        let response = self.client.get(&url).send()?;
        let status = response.status();

        if status.is_success() {
            debug!("Package exists: {}", name);
            Ok(true)
        } else if status.as_u16() == 404 {
            Ok(false)
        } else {
            Err(DepsiftError::RegistryError(format!(
                "HTTP {} checking {}",
                status, name
            )))
        }
    }

    fn similar_names(&self, name: &str, matcher: &SimilarityMatcher) -> Result<Vec<String>> {
        let candidates = self.suggest(name, matcher.max_results())?;

        // The search endpoint ranks by text relevance and happily
        // returns loose matches; re-score locally so both ecosystems
        // honor the same closeness bar.
        Ok(matcher.find_similar(name, &candidates))
    }
}
