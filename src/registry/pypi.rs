//! PyPI registry client.

use crate::matcher::SimilarityMatcher;
use crate::registry::RegistryClient;
use crate::types::{DepsiftError, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, trace};

/// PEP 691 JSON form of the simple index.
#[derive(Debug, Deserialize)]
struct SimpleIndex {
    projects: Vec<SimpleProject>,
}

#[derive(Debug, Deserialize)]
struct SimpleProject {
    name: String,
}

/// Client for the PyPI registry.
///
/// Existence checks hit the per-project JSON endpoint. Similarity
/// matching runs locally against the full namespace, which must be
/// fetched once via [`fetch_namespace`](Self::fetch_namespace) before
/// the scan loop starts; a run cannot proceed without it.
pub struct PypiClient {
    client: Client,
    registry_url: String,
    namespace: Vec<String>,
}

impl PypiClient {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        Self::with_registry_url(timeout_secs, "https://pypi.org")
    }

    pub fn with_registry_url(timeout_secs: u64, registry_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("depsift/0.1")
            .build()?;

        Ok(Self {
            client,
            registry_url: registry_url.trim_end_matches('/').to_string(),
            namespace: Vec::new(),
        })
    }

    /// Fetch the full registry namespace from the simple index.
    ///
    /// Any failure here is fatal to the run: without the namespace
    /// there is no candidate pool to match against. Returns the number
    /// of names loaded.
    pub fn fetch_namespace(&mut self) -> Result<usize> {
        let url = format!("{}/simple/", self.registry_url);
        debug!("Fetching registry namespace from {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.pypi.simple.v1+json")
            .send()
            .map_err(|e| DepsiftError::NamespaceError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DepsiftError::NamespaceError(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let index: SimpleIndex = response
            .json()
            .map_err(|e| DepsiftError::NamespaceError(format!("invalid index payload: {}", e)))?;

        self.namespace = index.projects.into_iter().map(|p| p.name).collect();
        debug!("Loaded {} names from the simple index", self.namespace.len());
        Ok(self.namespace.len())
    }

    #[cfg(test)]
    fn with_namespace(mut self, names: Vec<String>) -> Self {
        self.namespace = names;
        self
    }
}

impl RegistryClient for PypiClient {
    fn exists(&self, name: &str) -> Result<bool> {
        let url = format!(
            "{}/pypi/{}/json",
            self.registry_url,
            urlencoding::encode(name)
        );
        trace!("Checking PyPI: {}", url);

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
        // Local match against the materialized namespace; nothing to
        // fail on once the pool is loaded.
        Ok(matcher.find_similar(name, &self.namespace))
    }
}
