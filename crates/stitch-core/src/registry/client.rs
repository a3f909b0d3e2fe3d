//! Registry HTTP client
//!
//! Fetches the registry index (through the mtime-based cache) and
//! individual component files from the remote registry.

use std::future::Future;

use anyhow::Context;
use url::Url;

use crate::registry::cache::RegistryCache;
use crate::registry::schema::Registry;

/// Default registry location, points at GitHub raw
pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/marketpush/stitch/main/registry";

const USER_AGENT: &str = concat!("stitch/", env!("CARGO_PKG_VERSION"));

/// Error fetching a single file from the registry
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The request never produced a usable response
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Source of raw component file contents.
///
/// The installer fetches through this seam so it can be exercised without
/// a network.
pub trait FileSource {
    fn fetch_file(
        &self,
        component_name: &str,
        file_name: &str,
    ) -> impl Future<Output = anyhow::Result<String>> + Send;
}

/// Client for a stitch registry
#[derive(Debug, Clone)]
pub struct RegistryClient {
    base_url: String,
    cache: RegistryCache,
}

impl RegistryClient {
    /// Create a client with the default cache location.
    ///
    /// `base_url` overrides the default registry; trailing slashes are
    /// trimmed so URL joining stays predictable.
    pub fn new(base_url: Option<&Url>) -> anyhow::Result<Self> {
        let cache = RegistryCache::new(RegistryCache::default_path()?);
        Ok(Self::with_cache(base_url, cache))
    }

    /// Create a client with an explicit cache (for testing)
    pub fn with_cache(base_url: Option<&Url>, cache: RegistryCache) -> Self {
        let base_url = base_url
            .map(|u| u.as_str().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string());
        Self { base_url, cache }
    }

    /// URL of the registry index document
    pub fn index_url(&self) -> String {
        format!("{}/index.json", self.base_url)
    }

    /// URL of a single component file
    pub fn file_url(&self, component_name: &str, file_name: &str) -> String {
        format!(
            "{}/components/{}/{}",
            self.base_url, component_name, file_name
        )
    }

    /// Fetch the registry index, honoring the cache.
    ///
    /// A fresh cache short-circuits the network entirely. On a failed
    /// fetch (transport, non-2xx, or schema error) the last cached copy is
    /// returned regardless of age; the error only propagates when no cache
    /// exists at all. Cache writes are best-effort.
    pub async fn fetch_registry(&self) -> anyhow::Result<Registry> {
        if let Some(cached) = self.cache.load(false) {
            tracing::debug!("using fresh registry cache");
            return Ok(cached);
        }

        match self.fetch_remote_index().await {
            Ok(registry) => {
                if let Err(err) = self.cache.save(&registry) {
                    tracing::warn!("failed to cache registry: {err:#}");
                }
                Ok(registry)
            }
            Err(err) => match self.cache.load(true) {
                Some(stale) => {
                    tracing::warn!("using cached registry (fetch failed: {err:#})");
                    Ok(stale)
                }
                None => Err(err),
            },
        }
    }

    async fn fetch_remote_index(&self) -> anyhow::Result<Registry> {
        let url = self.index_url();
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        let response = client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch registry from {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to fetch registry: HTTP {} from {}",
                response.status(),
                url
            );
        }

        let body = response
            .text()
            .await
            .context("Failed to read registry response")?;
        Registry::parse(&body)
    }

    /// Fetch a single component file, fresh every call.
    pub async fn fetch_component_file(
        &self,
        component_name: &str,
        file_name: &str,
    ) -> Result<String, FetchError> {
        let url = self.file_url(component_name, file_name);

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response
            .text()
            .await
            .map_err(|source| FetchError::Transport { url, source })
    }
}

impl FileSource for RegistryClient {
    async fn fetch_file(&self, component_name: &str, file_name: &str) -> anyhow::Result<String> {
        Ok(self.fetch_component_file(component_name, file_name).await?)
    }
}
