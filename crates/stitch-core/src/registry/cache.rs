//! Registry manifest cache
//!
//! The last-fetched registry index is cached as JSON in the per-user cache
//! directory. Freshness is judged from the cache file's mtime; there is no
//! freshness metadata inside the file itself.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::Context;

use crate::registry::schema::Registry;

/// How long a cached registry index stays fresh
pub const CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// A cached registry index is expired once its age exceeds the TTL;
/// an age of exactly the TTL still counts as fresh.
pub fn is_expired(age: Duration) -> bool {
    age > CACHE_TTL
}

/// On-disk cache for the registry index
#[derive(Debug, Clone)]
pub struct RegistryCache {
    path: PathBuf,
}

impl RegistryCache {
    /// Cache file under the per-user cache directory
    ///
    /// Unix: `$XDG_CACHE_HOME/stitch/registry.json` (fallback
    /// `~/.cache/stitch/registry.json`).
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let base = dirs::cache_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine cache directory"))?;
        Ok(base.join("stitch").join("registry.json"))
    }

    /// Create a cache backed by the given file path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The cache file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached registry if present and valid.
    ///
    /// Returns `None` when the file is missing, unreadable, unparsable, or
    /// (unless `ignore_expiry`) older than the TTL. Read failures are never
    /// propagated; a bad cache behaves like an absent one.
    pub fn load(&self, ignore_expiry: bool) -> Option<Registry> {
        let metadata = std::fs::metadata(&self.path).ok()?;

        if !ignore_expiry {
            let modified = metadata.modified().ok()?;
            // A clock that puts the mtime in the future reads as age zero.
            let age = SystemTime::now()
                .duration_since(modified)
                .unwrap_or(Duration::ZERO);
            if is_expired(age) {
                tracing::debug!("registry cache expired (age {:?})", age);
                return None;
            }
        }

        let bytes = std::fs::read(&self.path).ok()?;
        match serde_json::from_slice::<Registry>(&bytes) {
            Ok(registry) => Some(registry),
            Err(err) => {
                tracing::debug!("discarding unparsable registry cache: {err}");
                None
            }
        }
    }

    /// Persist the registry index to the cache file.
    ///
    /// Callers treat a failure here as non-fatal; the fetch that produced
    /// the registry has already succeeded.
    pub fn save(&self, registry: &Registry) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create cache directory: {}", parent.display())
            })?;
        }

        let bytes = serde_json::to_vec_pretty(registry).context("Failed to serialize registry")?;
        std::fs::write(&self.path, bytes)
            .with_context(|| format!("Failed to write cache: {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary() {
        assert!(!is_expired(CACHE_TTL));
        assert!(is_expired(CACHE_TTL + Duration::from_nanos(1)));
        assert!(!is_expired(Duration::ZERO));
    }
}
