//! Repository configuration

use std::path::PathBuf;

/// Default cache directory, relative to the project root.
pub const DEFAULT_CACHE_DIR: &str = ".rqcache/cache";

/// Default directory holding named query definitions.
pub const DEFAULT_QUERIES_DIR: &str = "queries";

/// Construction-time settings of a [`Repository`](crate::Repository).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// SPARQL endpoint URL
    pub endpoint: String,
    /// Directory holding cache entries
    pub cache_dir: PathBuf,
    /// Load the known entries from `cache_dir` at construction and serve hits from them
    pub cache_enabled: bool,
    /// Directory holding `<name>.rq` query definitions
    pub queries_dir: PathBuf,
}

impl RepositoryConfig {
    /// Configuration for `endpoint` with default directories and caching enabled.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            cache_enabled: true,
            queries_dir: PathBuf::from(DEFAULT_QUERIES_DIR),
        }
    }

    /// Set the cache directory
    #[must_use]
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    /// Enable or disable the persistent cache
    #[must_use]
    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Set the named query directory
    #[must_use]
    pub fn with_queries_dir(mut self, queries_dir: impl Into<PathBuf>) -> Self {
        self.queries_dir = queries_dir.into();
        self
    }
}
