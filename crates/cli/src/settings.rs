//! `rqcache.toml` settings and their command-line overrides
//!
//! ```toml
//! endpoint = "http://localhost:7200/repositories/demo"
//! cache_dir = ".rqcache/cache"
//! cache = true
//! queries_dir = "queries"
//! timeout_secs = 60
//! ```

use crate::errors::CliError;
use rqcache_core::{DEFAULT_CACHE_DIR, DEFAULT_QUERIES_DIR, DEFAULT_USER_AGENT, RepositoryConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "rqcache.toml";

/// Contents of a settings file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub endpoint: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub cache: Option<bool>,
    pub queries_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub queries_dir: Option<PathBuf>,
    pub no_cache: bool,
}

/// Settings after applying overrides and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub endpoint: Option<String>,
    pub cache_dir: PathBuf,
    pub cache_enabled: bool,
    pub queries_dir: PathBuf,
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Settings {
    /// Parse a settings file
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| CliError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given, otherwise `rqcache.toml` in `dir` when present.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, CliError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(SETTINGS_FILE);
        if candidate.is_file() {
            tracing::debug!(path = ?candidate, "Loading settings file");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply command-line overrides, then defaults
    #[must_use]
    pub fn resolve(self, overrides: Overrides) -> Resolved {
        Resolved {
            endpoint: overrides.endpoint.or(self.endpoint),
            cache_dir: overrides
                .cache_dir
                .or(self.cache_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR)),
            cache_enabled: !overrides.no_cache && self.cache.unwrap_or(true),
            queries_dir: overrides
                .queries_dir
                .or(self.queries_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_QUERIES_DIR)),
            timeout: self.timeout_secs.map(Duration::from_secs),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }
}

impl Resolved {
    /// Repository configuration; fails when no endpoint was configured anywhere
    pub fn repository_config(&self) -> Result<RepositoryConfig, CliError> {
        let endpoint = self.endpoint.clone().ok_or(CliError::MissingEndpoint)?;
        Ok(RepositoryConfig::new(endpoint)
            .with_cache_dir(&self.cache_dir)
            .with_cache_enabled(self.cache_enabled)
            .with_queries_dir(&self.queries_dir))
    }
}
