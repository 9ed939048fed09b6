//! Cached query execution against one endpoint
//!
//! A [`Repository`] sends each distinct query text to the endpoint at most once
//! per process, and at most once ever while the persistent cache is enabled.
//! Responses are written to the [`CacheStore`] before they are parsed, and
//! both hits and misses are answered from the stored file.
//!
//! The known-entries index is only filled from disk at construction. Entries
//! written by other processes afterwards stay invisible until the next start.

use crate::config::RepositoryConfig;
use crate::key::CacheKey;
use crate::store::CacheStore;
use crate::template::QueryTemplates;
use crate::transport::{HttpTransport, Transport};
use crate::{Error, Result};
use parking_lot::{Mutex, RwLock};
use reqwest::blocking::Client;
use rqcache_results::{JsonResultsParser, QueryResults, ResultsParser, Solution};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// Query executor with a content-addressed response cache.
///
/// The repository is `Send + Sync` when its transport and parser are. Callers
/// racing on the same uncached query are serialized per cache key, so only one
/// of them reaches the endpoint.
pub struct Repository<T = HttpTransport, P = JsonResultsParser> {
    config: RepositoryConfig,
    transport: T,
    parser: P,
    store: CacheStore,
    templates: QueryTemplates,
    known: RwLock<HashSet<CacheKey>>,
    entry_locks: Mutex<HashMap<CacheKey, Arc<Mutex<()>>>>,
}

impl Repository {
    /// Create a repository that talks HTTP through `client`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CacheDirectory`] if caching is enabled and the cache
    /// directory cannot be listed
    pub fn new(config: RepositoryConfig, client: Client) -> Result<Self> {
        let transport = HttpTransport::new(config.endpoint.clone(), client);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Repository<T> {
    /// Create a repository over a custom transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CacheDirectory`] if caching is enabled and the cache
    /// directory cannot be listed
    pub fn with_transport(config: RepositoryConfig, transport: T) -> Result<Self> {
        Self::with_parts(config, transport, JsonResultsParser)
    }
}

impl<T: Transport, P: ResultsParser> Repository<T, P> {
    /// Create a repository over a custom transport and results parser.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CacheDirectory`] if caching is enabled and the cache
    /// directory cannot be listed
    pub fn with_parts(config: RepositoryConfig, transport: T, parser: P) -> Result<Self> {
        let store = CacheStore::new(&config.cache_dir);
        let known = if config.cache_enabled {
            store.scan()?
        } else {
            HashSet::new()
        };

        info!(
            endpoint = transport.endpoint(),
            cache_enabled = config.cache_enabled,
            cached_entries = known.len(),
            "Repository ready"
        );

        Ok(Self {
            templates: QueryTemplates::new(&config.queries_dir),
            config,
            transport,
            parser,
            store,
            known: RwLock::new(known),
            entry_locks: Mutex::new(HashMap::new()),
        })
    }

    /// Configuration the repository was built with
    #[must_use]
    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// The response store
    #[must_use]
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// The named query definitions
    #[must_use]
    pub fn templates(&self) -> &QueryTemplates {
        &self.templates
    }

    /// The transport
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Whether a response for `key` is known to be stored
    #[must_use]
    pub fn is_known(&self, key: &CacheKey) -> bool {
        self.known.read().contains(key)
    }

    /// Number of known cache entries
    #[must_use]
    pub fn known_count(&self) -> usize {
        self.known.read().len()
    }

    /// Run `query` and return its solution rows in endpoint order.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the endpoint had to be called and failed,
    /// a cache error if the response could not be stored or read back, and
    /// [`Error::Parse`] if the stored response is not a valid results document
    pub fn query(&self, query: &str) -> Result<Vec<Solution>> {
        Ok(self.query_results(query)?.into_solutions())
    }

    /// Run `query` and return the full results document, including ASK results.
    ///
    /// # Errors
    ///
    /// Same as [`Repository::query`]
    pub fn query_results(&self, query: &str) -> Result<QueryResults> {
        let key = CacheKey::for_query(query);
        let body = self.fetch(&key, query)?;
        self.parser.parse(&body).map_err(|source| Error::Parse {
            path: self.store.entry_path(&key),
            source,
        })
    }

    /// Run `query` and return the stored response body without parsing it.
    ///
    /// # Errors
    ///
    /// Returns a transport or cache error as for [`Repository::query`]
    pub fn query_raw(&self, query: &str) -> Result<Vec<u8>> {
        self.fetch(&CacheKey::for_query(query), query)
    }

    /// Run the named query `name` with `argument` substituted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QueryNotFound`] if the definition does not exist, plus
    /// every error of [`Repository::query`]
    pub fn execute_named(&self, name: &str, argument: &str) -> Result<Vec<Solution>> {
        let query = self.render_named(name, argument)?;
        self.query(&query)
    }

    /// Run the named query `name` and return the stored response body unparsed.
    ///
    /// # Errors
    ///
    /// Same as [`Repository::execute_named`], minus parse errors
    pub fn execute_named_raw(&self, name: &str, argument: &str) -> Result<Vec<u8>> {
        let query = self.render_named(name, argument)?;
        self.query_raw(&query)
    }

    fn render_named(&self, name: &str, argument: &str) -> Result<String> {
        info!(query = name, argument, "Issuing named query");
        self.templates.render(name, argument)
    }

    /// Make sure the response for `key` is stored, then read it back from disk.
    fn fetch(&self, key: &CacheKey, query: &str) -> Result<Vec<u8>> {
        self.ensure_stored(key, query)?;
        self.store.read(key)
    }

    fn ensure_stored(&self, key: &CacheKey, query: &str) -> Result<()> {
        if self.is_known(key) {
            debug!(%key, "Cache hit");
            return Ok(());
        }

        let lock = self.entry_lock(key);
        let result = {
            let _guard = lock.lock();
            self.store_if_unknown(key, query)
        };
        self.release_entry_lock(key, &lock);
        result
    }

    /// Fetch and store `key` unless another caller did so while we waited for the lock
    fn store_if_unknown(&self, key: &CacheKey, query: &str) -> Result<()> {
        if self.is_known(key) {
            debug!(%key, "Cache hit after wait");
            return Ok(());
        }

        debug!(%key, endpoint = self.transport.endpoint(), "Cache miss");
        let body = self.transport.execute(query)?;
        self.store.write(key, &body)?;
        self.known.write().insert(key.clone());
        Ok(())
    }

    fn entry_lock(&self, key: &CacheKey) -> Arc<Mutex<()>> {
        Arc::clone(self.entry_locks.lock().entry(key.clone()).or_default())
    }

    /// Drop the per-key lock once no other caller holds or waits on it
    fn release_entry_lock(&self, key: &CacheKey, lock: &Arc<Mutex<()>>) {
        let mut locks = self.entry_locks.lock();
        // One reference lives in the map, the other is ours
        if Arc::strong_count(lock) <= 2 {
            locks.remove(key);
        }
    }
}

impl<T: Transport, P> std::fmt::Debug for Repository<T, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("endpoint", &self.transport.endpoint())
            .field("config", &self.config)
            .field("known_entries", &self.known.read().len())
            .finish_non_exhaustive()
    }
}
