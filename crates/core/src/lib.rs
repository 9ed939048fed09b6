//! Cached SPARQL query execution for rqcache
//!
//! This crate sends read-only queries to a SPARQL endpoint and keeps every
//! response on disk, keyed by the SHA-256 of the exact query text:
//! - [`Transport`] / [`HttpTransport`]: one form-encoded POST per call
//! - [`CacheStore`]: flat directory of `<key>.json` response bodies
//! - [`Repository`]: consults the known-entries index, fetches on a miss,
//!   stores, then parses the stored body into rows
//! - [`QueryTemplates`]: named `<name>.rq` queries with one `{{.}}` argument
//!
//! # Cache Keys
//!
//! Keys are computed from the query bytes only. There is no normalization, so
//! whitespace or variable-name differences produce separate entries. The cache
//! is append-only: entries are never expired, rewritten or deleted.
//!
//! # Example
//!
//! ```no_run
//! use rqcache_core::{HttpTransport, Repository, RepositoryConfig, DEFAULT_USER_AGENT};
//!
//! let config = RepositoryConfig::new("http://localhost:7200/repositories/demo")
//!     .with_cache_dir(".rqcache/cache");
//! std::fs::create_dir_all(&config.cache_dir).ok();
//!
//! let client = HttpTransport::default_client(None, DEFAULT_USER_AGENT)?;
//! let repository = Repository::new(config, client)?;
//!
//! for row in repository.query("SELECT ?s WHERE { ?s ?p ?o } LIMIT 10")? {
//!     if let Some(s) = row.get("s") {
//!         println!("{s}");
//!     }
//! }
//!
//! let rows = repository.execute_named("byId", "42")?;
//! # let _ = rows;
//! # Ok::<(), rqcache_core::Error>(())
//! ```

mod config;
mod error;
mod key;
mod repository;
mod store;
pub mod template;
mod transport;

pub use config::{DEFAULT_CACHE_DIR, DEFAULT_QUERIES_DIR, RepositoryConfig};
pub use error::{BoxError, Error, Result};
pub use key::{CacheKey, ENTRY_EXTENSION};
pub use repository::Repository;
pub use store::CacheStore;
pub use template::QueryTemplates;
pub use transport::{DEFAULT_USER_AGENT, HttpTransport, Transport};

// Re-export the results model so callers need only one dependency
pub use rqcache_results::{JsonResultsParser, Literal, QueryResults, ResultsParser, Solution, Term};
