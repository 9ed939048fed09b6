//! Error types for query execution and caching

// Rust 1.92 compiler bug: false positives for thiserror/miette derive macro fields
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Boxed error carried by transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for repository operations
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The endpoint answered with a non-success status
    #[error("SPARQL endpoint {endpoint} returned HTTP {status}")]
    #[diagnostic(
        code(rqcache::transport::status),
        help("The endpoint is reachable but rejected the query; check the query text and endpoint URL")
    )]
    EndpointStatus {
        /// Endpoint URL
        endpoint: String,
        /// HTTP status code
        status: u16,
    },

    /// The endpoint could not be reached or the body could not be read
    #[error("SPARQL endpoint {endpoint} is unreachable")]
    #[diagnostic(
        code(rqcache::transport::unreachable),
        help("Check network connectivity and that the endpoint URL is correct")
    )]
    EndpointUnreachable {
        /// Endpoint URL
        endpoint: String,
        /// The underlying network error
        #[source]
        source: BoxError,
    },

    /// The cache directory could not be listed or created
    #[error("Cache directory {} is not usable", path.display())]
    #[diagnostic(
        code(rqcache::cache::directory),
        help("Ensure the cache directory exists and is readable and writable")
    )]
    CacheDirectory {
        /// Cache directory
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A cache entry could not be written
    #[error("Cache {operation} failed: {}", path.display())]
    #[diagnostic(code(rqcache::cache::write))]
    CacheWrite {
        /// Entry or temporary file path
        path: PathBuf,
        /// Operation that failed (e.g., "create", "write", "sync", "persist")
        operation: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A cache entry that should exist could not be read
    #[error("Cache entry {} could not be read", path.display())]
    #[diagnostic(code(rqcache::cache::read))]
    CacheRead {
        /// Entry path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A stored response is not a valid results document
    #[error("Cache entry {} does not contain valid query results", path.display())]
    #[diagnostic(
        code(rqcache::parse),
        help("The entry is never refetched automatically; delete the file to query the endpoint again")
    )]
    Parse {
        /// Entry path
        path: PathBuf,
        /// The parser error
        #[source]
        source: rqcache_results::Error,
    },

    /// A named query has no definition file
    #[error("Query '{name}' not found at {}", path.display())]
    #[diagnostic(
        code(rqcache::template::not_found),
        help("Named queries live in the queries directory as <name>.rq")
    )]
    QueryNotFound {
        /// Query name
        name: String,
        /// Path that was checked
        path: PathBuf,
    },

    /// A named query definition exists but could not be read
    #[error("Query definition {} could not be read", path.display())]
    #[diagnostic(code(rqcache::template::read))]
    TemplateRead {
        /// Definition path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration or validation error
    #[error("Configuration error: {message}")]
    #[diagnostic(code(rqcache::config))]
    Configuration {
        /// Error message describing the configuration issue
        message: String,
    },
}

impl Error {
    /// Create an endpoint status error
    #[must_use]
    pub fn endpoint_status(endpoint: impl Into<String>, status: u16) -> Self {
        Self::EndpointStatus {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Create an endpoint unreachable error
    #[must_use]
    pub fn endpoint_unreachable(endpoint: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::EndpointUnreachable {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }

    /// Create a cache directory error
    #[must_use]
    pub fn cache_directory(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::CacheDirectory {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a cache write error with the failed operation
    #[must_use]
    pub fn cache_write(
        source: std::io::Error,
        path: impl AsRef<Path>,
        operation: impl Into<String>,
    ) -> Self {
        Self::CacheWrite {
            path: path.as_ref().to_path_buf(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a cache read error
    #[must_use]
    pub fn cache_read(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::CacheRead {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration {
            message: msg.into(),
        }
    }

    /// Whether the error came from the transport layer
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::EndpointStatus { .. } | Self::EndpointUnreachable { .. }
        )
    }
}

/// Result type for repository operations
pub type Result<T> = std::result::Result<T, Error>;
