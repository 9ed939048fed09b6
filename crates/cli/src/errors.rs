//! CLI error types rendered through miette

// Rust 1.92 compiler bug: false positives for thiserror/miette derive macro fields
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific error types with diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error("Failed to read settings file {}", path.display())]
    #[diagnostic(
        code(rqcache::cli::settings_read),
        help("Check file permissions and ensure the path exists")
    )]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file {}", path.display())]
    #[diagnostic(
        code(rqcache::cli::settings_parse),
        help(
            "Known keys are endpoint, cache_dir, cache, queries_dir, timeout_secs and user_agent"
        )
    )]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("No SPARQL endpoint configured")]
    #[diagnostic(
        code(rqcache::cli::missing_endpoint),
        help("Pass --endpoint, set RQCACHE_ENDPOINT, or add `endpoint = \"...\"` to rqcache.toml")
    )]
    MissingEndpoint,

    #[error("Failed to read query file {}", path.display())]
    #[diagnostic(code(rqcache::cli::query_file))]
    QueryFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output")]
    #[diagnostic(code(rqcache::cli::output))]
    Output(#[source] std::io::Error),

    #[error("Tracing initialization failed: {message}")]
    #[diagnostic(code(rqcache::cli::tracing_error))]
    Tracing { message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Repository(#[from] rqcache_core::Error),
}

impl CliError {
    /// Create a tracing initialization error
    #[must_use]
    pub fn tracing(message: impl Into<String>) -> Self {
        Self::Tracing {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        Self::Output(error)
    }
}
