//! HTTP transport to a SPARQL endpoint
//!
//! The transport sends one form-encoded POST per call and knows nothing about
//! caching. Retries are left to the caller.

use crate::{Error, Result};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use rqcache_results::SPARQL_RESULTS_JSON;
use std::time::Duration;
use tracing::debug;

/// Default `User-Agent` sent by [`HttpTransport::default_client`].
pub const DEFAULT_USER_AGENT: &str = concat!("rqcache/", env!("CARGO_PKG_VERSION"));

/// Sends query text to an endpoint and returns the raw response body.
pub trait Transport: Send + Sync {
    /// Endpoint address, used in logs and errors
    fn endpoint(&self) -> &str;

    /// Issue exactly one request for `query`
    ///
    /// # Errors
    ///
    /// Returns [`Error::EndpointStatus`] when the endpoint answers with a
    /// non-success status and [`Error::EndpointUnreachable`] when no complete
    /// response could be obtained
    fn execute(&self, query: &str) -> Result<Vec<u8>>;
}

/// [`Transport`] over a blocking `reqwest` client.
///
/// The client is shared: cloning a `reqwest` client is cheap and reuses its
/// connection pool, so callers can hand in a pre-configured one.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: String,
    client: Client,
}

impl HttpTransport {
    /// Create a transport for `endpoint` using the given client.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    /// Build a client with an optional overall request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the TLS backend cannot be initialized
    pub fn default_client(timeout: Option<Duration>, user_agent: &str) -> Result<Client> {
        let mut builder = Client::builder().user_agent(user_agent.to_string());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {e}")))
    }

    /// The underlying client
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl Transport for HttpTransport {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn execute(&self, query: &str) -> Result<Vec<u8>> {
        debug!(endpoint = %self.endpoint, bytes = query.len(), "Sending query to endpoint");

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .form(&[("query", query)])
            .send()
            .map_err(|e| Error::endpoint_unreachable(&self.endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::endpoint_status(&self.endpoint, status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| Error::endpoint_unreachable(&self.endpoint, e))?;

        debug!(endpoint = %self.endpoint, %status, bytes = body.len(), "Received endpoint response");
        Ok(body.to_vec())
    }
}
