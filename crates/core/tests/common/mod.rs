//! Shared fixtures for repository tests

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use parking_lot::Mutex;
use rqcache_core::{Error, RepositoryConfig, Result, Term, Transport};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const ENDPOINT: &str = "http://localhost:7200/repositories/test";

pub const MOCK_RESPONSE: &str = r#"{
  "head": { "vars": ["x"] },
  "results": {
    "bindings": [
      { "x": { "type": "uri", "value": "http://example.org/a" } },
      { "x": { "type": "uri", "value": "http://example.org/b" } }
    ]
  }
}"#;

pub const ASK_RESPONSE: &str = r#"{ "head": {}, "boolean": false }"#;

/// Transport that answers from memory and records what it was asked.
///
/// Clones share their state, so a test can keep one handle while the
/// repository owns another.
#[derive(Clone, Default)]
pub struct FakeTransport {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    body: Mutex<Vec<u8>>,
    failure: Mutex<Option<u16>>,
    delay: Mutex<Option<Duration>>,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new(body: &str) -> Self {
        let transport = Self::default();
        transport.set_body(body);
        transport
    }

    pub fn failing(status: u16) -> Self {
        let transport = Self::new(MOCK_RESPONSE);
        transport.set_failure(Some(status));
        transport
    }

    pub fn set_body(&self, body: &str) {
        *self.inner.body.lock() = body.as_bytes().to_vec();
    }

    pub fn set_failure(&self, status: Option<u16>) {
        *self.inner.failure.lock() = status;
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.inner.delay.lock() = Some(delay);
    }

    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.inner.queries.lock().clone()
    }
}

impl Transport for FakeTransport {
    fn endpoint(&self) -> &str {
        ENDPOINT
    }

    fn execute(&self, query: &str) -> Result<Vec<u8>> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.queries.lock().push(query.to_string());

        let delay = *self.inner.delay.lock();
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }

        let failure = *self.inner.failure.lock();
        match failure {
            Some(status) => Err(Error::endpoint_status(ENDPOINT, status)),
            None => Ok(self.inner.body.lock().clone()),
        }
    }
}

pub fn config(cache_dir: &Path, cache_enabled: bool) -> RepositoryConfig {
    RepositoryConfig::new(ENDPOINT)
        .with_cache_dir(cache_dir)
        .with_cache_enabled(cache_enabled)
}

pub fn iri(value: &str) -> Term {
    Term::Iri(value.to_string())
}
