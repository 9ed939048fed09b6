//! Concurrent callers sharing one repository

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{FakeTransport, MOCK_RESPONSE, config};
use rqcache_core::{CacheKey, HttpTransport, Repository};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const THREADS: usize = 8;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_repository_is_send_and_sync() {
    assert_send_sync::<Repository>();
    assert_send_sync::<Repository<FakeTransport>>();
    assert_send_sync::<HttpTransport>();
}

#[test]
fn test_same_query_reaches_endpoint_once() {
    let tmp = TempDir::new().unwrap();
    let transport = FakeTransport::new(MOCK_RESPONSE);
    transport.set_delay(Duration::from_millis(50));
    let repo = Arc::new(
        Repository::with_transport(config(tmp.path(), true), transport.clone()).unwrap(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let repo = Arc::clone(&repo);
            std::thread::spawn(move || repo.query("SELECT ?x WHERE { ?x ?p ?o }").unwrap())
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(transport.calls(), 1);
    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(results[0].len(), 2);
}

#[test]
fn test_distinct_queries_each_reach_endpoint() {
    let tmp = TempDir::new().unwrap();
    let transport = FakeTransport::new(MOCK_RESPONSE);
    transport.set_delay(Duration::from_millis(10));
    let repo = Repository::with_transport(config(tmp.path(), false), transport.clone()).unwrap();

    std::thread::scope(|scope| {
        for i in 0..THREADS {
            let repo = &repo;
            scope.spawn(move || {
                // Each query twice from the same thread
                let query = format!("SELECT ?x WHERE {{ ?x ?p {i} }}");
                repo.query(&query).unwrap();
                repo.query(&query).unwrap();
            });
        }
    });

    assert_eq!(transport.calls(), THREADS);
    assert_eq!(repo.known_count(), THREADS);
    for i in 0..THREADS {
        let key = CacheKey::for_query(&format!("SELECT ?x WHERE {{ ?x ?p {i} }}"));
        assert!(repo.store().exists(&key));
    }
}
