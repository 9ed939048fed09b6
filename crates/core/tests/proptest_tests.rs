//! Property-based tests for cache keys and query templates

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{FakeTransport, MOCK_RESPONSE, config};
use proptest::prelude::*;
use rqcache_core::template::{PLACEHOLDER, substitute};
use rqcache_core::{CacheKey, Repository};
use tempfile::TempDir;

proptest! {
    #[test]
    fn test_key_is_deterministic(query in ".{0,200}") {
        let a = CacheKey::for_query(&query);
        let b = CacheKey::for_query(&query);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.as_hex().len(), 64);
        prop_assert!(a.as_hex().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        prop_assert_eq!(CacheKey::from_file_name(&a.file_name()), Some(a));
    }

    #[test]
    fn test_distinct_queries_get_distinct_keys(a in ".{0,80}", b in ".{0,80}") {
        prop_assume!(a != b);
        prop_assert_ne!(CacheKey::for_query(&a), CacheKey::for_query(&b));
    }

    #[test]
    fn test_trailing_whitespace_changes_key(query in "[A-Za-z?{} ]{1,60}") {
        prop_assert_ne!(
            CacheKey::for_query(&query),
            CacheKey::for_query(&format!("{query} "))
        );
    }

    #[test]
    fn test_substitute_without_placeholder_is_identity(
        template in "[^{}]{0,80}",
        argument in ".{0,20}",
    ) {
        prop_assert_eq!(substitute(&template, &argument), template);
    }

    #[test]
    fn test_substitute_replaces_first_placeholder_only(
        head in "[^{}]{0,30}",
        middle in "[^{}]{0,30}",
        tail in "[^{}]{0,30}",
        argument in "[^{}]{0,20}",
    ) {
        let template = format!("{head}{PLACEHOLDER}{middle}{PLACEHOLDER}{tail}");
        prop_assert_eq!(
            substitute(&template, &argument),
            format!("{head}{argument}{middle}{PLACEHOLDER}{tail}")
        );
    }

    #[test]
    fn test_repeated_queries_call_endpoint_once(
        queries in prop::collection::vec("[a-c]{1,3}", 1..20),
        cache_enabled in any::<bool>(),
    ) {
        let tmp = TempDir::new().unwrap();
        let transport = FakeTransport::new(MOCK_RESPONSE);
        let repo = Repository::with_transport(config(tmp.path(), cache_enabled), transport.clone())
            .unwrap();

        for query in &queries {
            repo.query(query).unwrap();
        }

        let distinct: std::collections::HashSet<_> = queries.iter().collect();
        prop_assert_eq!(transport.calls(), distinct.len());
        prop_assert_eq!(repo.known_count(), distinct.len());
    }
}
