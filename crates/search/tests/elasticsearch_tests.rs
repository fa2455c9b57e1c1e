//! Elasticsearch backend tests.
//!
//! These tests build the client and requests only; nothing connects to a
//! cluster.
//!
//! Run with: `cargo test -p talent-search --features elasticsearch -- elasticsearch`

#![cfg(feature = "elasticsearch")]

mod common;

use serde_json::json;

use common::*;
use talent_search::backend::SearchBackend;
use talent_search::backends::elasticsearch::ElasticsearchBackend;
use talent_search::config::{SearchAuth, SearchConfig};
use talent_search::error::{ConfigError, SearchError};
use talent_search::service::MemberSearchService;

// ============================================================================
// Backend Configuration Tests
// ============================================================================

#[test]
fn test_elasticsearch_config_from_json() {
    let config: SearchConfig = serde_json::from_value(json!({
        "nodes": ["http://es1:9200"],
        "indices": {
            "member_profile": "members",
            "member_skills": "members-skills",
            "member_stats": "members-stats",
            "member_traits": "members-traits"
        },
        "auth": { "Bearer": { "token": "secret" } }
    }))
    .unwrap();

    assert_eq!(config.nodes, vec!["http://es1:9200".to_string()]);
    assert_eq!(config.scroll_keep_alive, "90s");
    assert_eq!(config.scroll_page_size, 10000);
    assert_eq!(config.suggestion_size, 50);
    assert_eq!(config.stats_group_id, 10);
    assert!(matches!(config.auth, Some(SearchAuth::Bearer { .. })));
    assert!(config.validate().is_ok());
}

#[test]
fn test_backend_creation() {
    // This just creates the client; it doesn't connect
    let backend = ElasticsearchBackend::new(test_config()).unwrap();
    assert_eq!(backend.name(), "elasticsearch");
    assert_eq!(backend.config().indices.member_profile, PROFILE_INDEX);
}

#[test]
fn test_backend_requires_nodes() {
    let mut config = test_config();
    config.nodes = vec![" ".to_string()];
    assert!(matches!(
        ElasticsearchBackend::new(config),
        Err(ConfigError::NoNodes)
    ));
}

#[test]
fn test_service_over_elasticsearch_backend() {
    let backend = ElasticsearchBackend::new(test_config()).unwrap();
    let service = MemberSearchService::new(test_config(), backend).unwrap();
    assert_eq!(service.backend().name(), "elasticsearch");
}

#[test]
fn test_service_rejects_config_with_zero_page_size() {
    let backend = ElasticsearchBackend::new(test_config()).unwrap();
    let mut config = test_config();
    config.scroll_page_size = 0;

    assert!(matches!(
        MemberSearchService::new(config, backend),
        Err(SearchError::Config(ConfigError::InvalidLimit {
            name: "scroll_page_size",
            ..
        }))
    ));
}
