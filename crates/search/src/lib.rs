//! Talent Search member query layer
//!
//! This crate builds and runs the search queries behind the talent-search
//! application: member profiles, member skills, member statistics, member
//! traits and handle typeahead suggestions. It talks to an OpenSearch or
//! Elasticsearch cluster through the [`SearchBackend`] trait.
//!
//! # Architecture
//!
//! - [`config`] - Explicit backend configuration (nodes, index names, scroll settings)
//! - [`types`] - Filter trees, requests, result pages and caller parameters
//! - [`query_builder`] - Translates caller parameters into search requests
//! - [`scroll`] - Drains scroll cursors into a complete hit set
//! - [`total`] - Normalizes the backend's total hit count
//! - [`backend`] - The search backend trait
//! - [`backends`] - Backend implementations (Elasticsearch)
//! - [`service`] - End-to-end member lookups
//! - [`error`] - Error types for all operations
//!
//! # Features
//!
//! - `elasticsearch` (default) - Elasticsearch / OpenSearch backend
//!
//! # Building a query
//!
//! ```
//! use talent_search::config::{IndexConfig, SearchConfig};
//! use talent_search::query_builder::MemberQueryBuilder;
//! use talent_search::types::{BooleanOperator, SkillSearchQuery};
//!
//! let config = SearchConfig {
//!     indices: IndexConfig {
//!         member_profile: "members".to_string(),
//!         member_skills: "skills".to_string(),
//!         member_stats: "stats".to_string(),
//!         member_traits: "traits".to_string(),
//!     },
//!     ..Default::default()
//! };
//!
//! let builder = MemberQueryBuilder::new(&config).unwrap();
//! let request = builder
//!     .skill_search(&SkillSearchQuery {
//!         skill_ids: vec!["java".to_string(), "rust".to_string()],
//!         operator: BooleanOperator::And,
//!     })
//!     .unwrap();
//!
//! assert!(request.is_scroll());
//! assert_eq!(request.index, "members");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backend;
pub mod backends;
pub mod config;
pub mod error;
pub mod query_builder;
pub mod scroll;
pub mod service;
pub mod total;
pub mod types;

// Re-export commonly used types at crate root
pub use backend::SearchBackend;
pub use config::{IndexConfig, SearchAuth, SearchConfig};
pub use error::{ConfigError, QueryError, RetrievalError, SearchError, SearchResult};
pub use query_builder::MemberQueryBuilder;
pub use scroll::ScrollDrainer;
pub use service::MemberSearchService;
pub use total::extract_total;
pub use types::{AccumulatedResult, FilterClause, Hit, SearchRequest, SearchResultPage};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
