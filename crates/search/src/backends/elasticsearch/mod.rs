//! Elasticsearch / OpenSearch backend.
//!
//! Implements [`SearchBackend`](crate::backend::SearchBackend) over the
//! `elasticsearch` client crate. Requests are sent to `/{index}/_search`,
//! continuations to `/_search/scroll`, and cursors are released through
//! the clear-scroll API.
//!
//! # Example
//!
//! ```ignore
//! use talent_search::backends::elasticsearch::ElasticsearchBackend;
//! use talent_search::config::SearchConfig;
//!
//! let backend = ElasticsearchBackend::new(config)?;
//! backend.health_check().await?;
//! ```

mod backend;
mod search_impl;

pub use backend::ElasticsearchBackend;
