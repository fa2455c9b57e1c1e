//! Error types for the member search layer.
//!
//! Errors are grouped by the stage that produced them: configuration problems
//! are detected before any network call, query errors while translating caller
//! parameters, and retrieval errors while talking to the search backend or
//! draining a scroll cursor.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all search operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Backend configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Caller parameter errors
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Search and scroll call errors
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
}

impl SearchError {
    /// Returns true if the error came from the backend rather than from local validation.
    pub fn is_retrieval(&self) -> bool {
        matches!(self, SearchError::Retrieval(_))
    }
}

/// Errors in the backend configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required index name is missing or blank.
    #[error("missing index name for {key}")]
    MissingIndex { key: &'static str },

    /// No search nodes were configured.
    #[error("no search nodes configured")]
    NoNodes,

    /// A node URL could not be parsed.
    #[error("invalid node url {url}: {message}")]
    InvalidNode { url: String, message: String },

    /// The scroll keep-alive could not be parsed.
    #[error("invalid scroll keep-alive '{value}': {message}")]
    InvalidKeepAlive { value: String, message: String },

    /// A numeric limit is out of range.
    #[error("invalid {name}: {value} (must be between 1 and {max})")]
    InvalidLimit {
        name: &'static str,
        value: u64,
        max: u64,
    },

    /// The HTTP transport could not be built.
    #[error("failed to build search transport: {message}")]
    Transport { message: String },
}

/// Errors translating caller parameters into a search request.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// Page number or page size out of range.
    #[error("invalid paging: page {page}, per page {per_page} (maximum {max_per_page})")]
    InvalidPaging {
        page: u64,
        per_page: u64,
        max_per_page: u64,
    },

    /// A lookup that requires at least one value was given none.
    #[error("lookup requires at least one value for {field}")]
    EmptyFilter { field: &'static str },

    /// A suggestion lookup was given a blank term.
    #[error("suggestion term must not be empty")]
    EmptyTerm,

    /// A boolean operator other than AND / OR.
    #[error("unknown boolean operator: {value}")]
    UnknownOperator { value: String },

    /// A sort order other than asc / desc.
    #[error("unknown sort order: {value}")]
    UnknownSortOrder { value: String },
}

/// Errors returned by the search backend or raised while draining a scroll.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// The request never produced a response.
    #[error("{operation} request failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend answered with a non-success status.
    #[error("{operation} returned status {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// The scroll cursor lifetime elapsed before the next page was requested.
    #[error("scroll cursor expired or was already released")]
    ScrollExpired,

    /// The response body could not be interpreted.
    #[error("malformed search response: {message}")]
    MalformedResponse { message: String },

    /// A continuation page reported a total different from the first page.
    #[error("total changed during scroll: expected {expected}, got {actual}")]
    TotalChanged { expected: u64, actual: u64 },

    /// The cursor ran out of hits before the declared total was collected.
    #[error("scroll exhausted after {collected} of {total} hits")]
    ScrollExhausted { collected: usize, total: u64 },

    /// A page would push the collected count past the declared total.
    #[error("scroll returned {collected} hits, more than the declared total {total}")]
    TotalExceeded { collected: usize, total: u64 },

    /// A page must be continued but carries no scroll id.
    #[error("page has no scroll id but only {collected} of {total} hits were collected")]
    MissingScrollId { collected: usize, total: u64 },
}

/// Result type alias for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

impl From<serde_json::Error> for RetrievalError {
    fn from(err: serde_json::Error) -> Self {
        RetrievalError::MalformedResponse {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Retrieval(err.into())
    }
}
