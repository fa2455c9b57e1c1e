//! Core types for member search.
//!
//! - [`FilterClause`] - Filter predicate trees
//! - [`SearchRequest`], [`SortSpec`] - Requests sent to the backend
//! - [`SearchResultPage`], [`Hit`] - Pages returned by the backend
//! - [`AccumulatedResult`] - Hits collected by a scroll drain
//! - [`MemberQuery`], [`HandleLookup`], [`TraitLookup`], [`SuggestionQuery`],
//!   [`SkillSearchQuery`] - Caller parameters
//!
//! # Example
//!
//! ```
//! use talent_search::types::{FilterClause, SearchRequest, SortOrder, SortSpec};
//!
//! let request = SearchRequest::new("members")
//!     .with_paging(0, 10)
//!     .with_sort(SortSpec::new("handle", SortOrder::Asc))
//!     .with_filter(FilterClause::Conjunction(vec![
//!         FilterClause::terms("handleLower", ["alice", "bob"]),
//!         FilterClause::phrase("status", "ACTIVE"),
//!     ]));
//!
//! let body = request.to_body();
//! assert_eq!(body["size"], 10);
//! ```

mod filter;
mod page;
mod params;
mod request;

pub use filter::FilterClause;
pub use page::{AccumulatedResult, Hit, SearchResultPage, SuggestionOption};
pub use params::{
    BooleanOperator, HandleLookup, MemberQuery, Paging, SkillSearchQuery, SuggestionQuery,
    TraitLookup,
};
pub use request::{SearchRequest, SortOrder, SortSpec, SuggestSpec, keep_alive_param};
