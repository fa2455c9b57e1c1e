//! The search backend collaborator.
//!
//! Wire format, authentication and transport are the backend's concern; the
//! rest of the crate only sees requests going in and pages coming out.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::SearchResult;
use crate::types::{SearchRequest, SearchResultPage};

/// A search cluster that can run queries and continue scroll cursors.
///
/// # Example
///
/// ```ignore
/// use talent_search::backend::SearchBackend;
/// use talent_search::error::SearchResult;
/// use talent_search::types::SearchRequest;
///
/// async fn first_page<B: SearchBackend>(backend: &B) -> SearchResult<u64> {
///     let page = backend.search(&SearchRequest::new("members").with_size(10)).await?;
///     Ok(page.total())
/// }
/// ```
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Returns a short name for logging.
    fn name(&self) -> &'static str;

    /// Runs a search request and returns its first page.
    async fn search(&self, request: &SearchRequest) -> SearchResult<SearchResultPage>;

    /// Fetches the page following `scroll_id`, extending the cursor by `keep_alive`.
    ///
    /// The passed scroll id must not be reused afterwards.
    async fn scroll(&self, scroll_id: &str, keep_alive: Duration)
    -> SearchResult<SearchResultPage>;

    /// Releases a scroll cursor before its lifetime elapses.
    async fn clear_scroll(&self, _scroll_id: &str) -> SearchResult<()> {
        Ok(())
    }
}
