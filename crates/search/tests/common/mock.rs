//! Scripted in-memory search backend.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use talent_search::backend::SearchBackend;
use talent_search::error::{RetrievalError, SearchResult};
use talent_search::types::{SearchRequest, SearchResultPage};

/// A backend that replays queued responses in order.
///
/// The first queued response answers the initial search; the rest answer
/// scroll continuations. An empty queue answers with an expired cursor.
#[derive(Debug, Default)]
pub struct MockBackend {
    responses: Mutex<VecDeque<SearchResult<SearchResultPage>>>,
    searches: Mutex<Vec<SearchRequest>>,
    scrolls: Mutex<Vec<(String, Duration)>>,
    cleared: Mutex<Vec<String>>,
    fail_clear: bool,
}

impl MockBackend {
    /// Creates a backend answering with the given pages.
    pub fn with_pages(pages: Vec<SearchResultPage>) -> Self {
        Self {
            responses: Mutex::new(pages.into_iter().map(Ok).collect()),
            ..Default::default()
        }
    }

    /// Creates a backend answering with the given results.
    pub fn with_responses(responses: Vec<SearchResult<SearchResultPage>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Default::default()
        }
    }

    /// Makes every clear_scroll call fail.
    pub fn failing_clear(mut self) -> Self {
        self.fail_clear = true;
        self
    }

    /// Requests received by `search`.
    pub fn searches(&self) -> Vec<SearchRequest> {
        self.searches.lock().clone()
    }

    /// Scroll ids and keep-alives received by `scroll`.
    pub fn scrolls(&self) -> Vec<(String, Duration)> {
        self.scrolls.lock().clone()
    }

    /// Scroll ids received by `clear_scroll`.
    pub fn cleared(&self) -> Vec<String> {
        self.cleared.lock().clone()
    }

    /// Total number of backend calls, excluding clear_scroll.
    pub fn call_count(&self) -> usize {
        self.searches.lock().len() + self.scrolls.lock().len()
    }

    fn next_response(&self) -> SearchResult<SearchResultPage> {
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(RetrievalError::ScrollExpired.into()))
    }
}

#[async_trait]
impl SearchBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn search(&self, request: &SearchRequest) -> SearchResult<SearchResultPage> {
        self.searches.lock().push(request.clone());
        self.next_response()
    }

    async fn scroll(&self, scroll_id: &str, keep_alive: Duration) -> SearchResult<SearchResultPage> {
        self.scrolls.lock().push((scroll_id.to_string(), keep_alive));
        self.next_response()
    }

    async fn clear_scroll(&self, scroll_id: &str) -> SearchResult<()> {
        self.cleared.lock().push(scroll_id.to_string());
        if self.fail_clear {
            return Err(RetrievalError::Status {
                operation: "clear_scroll",
                status: 500,
                body: "boom".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
