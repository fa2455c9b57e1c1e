//! SearchBackend implementation for the Elasticsearch backend.

use std::time::Duration;

use async_trait::async_trait;
use elasticsearch::http::response::Response;
use elasticsearch::{ClearScrollParts, ScrollParts, SearchParts};
use serde_json::{Value, json};

use crate::backend::SearchBackend;
use crate::error::{RetrievalError, SearchResult};
use crate::types::{SearchRequest, SearchResultPage, keep_alive_param};

use super::backend::ElasticsearchBackend;

const SCROLL_CONTEXT_MISSING: &str = "search_context_missing_exception";

pub(super) fn transport_error(operation: &'static str, err: elasticsearch::Error) -> RetrievalError {
    RetrievalError::Transport {
        operation,
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}

/// Reads a search or scroll response into a page.
async fn read_page(operation: &'static str, response: Response) -> SearchResult<SearchResultPage> {
    let status = response.status_code();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        if body.contains(SCROLL_CONTEXT_MISSING) {
            return Err(RetrievalError::ScrollExpired.into());
        }
        return Err(RetrievalError::Status {
            operation,
            status: status.as_u16(),
            body,
        }
        .into());
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| transport_error(operation, e))?;

    Ok(SearchResultPage::from_response(body)?)
}

#[async_trait]
impl SearchBackend for ElasticsearchBackend {
    fn name(&self) -> &'static str {
        "elasticsearch"
    }

    async fn search(&self, request: &SearchRequest) -> SearchResult<SearchResultPage> {
        let index = [request.index.as_str()];
        let keep_alive = request.scroll.map(keep_alive_param);

        let mut call = self
            .client()
            .search(SearchParts::Index(&index))
            .body(request.to_body());
        if let Some(ref keep_alive) = keep_alive {
            call = call.scroll(keep_alive);
        }

        let response = call
            .send()
            .await
            .map_err(|e| transport_error("search", e))?;
        let page = read_page("search", response).await?;

        tracing::debug!(
            index = %request.index,
            total = page.total(),
            hits = page.hits.len(),
            scroll = request.is_scroll(),
            "Search executed"
        );
        Ok(page)
    }

    async fn scroll(
        &self,
        scroll_id: &str,
        keep_alive: Duration,
    ) -> SearchResult<SearchResultPage> {
        let body = json!({
            "scroll": keep_alive_param(keep_alive),
            "scroll_id": scroll_id,
        });

        let response = self
            .client()
            .scroll(ScrollParts::None)
            .body(body)
            .send()
            .await
            .map_err(|e| transport_error("scroll", e))?;
        let page = read_page("scroll", response).await?;

        tracing::trace!(hits = page.hits.len(), "Scroll page fetched");
        Ok(page)
    }

    async fn clear_scroll(&self, scroll_id: &str) -> SearchResult<()> {
        let response = self
            .client()
            .clear_scroll(ClearScrollParts::None)
            .body(json!({ "scroll_id": [scroll_id] }))
            .send()
            .await
            .map_err(|e| transport_error("clear_scroll", e))?;

        let status = response.status_code();
        // 404: the cursor already expired
        if status.is_success() || status.as_u16() == 404 {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(RetrievalError::Status {
            operation: "clear_scroll",
            status: status.as_u16(),
            body,
        }
        .into())
    }
}
