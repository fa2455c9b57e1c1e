//! Scroll cursor draining.
//!
//! [`ScrollDrainer`] turns a first page plus a cursor into the complete hit
//! set of a query. Pages are fetched strictly in cursor order; the total of
//! the first page is authoritative for the whole drain.

use std::future::Future;
use std::time::Duration;

use crate::backend::SearchBackend;
use crate::error::{RetrievalError, SearchResult};
use crate::types::{AccumulatedResult, SearchResultPage};

/// Drains scroll cursors with a fixed keep-alive.
#[derive(Debug, Clone, Copy)]
pub struct ScrollDrainer {
    keep_alive: Duration,
}

impl ScrollDrainer {
    /// Creates a drainer that extends each cursor by `keep_alive`.
    pub fn new(keep_alive: Duration) -> Self {
        Self { keep_alive }
    }

    /// Returns the keep-alive passed on every continuation.
    pub fn keep_alive(&self) -> Duration {
        self.keep_alive
    }

    /// Collects every hit, fetching continuation pages with `next_page`.
    ///
    /// Stops as soon as the collected count equals the first page's total.
    /// Any error from `next_page` ends the drain and is returned as is.
    ///
    /// A continuation page fails the drain when it reports a different total
    /// ([`RetrievalError::TotalChanged`]), carries no hits while the count is
    /// short ([`RetrievalError::ScrollExhausted`]), or overshoots the total
    /// ([`RetrievalError::TotalExceeded`]).
    pub async fn drain<F, Fut>(
        initial: SearchResultPage,
        mut next_page: F,
    ) -> SearchResult<AccumulatedResult>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = SearchResult<SearchResultPage>>,
    {
        let mut cursor = initial.scroll_id.clone();
        let mut acc = AccumulatedResult::from_first_page(initial)?;

        while !acc.is_complete() {
            let Some(scroll_id) = cursor.take() else {
                return Err(RetrievalError::MissingScrollId {
                    collected: acc.len(),
                    total: acc.total(),
                }
                .into());
            };

            let page = next_page(scroll_id).await?;

            let reported = page.total();
            if reported != acc.total() {
                return Err(RetrievalError::TotalChanged {
                    expected: acc.total(),
                    actual: reported,
                }
                .into());
            }
            if page.hits.is_empty() {
                return Err(RetrievalError::ScrollExhausted {
                    collected: acc.len(),
                    total: acc.total(),
                }
                .into());
            }

            cursor = page.scroll_id.clone();
            acc.push_page(page)?;

            tracing::trace!(
                collected = acc.len(),
                total = acc.total(),
                pages = acc.pages(),
                "Scroll page collected"
            );
        }

        tracing::debug!(
            total = acc.total(),
            pages = acc.pages(),
            "Scroll drain complete"
        );
        Ok(acc)
    }

    /// Drains a cursor opened on `backend`, continuing it with [`SearchBackend::scroll`].
    pub async fn drain_backend<B>(
        &self,
        backend: &B,
        initial: SearchResultPage,
    ) -> SearchResult<AccumulatedResult>
    where
        B: SearchBackend + ?Sized,
    {
        let keep_alive = self.keep_alive();
        Self::drain(initial, |scroll_id| async move {
            backend.scroll(&scroll_id, keep_alive).await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use serde_json::json;

    use super::*;
    use crate::error::SearchError;
    use crate::types::Hit;

    fn hits(range: std::ops::Range<usize>) -> Vec<Hit> {
        range
            .map(|i| Hit::new(i.to_string(), json!({ "n": i })))
            .collect()
    }

    fn ids(acc: &AccumulatedResult) -> Vec<String> {
        acc.hits().iter().filter_map(|h| h.id.clone()).collect()
    }

    /// Splits `total` hits into pages of `page_size`, each with cursor `c{n}`.
    fn paged(total: usize, page_size: usize) -> VecDeque<SearchResultPage> {
        let mut pages = VecDeque::new();
        let mut start = 0;
        let mut n = 1;
        loop {
            let end = (start + page_size).min(total);
            pages.push_back(SearchResultPage::new(
                hits(start..end),
                total as u64,
                Some(format!("c{}", n)),
            ));
            start = end;
            n += 1;
            if start >= total {
                break;
            }
        }
        pages
    }

    #[tokio::test]
    async fn test_drain_three_pages() {
        let mut pages = paged(25, 10);
        let initial = pages.pop_front().unwrap();
        let mut calls = Vec::new();

        let acc = ScrollDrainer::drain(initial, |scroll_id| {
            calls.push(scroll_id);
            let page = pages.pop_front();
            async move { Ok(page.expect("unexpected extra fetch")) }
        })
        .await
        .unwrap();

        assert_eq!(calls, vec!["c1", "c2"]);
        assert_eq!(acc.len(), 25);
        assert_eq!(acc.total(), 25);
        assert_eq!(acc.pages(), 3);
        assert_eq!(acc.scroll_id(), Some("c3"));
        let expected: Vec<String> = (0..25).map(|i| i.to_string()).collect();
        assert_eq!(ids(&acc), expected);
    }

    #[tokio::test]
    async fn test_drain_empty_total_fetches_nothing() {
        let initial = SearchResultPage::new(vec![], 0, Some("c1".into()));
        let mut calls = 0;

        let acc = ScrollDrainer::drain(initial, |_| {
            calls += 1;
            async { Ok(SearchResultPage::default()) }
        })
        .await
        .unwrap();

        assert_eq!(calls, 0);
        assert!(acc.is_empty());
        assert_eq!(acc.pages(), 1);
    }

    #[tokio::test]
    async fn test_drain_fetch_count_matches_ceiling() {
        for page_size in 1..=7usize {
            for total in 0..=20usize {
                let mut pages = paged(total, page_size);
                let initial = pages.pop_front().unwrap();
                let mut fetches = 1;

                let acc = ScrollDrainer::drain(initial, |_| {
                    fetches += 1;
                    let page = pages.pop_front();
                    async move { Ok(page.expect("fetched past the last page")) }
                })
                .await
                .unwrap();

                let expected_fetches = total.div_ceil(page_size).max(1);
                assert_eq!(fetches, expected_fetches, "total={total} size={page_size}");
                assert_eq!(acc.len(), total);
                let expected: Vec<String> = (0..total).map(|i| i.to_string()).collect();
                assert_eq!(ids(&acc), expected);
            }
        }
    }

    #[tokio::test]
    async fn test_drain_propagates_second_fetch_error() {
        let mut pages = paged(30, 10);
        let initial = pages.pop_front().unwrap();
        let mut calls = 0;

        let result = ScrollDrainer::drain(initial, |_| {
            calls += 1;
            let outcome = if calls == 2 {
                Err(SearchError::Retrieval(RetrievalError::ScrollExpired))
            } else {
                Ok(pages.pop_front().unwrap())
            };
            async move { outcome }
        })
        .await;

        assert_eq!(calls, 2);
        assert!(matches!(
            result,
            Err(SearchError::Retrieval(RetrievalError::ScrollExpired))
        ));
    }

    #[tokio::test]
    async fn test_drain_rejects_total_drift() {
        let initial = SearchResultPage::new(hits(0..10), 20, Some("c1".into()));
        let result = ScrollDrainer::drain(initial, |_| async {
            Ok(SearchResultPage::new(hits(10..20), 21, Some("c2".into())))
        })
        .await;

        assert!(matches!(
            result,
            Err(SearchError::Retrieval(RetrievalError::TotalChanged {
                expected: 20,
                actual: 21
            }))
        ));
    }

    #[tokio::test]
    async fn test_drain_rejects_early_exhaustion() {
        let initial = SearchResultPage::new(hits(0..10), 20, Some("c1".into()));
        let result = ScrollDrainer::drain(initial, |_| async {
            Ok(SearchResultPage::new(vec![], 20, Some("c2".into())))
        })
        .await;

        assert!(matches!(
            result,
            Err(SearchError::Retrieval(RetrievalError::ScrollExhausted {
                collected: 10,
                total: 20
            }))
        ));
    }

    #[tokio::test]
    async fn test_drain_rejects_missing_scroll_id() {
        let initial = SearchResultPage::new(hits(0..10), 20, None);
        let result = ScrollDrainer::drain(initial, |_| async {
            Ok(SearchResultPage::default())
        })
        .await;

        assert!(matches!(
            result,
            Err(SearchError::Retrieval(RetrievalError::MissingScrollId { .. }))
        ));
    }

    #[tokio::test]
    async fn test_drain_structured_total() {
        let mut initial = SearchResultPage::new(hits(0..2), 0, Some("c1".into()));
        initial.raw_total = Some(json!({ "value": 3, "relation": "eq" }));

        let acc = ScrollDrainer::drain(initial, |_| async {
            let mut page = SearchResultPage::new(hits(2..3), 0, Some("c2".into()));
            page.raw_total = Some(json!({ "value": 3, "relation": "eq" }));
            Ok(page)
        })
        .await
        .unwrap();

        assert_eq!(acc.len(), 3);
    }
}
