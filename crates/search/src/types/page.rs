//! Result pages and the scroll accumulator.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RetrievalError;
use crate::total::extract_total;

/// One result document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Index the document lives in.
    #[serde(rename = "_index", default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    /// Document id.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Relevance score (null when sorting on a field).
    #[serde(rename = "_score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Document body, possibly projected.
    #[serde(rename = "_source", default)]
    pub source: Value,
    /// Sort values of the hit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<Value>>,
}

impl Hit {
    /// Creates a hit with only an id and a source document.
    pub fn new(id: impl Into<String>, source: Value) -> Self {
        Self {
            index: None,
            id: Some(id.into()),
            score: None,
            source,
            sort: None,
        }
    }
}

/// A completion candidate returned by a suggestion lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionOption {
    /// Completed text.
    pub text: String,
    /// Id of the document that supplied the completion.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Candidate weight.
    #[serde(rename = "_score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Source document of the candidate.
    #[serde(rename = "_source", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
}

#[derive(Deserialize)]
struct RawResponse {
    #[serde(rename = "_scroll_id", default)]
    scroll_id: Option<String>,
    #[serde(default)]
    hits: RawHits,
    #[serde(default)]
    suggest: Option<Value>,
}

#[derive(Default, Deserialize)]
struct RawHits {
    #[serde(default)]
    total: Option<Value>,
    #[serde(default)]
    hits: Vec<Hit>,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResultPage {
    /// Hits on this page, in backend order.
    pub hits: Vec<Hit>,
    /// The total as reported by the backend: a bare integer or `{value, relation}`.
    pub raw_total: Option<Value>,
    /// Cursor for the next page, present when the request opened a scroll.
    pub scroll_id: Option<String>,
    /// Raw suggester output.
    pub suggest: Option<Value>,
}

impl SearchResultPage {
    /// Creates a page with a bare integer total.
    pub fn new(hits: Vec<Hit>, total: u64, scroll_id: Option<String>) -> Self {
        Self {
            hits,
            raw_total: Some(Value::from(total)),
            scroll_id,
            suggest: None,
        }
    }

    /// Parses a search or scroll response body.
    pub fn from_response(body: Value) -> Result<Self, RetrievalError> {
        if !body.is_object() {
            return Err(RetrievalError::MalformedResponse {
                message: format!("expected a JSON object, got {}", body),
            });
        }
        let raw: RawResponse = serde_json::from_value(body)?;
        Ok(Self {
            hits: raw.hits.hits,
            raw_total: raw.hits.total,
            scroll_id: raw.scroll_id,
            suggest: raw.suggest,
        })
    }

    /// Returns the normalized total match count.
    pub fn total(&self) -> u64 {
        extract_total(self.raw_total.as_ref())
    }

    /// Returns the candidates reported by the named suggester.
    ///
    /// A response without a suggest section yields no candidates.
    pub fn suggestion_options(&self, name: &str) -> Result<Vec<SuggestionOption>, RetrievalError> {
        let Some(entries) = self.suggest.as_ref().and_then(|s| s.get(name)) else {
            return Ok(Vec::new());
        };
        let entries = entries
            .as_array()
            .ok_or_else(|| RetrievalError::MalformedResponse {
                message: format!("suggester {} is not an array", name),
            })?;

        let mut options = Vec::new();
        for entry in entries {
            if let Some(raw) = entry.get("options") {
                let parsed: Vec<SuggestionOption> = serde_json::from_value(raw.clone())?;
                options.extend(parsed);
            }
        }
        Ok(options)
    }
}

/// All hits collected by a scroll drain.
///
/// Hits are kept in page-arrival order. The collected count never exceeds
/// the total taken from the first page.
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulatedResult {
    hits: Vec<Hit>,
    total: u64,
    pages: usize,
    scroll_id: Option<String>,
}

impl AccumulatedResult {
    /// Starts an accumulator from the first page, whose total is authoritative.
    ///
    /// A zero total (including an unreadable one) yields an empty result even
    /// if the page carries hits.
    pub fn from_first_page(page: SearchResultPage) -> Result<Self, RetrievalError> {
        let total = page.total();
        if total == 0 {
            return Ok(Self {
                hits: Vec::new(),
                total,
                pages: 1,
                scroll_id: page.scroll_id,
            });
        }

        let mut acc = Self {
            hits: Vec::new(),
            total,
            pages: 0,
            scroll_id: None,
        };
        acc.push_page(page)?;
        Ok(acc)
    }

    /// Appends a page's hits, failing if the total would be exceeded.
    pub fn push_page(&mut self, page: SearchResultPage) -> Result<(), RetrievalError> {
        let collected = self.hits.len() + page.hits.len();
        if collected as u64 > self.total {
            return Err(RetrievalError::TotalExceeded {
                collected,
                total: self.total,
            });
        }
        self.hits.extend(page.hits);
        self.pages += 1;
        if page.scroll_id.is_some() {
            self.scroll_id = page.scroll_id;
        }
        Ok(())
    }

    /// Returns true once every declared hit has been collected.
    pub fn is_complete(&self) -> bool {
        self.hits.len() as u64 == self.total
    }

    /// Returns the collected hits.
    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    /// Iterates over the source documents of the collected hits.
    pub fn sources(&self) -> impl Iterator<Item = &Value> {
        self.hits.iter().map(|h| &h.source)
    }

    /// Returns the authoritative total.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns the number of collected hits.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Returns true if no hits were collected.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Returns the number of pages consumed, including the first.
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Returns the most recent scroll id, if the request opened a scroll.
    pub fn scroll_id(&self) -> Option<&str> {
        self.scroll_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_response() {
        let body = json!({
            "_scroll_id": "c1",
            "took": 3,
            "hits": {
                "total": { "value": 2, "relation": "eq" },
                "hits": [
                    { "_index": "stats", "_id": "1", "_score": null, "_source": { "handleLower": "alice" }, "sort": ["alice"] },
                    { "_index": "stats", "_id": "2", "_source": { "handleLower": "bob" } }
                ]
            }
        });

        let page = SearchResultPage::from_response(body).unwrap();
        assert_eq!(page.total(), 2);
        assert_eq!(page.scroll_id.as_deref(), Some("c1"));
        assert_eq!(page.hits.len(), 2);
        assert_eq!(page.hits[0].id.as_deref(), Some("1"));
        assert_eq!(page.hits[0].score, None);
        assert_eq!(page.hits[1].source["handleLower"], "bob");
    }

    #[test]
    fn test_from_response_rejects_non_object() {
        let err = SearchResultPage::from_response(json!([1, 2])).unwrap_err();
        assert!(matches!(err, RetrievalError::MalformedResponse { .. }));
    }

    #[test]
    fn test_from_response_rejects_bad_hits() {
        let err = SearchResultPage::from_response(json!({ "hits": { "hits": "nope" } }))
            .unwrap_err();
        assert!(matches!(err, RetrievalError::MalformedResponse { .. }));
    }

    #[test]
    fn test_suggestion_options() {
        let body = json!({
            "hits": { "total": 0, "hits": [] },
            "suggest": {
                "handle-suggestion": [{
                    "text": "jo",
                    "offset": 0,
                    "length": 2,
                    "options": [
                        { "text": "john", "_id": "10", "_score": 1.0, "_source": { "handle": "john" } },
                        { "text": "joan", "_id": "11", "_score": 1.0 }
                    ]
                }]
            }
        });

        let page = SearchResultPage::from_response(body).unwrap();
        let options = page.suggestion_options("handle-suggestion").unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].text, "john");
        assert_eq!(options[1].id.as_deref(), Some("11"));
        assert!(options[1].source.is_none());

        assert!(page.suggestion_options("other").unwrap().is_empty());
    }

    #[test]
    fn test_accumulator_rejects_overflow() {
        let first = SearchResultPage::new(vec![Hit::new("1", json!({}))], 2, Some("c1".into()));
        let mut acc = AccumulatedResult::from_first_page(first).unwrap();
        assert!(!acc.is_complete());
        assert_eq!(acc.pages(), 1);

        let extra = SearchResultPage::new(
            vec![Hit::new("2", json!({})), Hit::new("3", json!({}))],
            2,
            Some("c2".into()),
        );
        let err = acc.push_page(extra).unwrap_err();
        assert!(matches!(
            err,
            RetrievalError::TotalExceeded {
                collected: 3,
                total: 2
            }
        ));
        assert_eq!(acc.len(), 1);
    }

    #[test]
    fn test_accumulator_keeps_last_scroll_id() {
        let first = SearchResultPage::new(vec![Hit::new("1", json!({}))], 2, Some("c1".into()));
        let mut acc = AccumulatedResult::from_first_page(first).unwrap();
        acc.push_page(SearchResultPage::new(
            vec![Hit::new("2", json!({}))],
            2,
            Some("c2".into()),
        ))
        .unwrap();
        assert!(acc.is_complete());
        assert_eq!(acc.scroll_id(), Some("c2"));
        assert_eq!(acc.pages(), 2);
    }

    #[test]
    fn test_zero_total_discards_first_page_hits() {
        let mut first = SearchResultPage::new(vec![Hit::new("1", json!({}))], 0, Some("c1".into()));
        first.raw_total = Some(json!({ "relation": "eq" }));

        let acc = AccumulatedResult::from_first_page(first).unwrap();
        assert!(acc.is_complete());
        assert!(acc.is_empty());
        assert_eq!(acc.total(), 0);
        assert_eq!(acc.scroll_id(), Some("c1"));
    }
}
