//! Search request types.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::filter::FilterClause;
use crate::error::QueryError;

/// Sort order for a single sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Returns the DSL spelling of the order.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(QueryError::UnknownSortOrder {
                value: s.to_string(),
            }),
        }
    }
}

/// A sort field and its order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Document field to sort on.
    pub field: String,
    /// Sort order.
    pub order: SortOrder,
}

impl SortSpec {
    /// Creates a sort spec.
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    fn to_query(&self) -> Value {
        json!({ self.field.as_str(): { "order": self.order.as_str() } })
    }
}

/// A completion suggester request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestSpec {
    /// Name the suggester's results are reported under.
    pub name: String,
    /// Text to complete.
    pub text: String,
    /// Completion field.
    pub field: String,
    /// Maximum number of candidates.
    pub size: u32,
}

/// A single search request against one index.
///
/// Built per caller query by the query builder and sent exactly once.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchRequest {
    /// Target index.
    pub index: String,
    /// Offset of the first hit.
    pub from: Option<u64>,
    /// Page size.
    pub size: Option<u64>,
    /// Sort fields, in priority order.
    pub sort: Vec<SortSpec>,
    /// Filter clause tree.
    pub filter: Option<FilterClause>,
    /// Field projection.
    pub source: Option<Vec<String>>,
    /// Scroll cursor lifetime; set for requests that will be drained.
    pub scroll: Option<Duration>,
    /// Completion suggester.
    pub suggest: Option<SuggestSpec>,
    /// Ask the backend for an exact total instead of a lower bound.
    pub track_total_hits: bool,
}

impl SearchRequest {
    /// Creates an empty request against an index.
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            ..Default::default()
        }
    }

    /// Sets offset paging.
    pub fn with_paging(mut self, from: u64, size: u64) -> Self {
        self.from = Some(from);
        self.size = Some(size);
        self
    }

    /// Sets the page size.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Adds a sort field.
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort.push(sort);
        self
    }

    /// Sets the filter tree.
    pub fn with_filter(mut self, filter: FilterClause) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the field projection.
    pub fn with_source<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Requests a scroll cursor with the given lifetime.
    pub fn with_scroll(mut self, keep_alive: Duration) -> Self {
        self.scroll = Some(keep_alive);
        self.track_total_hits = true;
        self
    }

    /// Sets the completion suggester.
    pub fn with_suggest(mut self, suggest: SuggestSpec) -> Self {
        self.suggest = Some(suggest);
        self
    }

    /// Returns true if the request opens a scroll cursor.
    pub fn is_scroll(&self) -> bool {
        self.scroll.is_some()
    }

    /// Renders the request body.
    ///
    /// The index and scroll lifetime are request parameters rather than body
    /// fields and are not included.
    pub fn to_body(&self) -> Value {
        let mut body = json!({});

        if let Some(ref filter) = self.filter {
            body["query"] = json!({ "bool": { "filter": [filter.to_query()] } });
        }

        if !self.sort.is_empty() {
            body["sort"] = Value::Array(self.sort.iter().map(SortSpec::to_query).collect());
        }

        if let Some(size) = self.size {
            body["size"] = json!(size);
        }

        if let Some(from) = self.from {
            body["from"] = json!(from);
        }

        if let Some(ref source) = self.source {
            body["_source"] = json!(source);
        }

        if let Some(ref suggest) = self.suggest {
            body["suggest"] = json!({
                suggest.name.as_str(): {
                    "text": suggest.text,
                    "completion": {
                        "size": suggest.size,
                        "field": suggest.field
                    }
                }
            });
        }

        if self.track_total_hits {
            body["track_total_hits"] = json!(true);
        }

        body
    }
}

/// Formats a keep-alive as a backend time unit string (e.g., `90000ms`).
pub fn keep_alive_param(keep_alive: Duration) -> String {
    format!("{}ms", keep_alive.as_millis())
}
