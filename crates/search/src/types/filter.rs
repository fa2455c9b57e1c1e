//! Filter clause trees.
//!
//! A [`FilterClause`] is built once per request and rendered into the
//! backend's bool query DSL by [`FilterClause::to_query`].

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A filter predicate or a boolean combination of predicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterClause {
    /// Exact-value match on a single field.
    PhraseMatch {
        /// Document field.
        field: String,
        /// Value the field must equal.
        value: Value,
    },
    /// Match any value from a set on a single field.
    TermsMatch {
        /// Document field.
        field: String,
        /// Accepted values.
        values: Vec<Value>,
    },
    /// All sub-clauses must match.
    Conjunction(Vec<FilterClause>),
    /// At least one sub-clause must match.
    Disjunction(Vec<FilterClause>),
    /// None of the sub-clauses may match.
    Negation(Vec<FilterClause>),
}

impl FilterClause {
    /// Creates a phrase-match predicate.
    pub fn phrase(field: impl Into<String>, value: impl Into<Value>) -> Self {
        FilterClause::PhraseMatch {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a terms-match predicate.
    pub fn terms<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        FilterClause::TermsMatch {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Renders the clause as query DSL.
    pub fn to_query(&self) -> Value {
        match self {
            FilterClause::PhraseMatch { field, value } => {
                json!({ "match_phrase": { field.as_str(): value } })
            }
            FilterClause::TermsMatch { field, values } => {
                json!({ "terms": { field.as_str(): values } })
            }
            FilterClause::Conjunction(clauses) => {
                json!({ "bool": { "filter": render_all(clauses) } })
            }
            FilterClause::Disjunction(clauses) => json!({
                "bool": {
                    "should": render_all(clauses),
                    "minimum_should_match": 1
                }
            }),
            FilterClause::Negation(clauses) => {
                json!({ "bool": { "must_not": render_all(clauses) } })
            }
        }
    }
}

fn render_all(clauses: &[FilterClause]) -> Vec<Value> {
    clauses.iter().map(FilterClause::to_query).collect()
}
