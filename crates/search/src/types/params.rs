//! Caller-facing query parameters.
//!
//! These structs are what an HTTP layer fills from a request's query string;
//! field names follow the public API's camelCase spelling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::request::SortOrder;
use crate::error::QueryError;

/// How multiple values of a multi-value filter are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BooleanOperator {
    /// Every value must match.
    And,
    /// At least one value must match.
    #[default]
    Or,
}

impl fmt::Display for BooleanOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BooleanOperator::And => f.write_str("AND"),
            BooleanOperator::Or => f.write_str("OR"),
        }
    }
}

impl FromStr for BooleanOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(BooleanOperator::And),
            "OR" => Ok(BooleanOperator::Or),
            _ => Err(QueryError::UnknownOperator {
                value: s.to_string(),
            }),
        }
    }
}

/// 1-indexed page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    /// Page number, starting at 1.
    #[serde(default = "default_page")]
    pub page: u64,
    /// Hits per page.
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    10
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl Paging {
    /// Creates a page selection.
    pub fn new(page: u64, per_page: u64) -> Self {
        Self { page, per_page }
    }

    /// Validates the selection against the largest allowed page size.
    pub fn validate(&self, max_per_page: u64) -> Result<(), QueryError> {
        if self.page == 0 || self.per_page == 0 || self.per_page > max_per_page {
            return Err(QueryError::InvalidPaging {
                page: self.page,
                per_page: self.per_page,
                max_per_page,
            });
        }
        Ok(())
    }

    /// Returns the offset of the first hit on this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

/// Filters for a member profile lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberQuery {
    /// Exact user id.
    pub user_id: Option<String>,
    /// Exact lower-cased handle.
    pub handle_lower: Option<String>,
    /// Exact handle.
    pub handle: Option<String>,
    /// Exact email.
    pub email: Option<String>,
    /// Any of these user ids.
    pub user_ids: Vec<String>,
    /// Any of these lower-cased handles.
    pub handles_lower: Vec<String>,
    /// Any of these handles.
    pub handles: Vec<String>,
    /// Sort order on handle.
    pub sort: SortOrder,
    /// Page selection.
    #[serde(flatten)]
    pub paging: Paging,
}

/// A lookup keyed by lower-cased handles (skills, stats).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HandleLookup {
    /// Lower-cased handles to fetch.
    pub handles_lower: Vec<String>,
    /// Sort order.
    pub sort: SortOrder,
}

impl HandleLookup {
    /// Creates a lookup for the given handles, lower-casing them.
    pub fn new<I, S>(handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            handles_lower: handles
                .into_iter()
                .map(|h| h.as_ref().to_lowercase())
                .collect(),
            sort: SortOrder::default(),
        }
    }
}

/// A trait lookup keyed by member ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TraitLookup {
    /// Member ids to fetch.
    pub member_ids: Vec<String>,
    /// Sort order.
    pub sort: SortOrder,
}

/// A typeahead lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionQuery {
    /// Text to complete.
    pub term: String,
}

/// A talent search by skill ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillSearchQuery {
    /// Skill ids to match.
    pub skill_ids: Vec<String>,
    /// Whether members need all skills or any of them.
    #[serde(rename = "skillsBooleanOperator")]
    pub operator: BooleanOperator,
}
