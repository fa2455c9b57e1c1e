//! Member query builder.
//!
//! Translates caller parameters into [`SearchRequest`]s. Every request
//! carries its lookup's base predicates; caller predicates are added on top.
//! Building never touches the network.

use std::time::Duration;

use serde_json::Value;

use crate::config::SearchConfig;
use crate::error::{ConfigError, QueryError};
use crate::types::{
    BooleanOperator, FilterClause, HandleLookup, MemberQuery, SearchRequest, SkillSearchQuery,
    SortSpec, SuggestSpec, SuggestionQuery, TraitLookup,
};

/// Name the handle suggester's candidates are reported under.
pub const HANDLE_SUGGESTER: &str = "handle-suggestion";

const HANDLE_SUGGEST_FIELD: &str = "handleSuggest";
const ACTIVE_STATUS: &str = "ACTIVE";
const SKILL_ID_FIELD: &str = "skills.id";
const AVAILABLE_FIELD: &str = "availableForGigs";

/// Profile fields returned by a skill search.
pub const SKILL_SEARCH_FIELDS: &[&str] = &[
    "userId",
    "description",
    "skills.id",
    "skills.levels",
    "skills.name",
    "handle",
    "handleLower",
    "photoURL",
    "firstName",
    "lastName",
    "homeCountryCode",
    "addresses",
    "lastLoginDate",
    "skillScoreDeduction",
    "namesAndHandleAppearance",
    "availableForGigs",
];

/// Builds search requests for member lookups.
#[derive(Debug, Clone)]
pub struct MemberQueryBuilder<'a> {
    config: &'a SearchConfig,
    keep_alive: Duration,
}

impl<'a> MemberQueryBuilder<'a> {
    /// Creates a builder, validating the configuration first.
    pub fn new(config: &'a SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let keep_alive = config.keep_alive()?;
        Ok(Self { config, keep_alive })
    }

    /// Builds a paged member profile lookup.
    ///
    /// Single values become phrase matches and lists become terms matches;
    /// only active members are returned.
    pub fn members(&self, query: &MemberQuery) -> Result<SearchRequest, QueryError> {
        query
            .paging
            .validate(u64::from(self.config.max_page_size))?;

        let mut clauses = Vec::new();
        let phrases = [
            ("userId", &query.user_id),
            ("handleLower", &query.handle_lower),
            ("handle", &query.handle),
            ("email", &query.email),
        ];
        for (field, value) in phrases {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                clauses.push(FilterClause::phrase(field, value));
            }
        }

        let sets = [
            ("userId", &query.user_ids),
            ("handleLower", &query.handles_lower),
            ("handle", &query.handles),
        ];
        for (field, values) in sets {
            let values = non_blank(values);
            if !values.is_empty() {
                clauses.push(FilterClause::terms(field, values));
            }
        }

        clauses.push(FilterClause::phrase("status", ACTIVE_STATUS));

        Ok(SearchRequest::new(&self.config.indices.member_profile)
            .with_paging(query.paging.offset(), query.paging.per_page)
            .with_sort(SortSpec::new("handle", query.sort))
            .with_filter(FilterClause::Conjunction(clauses)))
    }

    /// Builds a member skills lookup by lower-cased handle.
    ///
    /// Returns one page sized to the number of handles.
    pub fn members_skills(&self, lookup: &HandleLookup) -> Result<SearchRequest, QueryError> {
        let handles = require_values(&lookup.handles_lower, "handleLower")?;
        let size = (handles.len() as u64).min(u64::from(self.config.max_page_size));

        Ok(SearchRequest::new(&self.config.indices.member_skills)
            .with_size(size)
            .with_sort(SortSpec::new("userHandle", lookup.sort))
            .with_filter(FilterClause::Conjunction(vec![FilterClause::terms(
                "handleLower",
                handles,
            )])))
    }

    /// Builds a scrolled member stats lookup restricted to the configured stats group.
    pub fn members_stats(&self, lookup: &HandleLookup) -> Result<SearchRequest, QueryError> {
        let handles = require_values(&lookup.handles_lower, "handleLower")?;

        Ok(self
            .scrolled(&self.config.indices.member_stats)
            .with_sort(SortSpec::new("handleLower", lookup.sort))
            .with_filter(FilterClause::Conjunction(vec![
                FilterClause::terms("handleLower", handles),
                FilterClause::phrase("groupId", self.config.stats_group_id),
            ])))
    }

    /// Builds a scrolled member traits lookup by member id.
    pub fn member_traits(&self, lookup: &TraitLookup) -> Result<SearchRequest, QueryError> {
        let ids = require_values(&lookup.member_ids, "userId")?;

        Ok(self
            .scrolled(&self.config.indices.member_traits)
            .with_sort(SortSpec::new("handleLower", lookup.sort))
            .with_filter(FilterClause::Conjunction(vec![FilterClause::terms(
                "userId", ids,
            )])))
    }

    /// Builds a handle typeahead lookup.
    ///
    /// No hits are requested; candidates come back in the suggest section.
    pub fn suggestion(&self, query: &SuggestionQuery) -> Result<SearchRequest, QueryError> {
        let term = query.term.trim();
        if term.is_empty() {
            return Err(QueryError::EmptyTerm);
        }

        Ok(SearchRequest::new(&self.config.indices.member_profile)
            .with_size(0)
            .with_suggest(SuggestSpec {
                name: HANDLE_SUGGESTER.to_string(),
                text: term.to_string(),
                field: HANDLE_SUGGEST_FIELD.to_string(),
                size: self.config.suggestion_size,
            }))
    }

    /// Builds a scrolled talent search by skill id.
    ///
    /// With [`BooleanOperator::And`] every skill is required; with
    /// [`BooleanOperator::Or`] any one suffices. Members who opted out of
    /// gigs are excluded either way, so an empty skill list returns every
    /// available member.
    pub fn skill_search(&self, query: &SkillSearchQuery) -> Result<SearchRequest, QueryError> {
        let skills: Vec<FilterClause> = non_blank(&query.skill_ids)
            .into_iter()
            .map(|id| FilterClause::phrase(SKILL_ID_FIELD, id))
            .collect();

        let mut clauses = Vec::with_capacity(2);
        if !skills.is_empty() {
            clauses.push(match query.operator {
                BooleanOperator::And => FilterClause::Conjunction(skills),
                BooleanOperator::Or => FilterClause::Disjunction(skills),
            });
        }
        clauses.push(FilterClause::Negation(vec![FilterClause::phrase(
            AVAILABLE_FIELD,
            false,
        )]));

        Ok(self
            .scrolled(&self.config.indices.member_profile)
            .with_source(SKILL_SEARCH_FIELDS.iter().copied())
            .with_filter(FilterClause::Conjunction(clauses)))
    }

    fn scrolled(&self, index: &str) -> SearchRequest {
        SearchRequest::new(index)
            .with_size(u64::from(self.config.scroll_page_size))
            .with_scroll(self.keep_alive)
    }
}

fn non_blank(values: &[String]) -> Vec<Value> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(Value::from)
        .collect()
}

fn require_values(values: &[String], field: &'static str) -> Result<Vec<Value>, QueryError> {
    let values = non_blank(values);
    if values.is_empty() {
        return Err(QueryError::EmptyFilter { field });
    }
    Ok(values)
}
