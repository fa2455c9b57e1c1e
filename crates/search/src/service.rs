//! Member search operations.
//!
//! [`MemberSearchService`] runs each lookup end to end: build the request,
//! issue the initial search, and drain the scroll cursor for lookups that
//! return every match.

use crate::backend::SearchBackend;
use crate::config::SearchConfig;
use crate::error::SearchResult;
use crate::query_builder::{HANDLE_SUGGESTER, MemberQueryBuilder};
use crate::scroll::ScrollDrainer;
use crate::types::{
    AccumulatedResult, HandleLookup, MemberQuery, SearchRequest, SearchResultPage,
    SkillSearchQuery, SuggestionOption, SuggestionQuery, TraitLookup,
};

/// Runs member lookups against a search backend.
#[derive(Debug)]
pub struct MemberSearchService<B> {
    config: SearchConfig,
    backend: B,
    drainer: ScrollDrainer,
}

impl<B: SearchBackend> MemberSearchService<B> {
    /// Creates a service, failing on an invalid configuration before any request is sent.
    pub fn new(config: SearchConfig, backend: B) -> SearchResult<Self> {
        config.validate()?;
        let drainer = ScrollDrainer::new(config.keep_alive()?);
        Ok(Self {
            config,
            backend,
            drainer,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn builder(&self) -> SearchResult<MemberQueryBuilder<'_>> {
        Ok(MemberQueryBuilder::new(&self.config)?)
    }

    /// Fetches one page of active member profiles.
    pub async fn get_members(&self, query: &MemberQuery) -> SearchResult<SearchResultPage> {
        let request = self.builder()?.members(query)?;
        self.backend.search(&request).await
    }

    /// Fetches the skill documents of the given members.
    pub async fn get_members_skills(&self, lookup: &HandleLookup) -> SearchResult<SearchResultPage> {
        let request = self.builder()?.members_skills(lookup)?;
        self.backend.search(&request).await
    }

    /// Fetches every stats document of the given members.
    pub async fn get_members_stats(&self, lookup: &HandleLookup) -> SearchResult<AccumulatedResult> {
        let request = self.builder()?.members_stats(lookup)?;
        self.search_all(&request).await
    }

    /// Fetches every trait document of the given members.
    pub async fn get_member_traits(&self, lookup: &TraitLookup) -> SearchResult<AccumulatedResult> {
        let request = self.builder()?.member_traits(lookup)?;
        self.search_all(&request).await
    }

    /// Returns handle completions for a typeahead term.
    pub async fn get_suggestion(
        &self,
        query: &SuggestionQuery,
    ) -> SearchResult<Vec<SuggestionOption>> {
        let request = self.builder()?.suggestion(query)?;
        let page = self.backend.search(&request).await?;
        Ok(page.suggestion_options(HANDLE_SUGGESTER)?)
    }

    /// Finds every available member matching the skill filter.
    pub async fn search_members_skills(
        &self,
        query: &SkillSearchQuery,
    ) -> SearchResult<AccumulatedResult> {
        let request = self.builder()?.skill_search(query)?;
        self.search_all(&request).await
    }

    /// Returns the normalized total of a page.
    pub fn total(page: &SearchResultPage) -> u64 {
        page.total()
    }

    /// Runs a scrolled request and drains its cursor.
    ///
    /// The final cursor is released after a successful drain; a failed
    /// release is logged and does not affect the result.
    pub async fn search_all(&self, request: &SearchRequest) -> SearchResult<AccumulatedResult> {
        let initial = self.backend.search(request).await?;
        tracing::debug!(
            index = %request.index,
            total = initial.total(),
            first_page = initial.hits.len(),
            "Draining scroll"
        );

        let result = self.drainer.drain_backend(&self.backend, initial).await;

        match result {
            Ok(acc) => {
                if let Some(scroll_id) = acc.scroll_id() {
                    if let Err(e) = self.backend.clear_scroll(scroll_id).await {
                        tracing::warn!(
                            backend = self.backend.name(),
                            error = %e,
                            "Failed to release scroll cursor"
                        );
                    }
                }
                Ok(acc)
            }
            Err(e) => {
                tracing::warn!(
                    backend = self.backend.name(),
                    index = %request.index,
                    error = %e,
                    "Scroll drain failed"
                );
                Err(e)
            }
        }
    }
}

impl<B> MemberSearchService<B> {
    /// Consumes the service, returning the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }
}
