//! Fixtures for member search tests.

use serde_json::{Value, json};

use talent_search::config::{IndexConfig, SearchConfig};
use talent_search::types::{Hit, SearchResultPage};

/// Index names used throughout the tests.
pub const PROFILE_INDEX: &str = "members";
pub const SKILLS_INDEX: &str = "members-skills";
pub const STATS_INDEX: &str = "members-stats";
pub const TRAITS_INDEX: &str = "members-traits";

/// Returns a valid configuration with every index set.
pub fn test_config() -> SearchConfig {
    SearchConfig {
        indices: IndexConfig {
            member_profile: PROFILE_INDEX.to_string(),
            member_skills: SKILLS_INDEX.to_string(),
            member_stats: STATS_INDEX.to_string(),
            member_traits: TRAITS_INDEX.to_string(),
        },
        ..Default::default()
    }
}

/// Builds a member profile document.
pub fn member_doc(n: usize) -> Value {
    json!({
        "userId": n,
        "handle": format!("Member{}", n),
        "handleLower": format!("member{}", n),
        "status": "ACTIVE",
    })
}

/// Builds `count` hits numbered from `start`.
pub fn member_hits(start: usize, count: usize) -> Vec<Hit> {
    (start..start + count)
        .map(|n| Hit::new(n.to_string(), member_doc(n)))
        .collect()
}

/// Builds a page of `count` hits numbered from `start`.
pub fn page(start: usize, count: usize, total: u64, scroll_id: Option<&str>) -> SearchResultPage {
    SearchResultPage::new(member_hits(start, count), total, scroll_id.map(String::from))
}

/// Builds the pages a scroll over `total` documents returns with `page_size` hits per page.
///
/// Every page carries the same scroll id, as the backend does for a live cursor.
pub fn scroll_pages(total: usize, page_size: usize, scroll_id: &str) -> Vec<SearchResultPage> {
    let mut pages = Vec::new();
    let mut start = 0;
    loop {
        let count = page_size.min(total - start);
        pages.push(page(start, count, total as u64, Some(scroll_id)));
        start += count;
        if start >= total {
            break;
        }
    }
    pages
}

/// Parses a raw response body into a page.
pub fn response(body: Value) -> SearchResultPage {
    SearchResultPage::from_response(body).unwrap()
}
