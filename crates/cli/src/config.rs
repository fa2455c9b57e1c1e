//! Command-line configuration.
//!
//! Connection and index settings come from flags or `TALENT_SEARCH_*`
//! environment variables.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TALENT_SEARCH_NODES` | http://localhost:9200 | Comma-separated node URLs |
//! | `TALENT_SEARCH_USERNAME` | | Basic auth username |
//! | `TALENT_SEARCH_PASSWORD` | | Basic auth password |
//! | `TALENT_SEARCH_TOKEN` | | Bearer token |
//! | `TALENT_SEARCH_INSECURE` | false | Skip certificate validation |
//! | `TALENT_SEARCH_MEMBER_PROFILE_INDEX` | | Member profile index |
//! | `TALENT_SEARCH_MEMBER_SKILLS_INDEX` | | Member skills index |
//! | `TALENT_SEARCH_MEMBER_STATS_INDEX` | | Member stats index |
//! | `TALENT_SEARCH_MEMBER_TRAITS_INDEX` | | Member traits index |
//! | `TALENT_SEARCH_REQUEST_TIMEOUT` | 30s | Request timeout |
//! | `TALENT_SEARCH_SCROLL_KEEP_ALIVE` | 90s | Scroll cursor lifetime |
//! | `TALENT_SEARCH_SCROLL_PAGE_SIZE` | 10000 | Scrolled page size |
//! | `TALENT_SEARCH_SUGGESTION_SIZE` | 50 | Handle suggestion candidates |
//! | `TALENT_SEARCH_STATS_GROUP_ID` | 10 | Stats group |
//! | `TALENT_SEARCH_LOG_LEVEL` | info | Log level |

use clap::{Parser, Subcommand};

use talent_search::config::{IndexConfig, SearchAuth, SearchConfig};
use talent_search::types::{BooleanOperator, SortOrder};

/// Runs one member lookup and prints the result as JSON.
#[derive(Debug, Clone, Parser)]
#[command(name = "talent-search")]
#[command(about = "Talent search member lookups", version)]
pub struct CliConfig {
    /// Search node URLs (comma-separated). Only the first is used.
    #[arg(
        long,
        env = "TALENT_SEARCH_NODES",
        default_value = "http://localhost:9200",
        global = true
    )]
    pub nodes: String,

    /// Basic auth username.
    #[arg(long, env = "TALENT_SEARCH_USERNAME", global = true)]
    pub username: Option<String>,

    /// Basic auth password.
    #[arg(long, env = "TALENT_SEARCH_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Bearer token, used when no username is given.
    #[arg(long, env = "TALENT_SEARCH_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Skip TLS certificate validation.
    #[arg(long, env = "TALENT_SEARCH_INSECURE", default_value = "false", global = true)]
    pub insecure: bool,

    /// Member profile index.
    #[arg(long, env = "TALENT_SEARCH_MEMBER_PROFILE_INDEX", default_value = "", global = true)]
    pub member_profile_index: String,

    /// Member skills index.
    #[arg(long, env = "TALENT_SEARCH_MEMBER_SKILLS_INDEX", default_value = "", global = true)]
    pub member_skills_index: String,

    /// Member stats index.
    #[arg(long, env = "TALENT_SEARCH_MEMBER_STATS_INDEX", default_value = "", global = true)]
    pub member_stats_index: String,

    /// Member traits index.
    #[arg(long, env = "TALENT_SEARCH_MEMBER_TRAITS_INDEX", default_value = "", global = true)]
    pub member_traits_index: String,

    /// Request timeout (e.g. 30s, 2m).
    #[arg(long, env = "TALENT_SEARCH_REQUEST_TIMEOUT", default_value = "30s", global = true)]
    pub request_timeout: String,

    /// Scroll cursor lifetime between page fetches.
    #[arg(long, env = "TALENT_SEARCH_SCROLL_KEEP_ALIVE", default_value = "90s", global = true)]
    pub scroll_keep_alive: String,

    /// Page size for scrolled lookups.
    #[arg(long, env = "TALENT_SEARCH_SCROLL_PAGE_SIZE", default_value = "10000", global = true)]
    pub scroll_page_size: u32,

    /// Number of handle suggestions to request.
    #[arg(long, env = "TALENT_SEARCH_SUGGESTION_SIZE", default_value = "50", global = true)]
    pub suggestion_size: u32,

    /// Stats group restricted by the stats lookup.
    #[arg(long, env = "TALENT_SEARCH_STATS_GROUP_ID", default_value = "10", global = true)]
    pub stats_group_id: u64,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "TALENT_SEARCH_LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    /// Lookup to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Lookups available from the command line.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check that the cluster is reachable.
    Health,

    /// Fetch one page of active member profiles.
    Members {
        /// Exact user id.
        #[arg(long)]
        user_id: Option<String>,
        /// Exact lower-cased handle.
        #[arg(long)]
        handle_lower: Option<String>,
        /// Exact handle.
        #[arg(long)]
        handle: Option<String>,
        /// Exact email.
        #[arg(long)]
        email: Option<String>,
        /// Any of these lower-cased handles (comma-separated).
        #[arg(long, value_delimiter = ',')]
        handles_lower: Vec<String>,
        /// Any of these handles (comma-separated).
        #[arg(long, value_delimiter = ',')]
        handles: Vec<String>,
        /// Any of these user ids (comma-separated).
        #[arg(long, value_delimiter = ',')]
        user_ids: Vec<String>,
        /// Sort order on handle.
        #[arg(long, default_value = "asc")]
        sort: SortOrder,
        /// Page number, starting at 1.
        #[arg(long, default_value = "1")]
        page: u64,
        /// Page size.
        #[arg(long, default_value = "10")]
        per_page: u64,
    },

    /// Fetch the skill documents of the given handles.
    Skills {
        /// Member handles.
        #[arg(required = true, value_delimiter = ',')]
        handles: Vec<String>,
        /// Sort order on handle.
        #[arg(long, default_value = "asc")]
        sort: SortOrder,
    },

    /// Fetch every stats document of the given handles.
    Stats {
        /// Member handles.
        #[arg(required = true, value_delimiter = ',')]
        handles: Vec<String>,
        /// Sort order on handle.
        #[arg(long, default_value = "asc")]
        sort: SortOrder,
    },

    /// Fetch every trait document of the given member ids.
    Traits {
        /// Member ids.
        #[arg(required = true, value_delimiter = ',')]
        member_ids: Vec<String>,
        /// Sort order on handle.
        #[arg(long, default_value = "asc")]
        sort: SortOrder,
    },

    /// Complete a handle prefix.
    Suggest {
        /// Handle prefix.
        term: String,
    },

    /// Find available members by skill id.
    SkillSearch {
        /// Skill ids.
        #[arg(required = true, value_delimiter = ',')]
        skill_ids: Vec<String>,
        /// AND requires every skill, OR any one.
        #[arg(long, default_value = "OR")]
        operator: BooleanOperator,
    },
}

impl CliConfig {
    /// Builds the library configuration from the command line.
    pub fn search_config(&self) -> Result<SearchConfig, String> {
        let nodes: Vec<String> = self
            .nodes
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let auth = match (&self.username, &self.password, &self.token) {
            (Some(username), Some(password), _) => Some(SearchAuth::Basic {
                username: username.clone(),
                password: password.clone(),
            }),
            (Some(_), None, _) => return Err("--username requires --password".to_string()),
            (None, _, Some(token)) => Some(SearchAuth::Bearer {
                token: token.clone(),
            }),
            _ => None,
        };

        let request_timeout = humantime_duration(&self.request_timeout)?;

        Ok(SearchConfig {
            nodes,
            indices: IndexConfig {
                member_profile: self.member_profile_index.clone(),
                member_skills: self.member_skills_index.clone(),
                member_stats: self.member_stats_index.clone(),
                member_traits: self.member_traits_index.clone(),
            },
            request_timeout_ms: request_timeout.as_millis() as u64,
            auth,
            disable_certificate_validation: self.insecure,
            scroll_keep_alive: self.scroll_keep_alive.clone(),
            scroll_page_size: self.scroll_page_size,
            suggestion_size: self.suggestion_size,
            stats_group_id: self.stats_group_id,
            ..Default::default()
        })
    }
}

fn humantime_duration(value: &str) -> Result<std::time::Duration, String> {
    let duration = humantime::parse_duration(value.trim())
        .map_err(|e| format!("invalid request timeout '{}': {}", value, e))?;
    if duration.is_zero() {
        return Err("request timeout cannot be 0".to_string());
    }
    Ok(duration)
}
