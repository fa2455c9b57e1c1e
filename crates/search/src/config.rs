//! Search backend configuration.
//!
//! All backend parameters are passed explicitly at construction time; nothing
//! is read from process-wide state. Index names have no defaults and must be
//! provided by the caller, so a missing name is reported by
//! [`SearchConfig::validate`] before any request is sent.
//!
//! # Example
//!
//! ```
//! use talent_search::config::{IndexConfig, SearchConfig};
//!
//! let config = SearchConfig {
//!     nodes: vec!["http://localhost:9200".to_string()],
//!     indices: IndexConfig {
//!         member_profile: "members-2020-01".to_string(),
//!         member_skills: "member-skills".to_string(),
//!         member_stats: "memberstats-2020-01".to_string(),
//!         member_traits: "members-trait".to_string(),
//!     },
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Upper bound for any page or candidate count sent to the backend.
pub const MAX_RESULT_WINDOW: u32 = 10_000;

/// Authentication configuration for the search cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SearchAuth {
    /// Basic username/password authentication.
    Basic {
        /// The username for basic auth.
        username: String,
        /// The password for basic auth.
        password: String,
    },
    /// Bearer token authentication.
    Bearer {
        /// The bearer token.
        token: String,
    },
}

/// Index names for each member document collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Member profile documents (members, suggestions, skill search).
    #[serde(default)]
    pub member_profile: String,
    /// Member skill documents.
    #[serde(default)]
    pub member_skills: String,
    /// Member statistics documents.
    #[serde(default)]
    pub member_stats: String,
    /// Member trait documents.
    #[serde(default)]
    pub member_traits: String,
}

impl IndexConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("member_profile", &self.member_profile),
            ("member_skills", &self.member_skills),
            ("member_stats", &self.member_stats),
            ("member_traits", &self.member_traits),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingIndex { key });
            }
        }
        Ok(())
    }
}

/// Configuration for the member search layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search node URLs (e.g., `["http://localhost:9200"]`).
    /// Currently uses the first node (single-node connection pool).
    pub nodes: Vec<String>,

    /// Index names.
    #[serde(default)]
    pub indices: IndexConfig,

    /// Request timeout in milliseconds (default: 30000).
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Optional authentication.
    #[serde(default)]
    pub auth: Option<SearchAuth>,

    /// Whether to disable certificate validation (default: false).
    /// Only use for development/testing.
    #[serde(default)]
    pub disable_certificate_validation: bool,

    /// Scroll cursor lifetime between page fetches (default: "90s").
    #[serde(default = "default_scroll_keep_alive")]
    pub scroll_keep_alive: String,

    /// Page size used for scrolled lookups (default: 10000).
    #[serde(default = "default_scroll_page_size")]
    pub scroll_page_size: u32,

    /// Largest page size a caller may request (default: 10000).
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    /// Number of completion candidates requested by suggestion lookups (default: 50).
    #[serde(default = "default_suggestion_size")]
    pub suggestion_size: u32,

    /// Stats group restricted by member stats lookups (default: 10).
    #[serde(default = "default_stats_group_id")]
    pub stats_group_id: u64,
}

fn default_request_timeout_ms() -> u64 {
    30000
}

fn default_scroll_keep_alive() -> String {
    "90s".to_string()
}

fn default_scroll_page_size() -> u32 {
    MAX_RESULT_WINDOW
}

fn default_max_page_size() -> u32 {
    MAX_RESULT_WINDOW
}

fn default_suggestion_size() -> u32 {
    50
}

fn default_stats_group_id() -> u64 {
    10
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            nodes: vec!["http://localhost:9200".to_string()],
            indices: IndexConfig::default(),
            request_timeout_ms: default_request_timeout_ms(),
            auth: None,
            disable_certificate_validation: false,
            scroll_keep_alive: default_scroll_keep_alive(),
            scroll_page_size: default_scroll_page_size(),
            max_page_size: default_max_page_size(),
            suggestion_size: default_suggestion_size(),
            stats_group_id: default_stats_group_id(),
        }
    }
}

impl SearchConfig {
    /// Validates the configuration.
    ///
    /// Fails on the first missing index name, empty node list, unparsable
    /// keep-alive or out-of-range limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nodes.iter().all(|n| n.trim().is_empty()) {
            return Err(ConfigError::NoNodes);
        }
        self.indices.validate()?;
        self.keep_alive()?;

        let limits = [
            ("scroll_page_size", self.scroll_page_size),
            ("max_page_size", self.max_page_size),
            ("suggestion_size", self.suggestion_size),
        ];
        for (name, value) in limits {
            if value == 0 || value > MAX_RESULT_WINDOW {
                return Err(ConfigError::InvalidLimit {
                    name,
                    value: u64::from(value),
                    max: u64::from(MAX_RESULT_WINDOW),
                });
            }
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidLimit {
                name: "request_timeout_ms",
                value: 0,
                max: u64::MAX,
            });
        }
        Ok(())
    }

    /// Returns the parsed scroll keep-alive.
    pub fn keep_alive(&self) -> Result<Duration, ConfigError> {
        let parsed = humantime::parse_duration(self.scroll_keep_alive.trim()).map_err(|e| {
            ConfigError::InvalidKeepAlive {
                value: self.scroll_keep_alive.clone(),
                message: e.to_string(),
            }
        })?;
        if parsed.is_zero() {
            return Err(ConfigError::InvalidKeepAlive {
                value: self.scroll_keep_alive.clone(),
                message: "keep-alive must be positive".to_string(),
            });
        }
        Ok(parsed)
    }

    /// Returns the request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
