//! Elasticsearch client construction and cluster health.

use std::fmt::Debug;

use elasticsearch::Elasticsearch;
use elasticsearch::auth::Credentials;
use elasticsearch::cert::CertificateValidation;
use elasticsearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use serde_json::Value;

use crate::config::{SearchAuth, SearchConfig};
use crate::error::{ConfigError, RetrievalError, SearchResult};

/// Search backend backed by an Elasticsearch or OpenSearch cluster.
pub struct ElasticsearchBackend {
    /// The Elasticsearch client.
    client: Elasticsearch,
    /// Configuration.
    config: SearchConfig,
}

impl Debug for ElasticsearchBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticsearchBackend")
            .field("nodes", &self.config.nodes)
            .field("indices", &self.config.indices)
            .finish_non_exhaustive()
    }
}

impl ElasticsearchBackend {
    /// Creates a backend with the given configuration.
    ///
    /// The configuration is validated and the client built, but no request is
    /// sent until the first search.
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = Self::build_client(&config)?;
        tracing::info!(
            "Search backend client created for {}",
            config.nodes.first().map(String::as_str).unwrap_or_default()
        );
        Ok(Self { client, config })
    }

    /// Builds the Elasticsearch client from configuration.
    fn build_client(config: &SearchConfig) -> Result<Elasticsearch, ConfigError> {
        let url = config
            .nodes
            .iter()
            .find(|n| !n.trim().is_empty())
            .ok_or(ConfigError::NoNodes)?;

        let parsed_url = url
            .trim()
            .parse::<elasticsearch::http::Url>()
            .map_err(|e| ConfigError::InvalidNode {
                url: url.clone(),
                message: format!("{}", e),
            })?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);

        let mut builder = TransportBuilder::new(conn_pool).timeout(config.request_timeout());

        if config.disable_certificate_validation {
            builder = builder.cert_validation(CertificateValidation::None);
        }

        if let Some(ref auth) = config.auth {
            builder = match auth {
                SearchAuth::Basic { username, password } => {
                    builder.auth(Credentials::Basic(username.clone(), password.clone()))
                }
                SearchAuth::Bearer { token } => builder.auth(Credentials::Bearer(token.clone())),
            };
        }

        let transport = builder.build().map_err(|e| ConfigError::Transport {
            message: e.to_string(),
        })?;

        Ok(Elasticsearch::new(transport))
    }

    /// Returns the Elasticsearch client.
    pub(crate) fn client(&self) -> &Elasticsearch {
        &self.client
    }

    /// Returns the backend configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Checks that the cluster is reachable and not red.
    pub async fn health_check(&self) -> SearchResult<()> {
        let response = self
            .client
            .cluster()
            .health(elasticsearch::cluster::ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| super::search_impl::transport_error("health", e))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RetrievalError::Status {
                operation: "health",
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| super::search_impl::transport_error("health", e))?;

        let cluster_status = body
            .get("status")
            .and_then(|s| s.as_str())
            .unwrap_or("unknown");

        if cluster_status == "red" {
            return Err(RetrievalError::Status {
                operation: "health",
                status: status.as_u16(),
                body: format!("cluster status is red: {}", body),
            }
            .into());
        }

        tracing::debug!("Search cluster healthy (status: {})", cluster_status);
        Ok(())
    }
}
