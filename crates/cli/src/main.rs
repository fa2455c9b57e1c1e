//! Talent Search CLI
//!
//! Runs one member lookup against a search cluster and prints the result
//! as JSON on stdout.

mod config;

use clap::Parser;
use serde_json::{Value, json};
use tracing::info;

use talent_search::backends::elasticsearch::ElasticsearchBackend;
use talent_search::error::SearchResult;
use talent_search::service::MemberSearchService;
use talent_search::types::{
    AccumulatedResult, HandleLookup, MemberQuery, Paging, SearchResultPage, SkillSearchQuery,
    SuggestionQuery, TraitLookup,
};

use crate::config::{CliConfig, Command};

/// Initializes the tracing subscriber, writing to stderr.
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("talent_search={},talent_search_cli={}", level, level))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn page_json(page: &SearchResultPage) -> Value {
    json!({
        "total": page.total(),
        "hits": page.hits,
    })
}

fn accumulated_json(result: &AccumulatedResult) -> Value {
    json!({
        "total": result.total(),
        "pages": result.pages(),
        "documents": result.sources().collect::<Vec<_>>(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();
    init_logging(&cli.log_level);

    let search_config = cli
        .search_config()
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    info!(
        nodes = ?search_config.nodes,
        command = ?cli.command,
        "Starting talent search lookup"
    );

    let backend = ElasticsearchBackend::new(search_config.clone())?;
    let service = MemberSearchService::new(search_config, backend)?;

    let output = run(&service, cli.command).await.map_err(|e| {
        if e.is_retrieval() {
            anyhow::anyhow!("Search request failed: {}", e)
        } else {
            anyhow::anyhow!("Invalid lookup: {}", e)
        }
    })?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Runs a lookup command and renders its result.
async fn run(
    service: &MemberSearchService<ElasticsearchBackend>,
    command: Command,
) -> SearchResult<Value> {
    let output = match command {
        Command::Health => {
            service.backend().health_check().await?;
            json!({ "status": "ok" })
        }
        Command::Members {
            user_id,
            handle_lower,
            handle,
            email,
            handles_lower,
            handles,
            user_ids,
            sort,
            page,
            per_page,
        } => {
            let query = MemberQuery {
                user_id,
                handle_lower,
                handle,
                email,
                user_ids,
                handles_lower: handles_lower.iter().map(|h| h.to_lowercase()).collect(),
                handles,
                sort,
                paging: Paging::new(page, per_page),
            };
            page_json(&service.get_members(&query).await?)
        }
        Command::Skills { handles, sort } => {
            let lookup = HandleLookup {
                sort,
                ..HandleLookup::new(handles)
            };
            page_json(&service.get_members_skills(&lookup).await?)
        }
        Command::Stats { handles, sort } => {
            let lookup = HandleLookup {
                sort,
                ..HandleLookup::new(handles)
            };
            accumulated_json(&service.get_members_stats(&lookup).await?)
        }
        Command::Traits { member_ids, sort } => {
            let lookup = TraitLookup { member_ids, sort };
            accumulated_json(&service.get_member_traits(&lookup).await?)
        }
        Command::Suggest { term } => {
            let options = service.get_suggestion(&SuggestionQuery { term }).await?;
            json!({ "options": options })
        }
        Command::SkillSearch {
            skill_ids,
            operator,
        } => {
            let query = SkillSearchQuery {
                skill_ids,
                operator,
            };
            accumulated_json(&service.search_members_skills(&query).await?)
        }
    };
    Ok(output)
}
