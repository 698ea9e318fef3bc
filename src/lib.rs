//! Answer Gateway
//!
//! An HTTP service that answers user questions with web-grounded LLM
//! responses. Each query is expanded into multiple search queries, searched
//! concurrently, and the merged results are fed to a chat model for answer
//! synthesis. Answers are kept in a bounded in-memory LRU cache.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use domain::ResponseCache;
use infrastructure::http_client::HttpClient;
use infrastructure::llm::OllamaProvider;
use infrastructure::search::SerperProvider;
use infrastructure::services::{AnswerService, AnswerSynthesizer, QueryExpander};

/// Create the application state with all services initialized
pub fn create_app_state(config: &AppConfig) -> AppState {
    let http_client =
        HttpClient::with_timeout(Duration::from_secs(config.pipeline.request_timeout_secs));

    let llm = Arc::new(OllamaProvider::with_base_url(
        http_client.clone(),
        config.llm.base_url.clone(),
    ));

    let searcher = Arc::new(
        SerperProvider::with_base_url(
            http_client,
            config.search.api_key.clone().unwrap_or_default(),
            config.search.base_url.clone(),
        )
        .with_max_results(config.pipeline.results_per_query),
    );

    let expander = QueryExpander::new(llm.clone(), config.llm.model.clone())
        .with_count(config.pipeline.expansion_count)
        .with_timeout(Duration::from_secs(config.pipeline.expansion_timeout_secs));

    let synthesizer = AnswerSynthesizer::new(llm, config.llm.model.clone());

    let cache = Arc::new(ResponseCache::new(config.pipeline.cache_capacity));

    let answer_service = AnswerService::new(cache, expander, searcher, synthesizer)
        .with_max_context_results(config.pipeline.max_context_results);

    AppState::new(Arc::new(answer_service))
}
