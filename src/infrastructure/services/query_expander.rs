//! Query expansion service.
//!
//! Asks the LLM for a handful of search queries covering the user's question.
//! Expansion is best-effort: any failure (upstream error, timeout, unusable
//! output) degrades to searching with the original query alone.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{Expansion, LlmProvider, LlmRequest, Query};

/// Default number of search queries to request from the model.
pub const DEFAULT_EXPANSION_COUNT: usize = 5;

/// Default deadline for the expansion call.
pub const DEFAULT_EXPANSION_TIMEOUT: Duration = Duration::from_secs(10);

/// Rewrites a user query into multiple search queries via an LLM.
#[derive(Debug)]
pub struct QueryExpander {
    llm: Arc<dyn LlmProvider>,
    model: String,
    count: usize,
    timeout: Duration,
}

impl QueryExpander {
    pub fn new(llm: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
            count: DEFAULT_EXPANSION_COUNT,
            timeout: DEFAULT_EXPANSION_TIMEOUT,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Expand a query into multiple search queries.
    ///
    /// Never fails: if the model can't be reached, takes too long, or
    /// returns something unusable, the result is a single-entry fallback
    /// carrying the original query.
    pub async fn expand(&self, query: &Query) -> Expansion {
        let prompt = format!(
            "Generate {count} search queries for \"{query}\". \
             Return strictly JSON: [\"query1\", \"query2\", ...]",
            count = self.count,
            query = query.as_str(),
        );

        let request = LlmRequest::builder().user(prompt).build();

        let outcome = tokio::time::timeout(self.timeout, self.llm.chat(&self.model, request)).await;

        let content = match outcome {
            Ok(Ok(response)) => response.content().to_string(),
            Ok(Err(error)) => {
                tracing::warn!(error = %error, "query expansion failed, falling back to original query");
                return Expansion::fallback(query.as_str());
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "query expansion timed out, falling back to original query"
                );
                return Expansion::fallback(query.as_str());
            }
        };

        match Self::parse_queries(&content) {
            Some(queries) => {
                tracing::debug!(count = queries.len(), "query expanded");
                Expansion::expanded(queries)
            }
            None => {
                tracing::warn!("query expansion returned no usable queries, falling back");
                Expansion::fallback(query.as_str())
            }
        }
    }

    /// Extract search queries from model output.
    ///
    /// Tries strict JSON first. Models that ignore the format instruction
    /// often emit one query per line instead, so that's the second attempt.
    fn parse_queries(content: &str) -> Option<Vec<String>> {
        if let Ok(queries) = serde_json::from_str::<Vec<String>>(content.trim()) {
            let queries: Vec<String> = queries
                .into_iter()
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty())
                .collect();

            if !queries.is_empty() {
                return Some(queries);
            }
        }

        let lines: Vec<String> = content
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            None
        } else {
            Some(lines)
        }
    }
}
