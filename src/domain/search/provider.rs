use std::fmt::Debug;

use async_trait::async_trait;

use super::SearchResult;
use crate::domain::DomainError;

/// Trait for web search providers.
///
/// Unlike the LLM side, failures here propagate: the orchestrator decides
/// what a failed sub-query search means for the request.
#[async_trait]
pub trait SearchProvider: Send + Sync + Debug {
    /// Execute one search query, returning a small ranked result set.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::RwLock;

    use super::*;

    #[derive(Debug)]
    pub struct MockSearchProvider {
        results: RwLock<HashMap<String, Vec<SearchResult>>>,
        default_results: Vec<SearchResult>,
        error: Option<String>,
        calls: AtomicUsize,
    }

    impl MockSearchProvider {
        pub fn new() -> Self {
            Self {
                results: RwLock::new(HashMap::new()),
                default_results: Vec::new(),
                error: None,
                calls: AtomicUsize::new(0),
            }
        }

        /// Fixed results for one specific query string.
        pub fn with_results(self, query: impl Into<String>, results: Vec<SearchResult>) -> Self {
            self.results.write().unwrap().insert(query.into(), results);
            self
        }

        /// Results returned for any query without a specific fixture.
        pub fn with_default_results(mut self, results: Vec<SearchResult>) -> Self {
            self.default_results = results;
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Default for MockSearchProvider {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl SearchProvider for MockSearchProvider {
        async fn search(&self, query: &str) -> Result<Vec<SearchResult>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(ref error) = self.error {
                return Err(DomainError::provider("mock", error));
            }

            Ok(self
                .results
                .read()
                .unwrap()
                .get(query)
                .cloned()
                .unwrap_or_else(|| self.default_results.clone()))
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }
}
