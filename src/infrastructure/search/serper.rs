//! Serper web search adapter.
//!
//! Posts the raw query to the provider's search endpoint and projects the
//! `organic` result list onto the domain's `SearchResult`. Upstream failures
//! are not absorbed here.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{DomainError, SearchProvider, SearchResult};
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_SERPER_BASE_URL: &str = "https://google.serper.dev";

/// How many provider results to keep per search call.
pub const RESULTS_PER_QUERY: usize = 3;

/// Serper search API provider
#[derive(Debug)]
pub struct SerperProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
    max_results: usize,
}

impl<C: HttpClientTrait> SerperProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_SERPER_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_results: RESULTS_PER_QUERY,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

#[async_trait]
impl<C: HttpClientTrait> SearchProvider for SerperProvider<C> {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, DomainError> {
        tracing::debug!(query = %query, "querying search provider");

        let body = serde_json::json!({ "q": query });
        let headers = vec![
            ("X-API-KEY", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ];

        let json = self.client.post_json(&self.search_url(), headers, &body).await?;

        let response: SerperResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("serper", format!("Failed to parse response: {}", e))
        })?;

        let results: Vec<SearchResult> = response
            .organic
            .into_iter()
            .take(self.max_results)
            .map(|r| SearchResult::new(r.title, r.snippet, r.link))
            .collect();

        tracing::debug!(query = %query, count = results.len(), "search results retrieved");

        Ok(results)
    }

    fn provider_name(&self) -> &'static str {
        "serper"
    }
}

// Serper API types. Fields are lenient: a result missing a snippet or the
// whole organic list being absent both map to empty values, not errors.

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperOrganicResult>,
}

#[derive(Debug, Deserialize)]
struct SerperOrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    const TEST_URL: &str = "https://google.serper.dev/search";

    fn organic_entry(n: usize) -> serde_json::Value {
        serde_json::json!({
            "title": format!("Result {n}"),
            "snippet": format!("Snippet {n}"),
            "link": format!("https://example.com/{n}"),
            "position": n
        })
    }

    #[tokio::test]
    async fn test_search_takes_first_three_in_provider_order() {
        let mock_response = serde_json::json!({
            "organic": [organic_entry(1), organic_entry(2), organic_entry(3), organic_entry(4)]
        });

        let client = MockHttpClient::new().with_response(TEST_URL, mock_response);
        let provider = SerperProvider::new(client, "test-key");

        let results = provider.search("rust async runtimes").await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "Result 1");
        assert_eq!(results[2].link, "https://example.com/3");
    }

    #[tokio::test]
    async fn test_search_missing_organic_is_empty() {
        let client = MockHttpClient::new()
            .with_response(TEST_URL, serde_json::json!({ "searchParameters": {} }));
        let provider = SerperProvider::new(client, "test-key");

        let results = provider.search("anything").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_tolerates_missing_fields() {
        let mock_response = serde_json::json!({
            "organic": [{ "title": "Only a title" }]
        });

        let client = MockHttpClient::new().with_response(TEST_URL, mock_response);
        let provider = SerperProvider::new(client, "test-key");

        let results = provider.search("q").await.unwrap();
        assert_eq!(results[0].title, "Only a title");
        assert_eq!(results[0].snippet, "");
        assert_eq!(results[0].link, "");
    }

    #[tokio::test]
    async fn test_search_error_propagates() {
        let client = MockHttpClient::new().with_error(TEST_URL, "HTTP 429: quota exceeded");
        let provider = SerperProvider::new(client, "test-key");

        let result = provider.search("q").await;
        assert!(result.is_err());
    }
}
