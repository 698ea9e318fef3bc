//! Query answering pipeline.
//!
//! Orchestrates the full flow for one question: cache lookup, query
//! expansion, concurrent web search, context assembly, answer synthesis,
//! and cache write-back.

use std::sync::Arc;

use futures::future::try_join_all;

use crate::domain::{
    format_context, merge_results, DomainError, Query, ResponseCache, SearchProvider,
};
use crate::infrastructure::services::{AnswerSynthesizer, QueryExpander};

/// Default cap on merged results kept for the synthesis context.
pub const DEFAULT_MAX_CONTEXT_RESULTS: usize = 5;

/// End-to-end query answering service.
#[derive(Debug)]
pub struct AnswerService {
    cache: Arc<ResponseCache>,
    expander: QueryExpander,
    searcher: Arc<dyn SearchProvider>,
    synthesizer: AnswerSynthesizer,
    max_context_results: usize,
}

impl AnswerService {
    pub fn new(
        cache: Arc<ResponseCache>,
        expander: QueryExpander,
        searcher: Arc<dyn SearchProvider>,
        synthesizer: AnswerSynthesizer,
    ) -> Self {
        Self {
            cache,
            expander,
            searcher,
            synthesizer,
            max_context_results: DEFAULT_MAX_CONTEXT_RESULTS,
        }
    }

    pub fn with_max_context_results(mut self, max_context_results: usize) -> Self {
        self.max_context_results = max_context_results;
        self
    }

    /// Answer one user query.
    ///
    /// Validation failures surface as `DomainError::Validation`; any upstream
    /// failure past the cache-hit path fails the whole request. Only
    /// successfully synthesized answers are cached.
    pub async fn answer(&self, raw_query: &str) -> Result<String, DomainError> {
        let query = Query::parse(raw_query)?;

        if let Some(cached) = self.cache.get(query.as_str()).await {
            tracing::info!("cache hit, skipping pipeline");
            return Ok(cached);
        }

        let expansion = self.expander.expand(&query).await;

        if expansion.is_fallback() {
            tracing::warn!("searching with unexpanded query");
        }

        let searches = expansion
            .queries()
            .iter()
            .map(|sub_query| self.searcher.search(sub_query));
        let result_sets = try_join_all(searches).await?;

        let merged = merge_results(result_sets, self.max_context_results);
        tracing::info!(
            sub_queries = expansion.queries().len(),
            results = merged.len(),
            "search phase complete"
        );

        let context = format_context(&merged);
        let answer = self.synthesizer.synthesize(&query, &context).await?;

        self.cache.put(query.as_str(), &answer).await;

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::mock::MockLlmProvider;
    use crate::domain::search::mock::MockSearchProvider;
    use crate::domain::SearchResult;

    fn result(n: usize) -> SearchResult {
        SearchResult::new(
            format!("Title {n}"),
            format!("Snippet {n}"),
            format!("https://example.com/{n}"),
        )
    }

    struct Fixture {
        expander_llm: Arc<MockLlmProvider>,
        synth_llm: Arc<MockLlmProvider>,
        searcher: Arc<MockSearchProvider>,
        service: AnswerService,
    }

    fn fixture(
        expander_llm: MockLlmProvider,
        synth_llm: MockLlmProvider,
        searcher: MockSearchProvider,
    ) -> Fixture {
        let expander_llm = Arc::new(expander_llm);
        let synth_llm = Arc::new(synth_llm);
        let searcher = Arc::new(searcher);

        let service = AnswerService::new(
            Arc::new(ResponseCache::default()),
            QueryExpander::new(expander_llm.clone(), "test-model"),
            searcher.clone(),
            AnswerSynthesizer::new(synth_llm.clone(), "test-model"),
        );

        Fixture {
            expander_llm,
            synth_llm,
            searcher,
            service,
        }
    }

    #[tokio::test]
    async fn test_full_pipeline_with_expansion() {
        let f = fixture(
            MockLlmProvider::new("expander").with_content(r#"["q1", "q2"]"#),
            MockLlmProvider::new("synth").with_content("The final answer."),
            MockSearchProvider::new()
                .with_results("q1", vec![result(1)])
                .with_results("q2", vec![result(2)]),
        );

        let answer = f.service.answer("what is the answer").await.unwrap();

        assert_eq!(answer, "The final answer.");
        assert_eq!(f.expander_llm.calls(), 1);
        assert_eq!(f.searcher.calls(), 2);
        assert_eq!(f.synth_llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_cache_hit_short_circuits_pipeline() {
        let f = fixture(
            MockLlmProvider::new("expander").with_content(r#"["q1"]"#),
            MockLlmProvider::new("synth").with_content("Computed once."),
            MockSearchProvider::new().with_default_results(vec![result(1)]),
        );

        let first = f.service.answer("Repeat Question").await.unwrap();
        // Same query up to trim/case, so the second call must come from cache.
        let second = f.service.answer("  repeat question  ").await.unwrap();

        assert_eq!(first, "Computed once.");
        assert_eq!(second, "Computed once.");
        assert_eq!(f.expander_llm.calls(), 1);
        assert_eq!(f.searcher.calls(), 1);
        assert_eq!(f.synth_llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_expansion_failure_degrades_to_single_search() {
        let f = fixture(
            MockLlmProvider::new("expander").with_error("expansion model down"),
            MockLlmProvider::new("synth").with_content("Answered anyway."),
            MockSearchProvider::new().with_default_results(vec![result(1)]),
        );

        let answer = f.service.answer("resilient question").await.unwrap();

        assert_eq!(answer, "Answered anyway.");
        // One search with the original query, nothing more.
        assert_eq!(f.searcher.calls(), 1);
        assert_eq!(f.synth_llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_search_failure_fails_request_and_skips_cache() {
        let f = fixture(
            MockLlmProvider::new("expander").with_content(r#"["q1", "q2"]"#),
            MockLlmProvider::new("synth").with_content("unreachable"),
            MockSearchProvider::new().with_error("search provider down"),
        );

        assert!(f.service.answer("doomed question").await.is_err());
        assert_eq!(f.synth_llm.calls(), 0);

        // Nothing cached: a retry goes through the whole pipeline again.
        assert!(f.service.answer("doomed question").await.is_err());
    }

    #[tokio::test]
    async fn test_synthesis_failure_fails_request_and_skips_cache() {
        let f = fixture(
            MockLlmProvider::new("expander").with_content(r#"["q1"]"#),
            MockLlmProvider::new("synth").with_error("synthesis model down"),
            MockSearchProvider::new().with_default_results(vec![result(1)]),
        );

        assert!(f.service.answer("doomed question").await.is_err());

        let retries = f.service.answer("doomed question").await;
        assert!(retries.is_err());
        assert_eq!(f.synth_llm.calls(), 2);
    }

    #[tokio::test]
    async fn test_validation_rejects_before_any_upstream_call() {
        let f = fixture(
            MockLlmProvider::new("expander").with_content(r#"["q1"]"#),
            MockLlmProvider::new("synth").with_content("unused"),
            MockSearchProvider::new(),
        );

        assert!(f.service.answer("   ").await.is_err());
        assert!(f.service.answer(&"x".repeat(2001)).await.is_err());

        assert_eq!(f.expander_llm.calls(), 0);
        assert_eq!(f.searcher.calls(), 0);
        assert_eq!(f.synth_llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_merged_context_is_capped() {
        // Two sub-queries with three results each; only five reach synthesis.
        let f = fixture(
            MockLlmProvider::new("expander").with_content(r#"["q1", "q2"]"#),
            MockLlmProvider::new("synth").with_content("capped"),
            MockSearchProvider::new()
                .with_results("q1", vec![result(1), result(2), result(3)])
                .with_results("q2", vec![result(4), result(5), result(6)]),
        );

        let answer = f.service.answer("broad question").await.unwrap();
        assert_eq!(answer, "capped");
        assert_eq!(f.searcher.calls(), 2);
    }
}
