//! Query answering endpoint handler

use axum::extract::State;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, QueryRequest, QueryResponse};
use crate::domain::DomainError;

/// POST /query
pub async fn answer_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        query_len = request.query.len(),
        "Processing query request"
    );

    let response = state
        .answer_service
        .answer(&request.query)
        .await
        .map_err(|err| {
            // The client only sees the opaque message for non-validation
            // failures, so the real cause has to be logged here.
            if !matches!(err, DomainError::Validation { .. }) {
                error!(request_id = %request_id, error = %err, "Query pipeline failed");
            }
            ApiError::from(err)
        })?;

    info!(request_id = %request_id, "Query answered");

    Ok(Json(QueryResponse { response }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;

    use super::*;
    use crate::domain::llm::mock::MockLlmProvider;
    use crate::domain::search::mock::MockSearchProvider;
    use crate::domain::{ResponseCache, SearchResult};
    use crate::infrastructure::services::{AnswerService, AnswerSynthesizer, QueryExpander};

    fn state(expander: MockLlmProvider, synth: MockLlmProvider, searcher: MockSearchProvider) -> AppState {
        let service = AnswerService::new(
            Arc::new(ResponseCache::default()),
            QueryExpander::new(Arc::new(expander), "test-model"),
            Arc::new(searcher),
            AnswerSynthesizer::new(Arc::new(synth), "test-model"),
        );
        AppState::new(Arc::new(service))
    }

    #[tokio::test]
    async fn test_answer_query_success() {
        let state = state(
            MockLlmProvider::new("expander").with_content(r#"["q1"]"#),
            MockLlmProvider::new("synth").with_content("The answer."),
            MockSearchProvider::new().with_default_results(vec![SearchResult::new(
                "T", "S", "https://example.com",
            )]),
        );

        let result = answer_query(
            State(state),
            Json(QueryRequest {
                query: "a question".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(result.0.response, "The answer.");
    }

    #[tokio::test]
    async fn test_answer_query_empty_is_bad_request() {
        let state = state(
            MockLlmProvider::new("expander"),
            MockLlmProvider::new("synth"),
            MockSearchProvider::new(),
        );

        let err = answer_query(
            State(state),
            Json(QueryRequest {
                query: "   ".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.message, "No query");
    }

    #[tokio::test]
    async fn test_answer_query_upstream_failure_is_opaque_500() {
        let state = state(
            MockLlmProvider::new("expander").with_content(r#"["q1"]"#),
            MockLlmProvider::new("synth").with_content("unused"),
            MockSearchProvider::new().with_error("search quota exceeded"),
        );

        let err = answer_query(
            State(state),
            Json(QueryRequest {
                query: "a question".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.response.error.message, "Failed");
    }
}
