//! Ollama-compatible chat provider.
//!
//! Talks to the `/api/chat` endpoint of an Ollama-style server with
//! `stream: false`, so each call yields a single JSON object.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{DomainError, LlmProvider, LlmRequest, LlmResponse, Message, Usage};
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Ollama chat API provider
#[derive(Debug)]
pub struct OllamaProvider<C: HttpClientTrait> {
    client: C,
    base_url: String,
}

impl<C: HttpClientTrait> OllamaProvider<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_OLLAMA_BASE_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    fn build_request(&self, model: &str, request: &LlmRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": model,
            "messages": request.messages,
            "stream": false,
        });

        if let Some(temp) = request.temperature {
            body["options"] = serde_json::json!({ "temperature": temp });
        }

        if let Some(max_tokens) = request.max_tokens {
            body["options"]["num_predict"] = serde_json::json!(max_tokens);
        }

        body
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<LlmResponse, DomainError> {
        let response: OllamaChatResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("ollama", format!("Failed to parse response: {}", e))
        })?;

        let mut llm_response = LlmResponse::new(
            response.model,
            Message::assistant(response.message.content),
        );

        if response.prompt_eval_count.is_some() || response.eval_count.is_some() {
            llm_response = llm_response.with_usage(Usage::new(
                response.prompt_eval_count.unwrap_or(0),
                response.eval_count.unwrap_or(0),
            ));
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for OllamaProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let url = self.chat_url();
        let body = self.build_request(model, &request);

        let headers = vec![("Content-Type", "application/json")];
        let response = self.client.post_json(&url, headers, &body).await?;

        let parsed = self.parse_response(response)?;

        if let Some(ref usage) = parsed.usage {
            tracing::debug!(
                model = %parsed.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion finished"
            );
        }

        Ok(parsed)
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }
}

// Ollama API types

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    #[serde(default)]
    model: String,
    message: OllamaMessage,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    content: String,
}
