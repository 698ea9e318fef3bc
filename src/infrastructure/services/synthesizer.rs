//! Answer synthesis service.
//!
//! Turns a formatted search context plus the user's question into a final
//! answer via one chat completion. Unlike expansion, failures here are
//! terminal for the request and propagate to the caller.

use std::sync::Arc;

use crate::domain::{DomainError, LlmProvider, LlmRequest, Query};

const SYSTEM_PROMPT: &str = "You are a helpful research assistant. Answer the user's question \
using the provided web search context. Be concise and accurate. If the context does not contain \
enough information to answer confidently, say so rather than guessing. Summarize in your own \
words instead of pasting snippets verbatim.";

/// Produces the final answer from search context.
#[derive(Debug)]
pub struct AnswerSynthesizer {
    llm: Arc<dyn LlmProvider>,
    model: String,
}

impl AnswerSynthesizer {
    pub fn new(llm: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    /// Generate an answer to `query` grounded in `context`.
    pub async fn synthesize(&self, query: &Query, context: &str) -> Result<String, DomainError> {
        let user_prompt = format!(
            "Context:\n{context}\n\nQuestion: {query}\n\n\
             Answer the question using the context above. Where the context provides source \
             links, list the relevant ones at the end of your answer.",
            context = context,
            query = query.as_str(),
        );

        let request = LlmRequest::builder()
            .system(SYSTEM_PROMPT)
            .user(user_prompt)
            .build();

        let response = self.llm.chat(&self.model, request).await?;

        tracing::debug!(model = %self.model, "answer synthesized");

        Ok(response.content().to_string())
    }
}
