use std::fmt::Debug;

use async_trait::async_trait;

use super::{LlmRequest, LlmResponse};
use crate::domain::DomainError;

/// Trait for generative chat providers.
///
/// Both query expansion and answer synthesis go through this trait against
/// the same logical endpoint, with different prompts.
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a non-streaming chat completion request
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
