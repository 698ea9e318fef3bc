//! Domain layer - core types, provider abstractions and the response cache

pub mod cache;
pub mod error;
pub mod llm;
pub mod query;
pub mod search;

pub use cache::ResponseCache;
pub use error::DomainError;
pub use llm::{LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole, Usage};
pub use query::{Expansion, Query};
pub use search::{format_context, merge_results, SearchProvider, SearchResult};
