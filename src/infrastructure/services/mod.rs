//! Application services built on top of the provider traits.

mod answer_service;
mod query_expander;
mod synthesizer;

pub use answer_service::{AnswerService, DEFAULT_MAX_CONTEXT_RESULTS};
pub use query_expander::{QueryExpander, DEFAULT_EXPANSION_COUNT, DEFAULT_EXPANSION_TIMEOUT};
pub use synthesizer::AnswerSynthesizer;
