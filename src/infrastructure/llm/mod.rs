//! Generative service adapters

mod ollama;

pub use ollama::OllamaProvider;
