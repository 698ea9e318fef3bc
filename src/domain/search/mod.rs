//! Web search results, the provider abstraction and context assembly.

mod context;
mod provider;
mod result;

pub use context::{format_context, merge_results};
pub use provider::SearchProvider;
pub use result::SearchResult;

#[cfg(test)]
pub use provider::mock;
