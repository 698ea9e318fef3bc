//! Web search adapters

mod serper;

pub use serper::{SerperProvider, RESULTS_PER_QUERY};
