//! Validated user queries and the expansion result type.

use crate::domain::DomainError;

/// A validated user query.
///
/// Construction enforces the inbound contract: non-empty after trimming,
/// at most [`Query::MAX_LENGTH`] characters. Anything that holds a `Query`
/// can assume both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Maximum accepted query length in characters.
    pub const MAX_LENGTH: usize = 2000;

    /// Validate a raw input string into a `Query`.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.trim().is_empty() {
            return Err(DomainError::validation("No query"));
        }

        if raw.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::validation(format!(
                "Query too long (max {} chars)",
                Self::MAX_LENGTH
            )));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of query expansion.
///
/// Expansion never fails outright; when the upstream call errors, times out
/// or produces nothing usable, the original query is carried through as a
/// `Fallback`. The two variants let callers and tests distinguish the path
/// taken without inspecting logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// Upstream produced a usable set of alternative search queries.
    Expanded(Vec<String>),
    /// Expansion degraded; the set is exactly `[original query]`.
    Fallback(Vec<String>),
}

impl Expansion {
    pub fn expanded(queries: Vec<String>) -> Self {
        debug_assert!(!queries.is_empty());
        Self::Expanded(queries)
    }

    pub fn fallback(query: impl Into<String>) -> Self {
        Self::Fallback(vec![query.into()])
    }

    /// The search queries to fan out. Guaranteed non-empty.
    pub fn queries(&self) -> &[String] {
        match self {
            Self::Expanded(queries) | Self::Fallback(queries) => queries,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}
