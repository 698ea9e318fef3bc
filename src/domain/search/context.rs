//! Merging search results into a grounding context block.

use super::SearchResult;

/// Flatten per-sub-query result sets into one sequence and truncate.
///
/// Order is preserved both within each sub-query's results and across
/// sub-queries in the order they were issued; the cap applies across all
/// sub-queries, not per sub-query.
pub fn merge_results(result_sets: Vec<Vec<SearchResult>>, max_results: usize) -> Vec<SearchResult> {
    result_sets
        .into_iter()
        .flatten()
        .take(max_results)
        .collect()
}

/// Render merged results into the text block passed to the synthesizer.
///
/// Each result becomes a `Title / Snippet / Link` block; blocks are separated
/// by a blank line. No results render to an empty string, which is still a
/// valid (ungrounded) synthesis input.
pub fn format_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| {
            format!(
                "Title: {}\nSnippet: {}\nLink: {}",
                r.title, r.snippet, r.link
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
