//! Merging of the text and vector search branches.

use std::collections::HashSet;

use crate::models::{SearchResult, StartupRecord};
use crate::store::SimilarityHit;

/// Outcome of merging both branches.
pub struct MergedResults {
    /// Text results first, then vector results with new ids, truncated.
    pub data: Vec<SearchResult>,
    /// Text branch size before truncation.
    pub text_count: usize,
    /// Vector branch size before truncation, excluding ids already present
    /// in the text branch.
    pub vector_count: usize,
}

/// Concatenate text results with vector results whose ids are not already
/// present, preserving each branch's internal order, truncated to `limit`.
pub fn merge_results(
    text_hits: Vec<StartupRecord>,
    vector_hits: Vec<SimilarityHit>,
    limit: usize,
) -> MergedResults {
    let seen: HashSet<String> = text_hits.iter().map(|r| r.id.clone()).collect();

    let text_count = text_hits.len();
    let mut data: Vec<SearchResult> = text_hits.into_iter().map(SearchResult::text).collect();

    let fresh: Vec<SearchResult> = vector_hits
        .into_iter()
        .filter(|h| !seen.contains(&h.record.id))
        .map(|h| SearchResult::vector(h.record, h.similarity))
        .collect();
    let vector_count = fresh.len();

    data.extend(fresh);
    data.truncate(limit);

    MergedResults {
        data,
        text_count,
        vector_count,
    }
}
