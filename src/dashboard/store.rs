//! The dashboard state machine.
//!
//! Owns the notion of "vector search is active". While a search is active the
//! displayed list is exactly the last orchestrator response, and routine
//! category/location/year filter changes are blocked so they cannot half-apply
//! against a similarity-ranked list. Clearing the search text restores the
//! pre-search dataset as the filtering base.

use crate::dashboard::filter::{apply_filters, apply_year_range, compute_stats};
use crate::models::{DashboardStats, FilterSpec, SearchResponse, SearchResult, StartupRecord};

/// Whether a semantic search currently governs the displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    VectorSearchActive,
}

/// Partial filter update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct FilterPatch {
    pub categories: Option<Vec<String>>,
    pub locations: Option<Vec<String>>,
    pub year_from: Option<Option<i32>>,
    pub year_to: Option<Option<i32>>,
    pub sort_by: Option<crate::models::SortKey>,
}

#[derive(Debug, Default)]
pub struct DashboardStore {
    /// Current working dataset.
    all_records: Vec<SearchResult>,
    /// Snapshot preserved across a search; `Some` only while a search has
    /// taken over the display.
    original_records: Option<Vec<SearchResult>>,
    displayed: Vec<SearchResult>,
    filter: FilterSpec,
    mode: Mode,
    stats: DashboardStats,
    error: Option<String>,
    /// Monotonic token for in-flight searches; responses carrying a stale
    /// token are dropped instead of clobbering newer state.
    latest_token: u64,
}

impl DashboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn displayed(&self) -> &[SearchResult] {
        &self.displayed
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A fresh full-dataset load. In `Idle` it becomes the working set and is
    /// re-filtered; while a search is active it is parked as the snapshot so
    /// it never clobbers the displayed search results.
    pub fn load_data(&mut self, records: Vec<StartupRecord>) {
        let wrapped: Vec<SearchResult> = records.into_iter().map(SearchResult::plain).collect();
        match self.mode {
            Mode::Idle => {
                self.all_records = wrapped;
                self.original_records = None;
                self.refilter();
            }
            Mode::VectorSearchActive => {
                self.original_records = Some(wrapped);
            }
        }
    }

    /// Begin a semantic search: snapshot the working set (first search only),
    /// record the search text, and hand back the request token the response
    /// must present.
    pub fn start_search(&mut self, text: &str) -> u64 {
        if self.original_records.is_none() {
            self.original_records = Some(self.all_records.clone());
        }
        self.filter.search = text.to_string();
        self.mode = Mode::VectorSearchActive;
        self.latest_token += 1;
        self.latest_token
    }

    /// Apply an orchestrator response. Stale tokens are dropped.
    ///
    /// Only the year-range portion of the filter is applied here; category
    /// and location filters were already pushed into the orchestrator call.
    /// Stats are recomputed from the response data, not the working set.
    pub fn complete_search(&mut self, token: u64, response: SearchResponse) {
        if token != self.latest_token {
            tracing::debug!("Dropping stale search response (token {token})");
            return;
        }
        if self.mode != Mode::VectorSearchActive {
            return;
        }
        self.displayed =
            apply_year_range(response.data, self.filter.year_from, self.filter.year_to);
        self.stats = compute_stats(&self.displayed);
        self.error = None;
    }

    /// A search request failed hard. Exit search mode so the UI is not stuck
    /// displaying a mode with no valid results; the typed text stays in the
    /// filter and degrades to local substring filtering.
    pub fn fail_search(&mut self, token: u64, message: impl Into<String>) {
        if token != self.latest_token {
            return;
        }
        self.error = Some(message.into());
        self.mode = Mode::Idle;
        if let Some(original) = self.original_records.take() {
            self.all_records = original;
        }
        self.refilter();
    }

    /// Clear the search text and restore the pre-search dataset. Idempotent:
    /// calling it again in `Idle` with no snapshot is a no-op beyond the
    /// (already empty) refilter.
    pub fn clear_search(&mut self) {
        if self.mode == Mode::Idle && self.filter.search.is_empty() && self.original_records.is_none()
        {
            return;
        }
        if let Some(original) = self.original_records.take() {
            self.all_records = original;
        }
        self.filter.search.clear();
        self.mode = Mode::Idle;
        self.error = None;
        // Invalidate any in-flight search response
        self.latest_token += 1;
        self.refilter();
    }

    /// Routine filter changes. Blocked while a vector search is active — a
    /// deliberate invariant preventing a half-applied filter state.
    pub fn update_filters(&mut self, patch: FilterPatch) {
        if self.mode == Mode::VectorSearchActive {
            tracing::debug!("Ignoring filter change while vector search is active");
            return;
        }
        if let Some(categories) = patch.categories {
            self.filter.categories = categories;
        }
        if let Some(locations) = patch.locations {
            self.filter.locations = locations;
        }
        if let Some(year_from) = patch.year_from {
            self.filter.year_from = year_from;
        }
        if let Some(year_to) = patch.year_to {
            self.filter.year_to = year_to;
        }
        if let Some(sort_by) = patch.sort_by {
            self.filter.sort_by = sort_by;
        }
        self.refilter();
    }

    fn refilter(&mut self) {
        self.displayed = apply_filters(&self.all_records, &self.filter);
        self.stats = compute_stats(&self.displayed);
    }
}
