//! Debounced async driver connecting UI search input to the orchestrator.
//!
//! Keystrokes are settled over a quiet period before a search is issued, so
//! fast typing produces one request instead of a storm. Each issued search
//! carries the store's monotonic token; late responses for superseded
//! requests are dropped by the store.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::dashboard::store::DashboardStore;
use crate::error::SearchError;
use crate::models::SearchResponse;
use crate::search::orchestrator::{SearchOptions, SearchOrchestrator};

/// Default quiet period before a keystroke burst becomes a search request.
pub const DEBOUNCE_MS: u64 = 300;

/// The search capability the controller drives. Implemented by
/// [`SearchOrchestrator`] in-process; tests substitute stubs.
pub trait SearchBackend: Send + Sync {
    fn search(
        &self,
        query: &str,
        opts: &SearchOptions,
    ) -> impl Future<Output = Result<SearchResponse, SearchError>> + Send;
}

impl SearchBackend for SearchOrchestrator {
    async fn search(
        &self,
        query: &str,
        opts: &SearchOptions,
    ) -> Result<SearchResponse, SearchError> {
        SearchOrchestrator::search(self, query, opts).await
    }
}

/// Generation-counter debouncer: each input supersedes the previous one, and
/// only the input still current after the quiet period is released.
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    /// Wait out the quiet period; returns the input only if no newer input
    /// arrived meanwhile.
    pub async fn settle(&self, input: &str) -> Option<String> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        (self.generation.load(Ordering::SeqCst) == generation).then(|| input.to_string())
    }
}

pub struct SearchController<B: SearchBackend> {
    store: Arc<Mutex<DashboardStore>>,
    backend: B,
    debouncer: Debouncer,
    limit: usize,
}

impl<B: SearchBackend> SearchController<B> {
    pub fn new(store: Arc<Mutex<DashboardStore>>, backend: B, limit: usize) -> Self {
        Self {
            store,
            backend,
            debouncer: Debouncer::new(Duration::from_millis(DEBOUNCE_MS)),
            limit,
        }
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debouncer = Debouncer::new(delay);
        self
    }

    /// Handle one search-box keystroke. Superseded inputs are silently
    /// dropped; an empty settled value clears the search.
    pub async fn on_search_input(&self, text: &str) {
        let Some(settled) = self.debouncer.settle(text).await else {
            return;
        };
        let settled = settled.trim().to_string();

        if settled.is_empty() {
            self.store.lock().clear_search();
            return;
        }

        let (token, opts) = {
            let mut store = self.store.lock();
            let token = store.start_search(&settled);
            // Category/location filters ride along with the orchestrator call
            let opts = SearchOptions {
                categories: store.filter().categories.clone(),
                locations: store.filter().locations.clone(),
                limit: self.limit,
                force_vector: true,
            };
            (token, opts)
        };

        match self.backend.search(&settled, &opts).await {
            Ok(response) => self.store.lock().complete_search(token, response),
            Err(e) => {
                tracing::warn!("Search failed: {e}");
                self.store.lock().fail_search(token, e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::store::Mode;
    use crate::error::StoreError;
    use crate::models::{SearchResult, SearchType};
    use crate::test_support::record;

    struct StubBackend {
        fail: bool,
    }

    impl SearchBackend for StubBackend {
        async fn search(
            &self,
            query: &str,
            opts: &SearchOptions,
        ) -> Result<SearchResponse, SearchError> {
            if self.fail {
                return Err(SearchError::StoreUnavailable(StoreError::Unreachable(
                    "down".into(),
                )));
            }
            let data = vec![SearchResult::vector(record("hit", query), 0.9)];
            Ok(SearchResponse {
                success: true,
                count: data.len(),
                data,
                text_match_count: 0,
                vector_match_count: 1,
                search_type: SearchType::VectorOnly,
                query: format!("{query}:{}", opts.limit),
            })
        }
    }

    fn controller(fail: bool) -> SearchController<StubBackend> {
        let store = Arc::new(Mutex::new(DashboardStore::new()));
        store.lock().load_data(vec![record("seed", "Seed Co")]);
        SearchController::new(store, StubBackend { fail }, 50)
            .with_debounce(Duration::from_millis(50))
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounced_input_issues_search() {
        let ctrl = controller(false);
        ctrl.on_search_input("computer vision").await;

        let store = ctrl.store.lock();
        assert_eq!(store.mode(), Mode::VectorSearchActive);
        assert_eq!(store.displayed().len(), 1);
        assert_eq!(store.displayed()[0].record.id, "hit");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_keystrokes_collapse_to_last() {
        let ctrl = Arc::new(controller(false));

        let c1 = ctrl.clone();
        let first = tokio::spawn(async move { c1.on_search_input("comp").await });
        // Let the first settle start its sleep before superseding it
        tokio::time::sleep(Duration::from_millis(10)).await;
        let c2 = ctrl.clone();
        let second = tokio::spawn(async move { c2.on_search_input("computer vision").await });

        first.await.unwrap();
        second.await.unwrap();

        let store = ctrl.store.lock();
        // Only the final input produced a search
        assert_eq!(store.filter().search, "computer vision");
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input_clears_search() {
        let ctrl = controller(false);
        ctrl.on_search_input("vision").await;
        assert_eq!(ctrl.store.lock().mode(), Mode::VectorSearchActive);

        ctrl.on_search_input("").await;
        let store = ctrl.store.lock();
        assert_eq!(store.mode(), Mode::Idle);
        assert_eq!(store.displayed().len(), 1);
        assert_eq!(store.displayed()[0].record.id, "seed");
    }

    #[tokio::test(start_paused = true)]
    async fn test_backend_failure_exits_search_mode() {
        let ctrl = controller(true);
        ctrl.on_search_input("vision").await;

        let store = ctrl.store.lock();
        assert_eq!(store.mode(), Mode::Idle);
        assert!(store.error().is_some());
    }
}
