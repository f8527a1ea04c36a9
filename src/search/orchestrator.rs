//! The hybrid search orchestrator.
//!
//! Runs the text branch, decides whether the vector branch is worth
//! attempting, and merges both into a single deduplicated response. The
//! embedding provider and the similarity procedure are optional enhancements:
//! when either fails the response degrades to `text-only` instead of erroring.

use std::sync::Arc;

use crate::config::EmbeddingConfig;
use crate::embedding;
use crate::error::SearchError;
use crate::models::{SearchResponse, SearchType};
use crate::search::merge::merge_results;
use crate::store::{RecordStore, SimilarityHit};

/// Attempt the vector branch whenever the text branch returned fewer results
/// than this.
pub const VECTOR_SEARCH_THRESHOLD: usize = 10;

/// Options for a single search invocation.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub categories: Vec<String>,
    pub locations: Vec<String>,
    pub limit: usize,
    /// Skip the text branch and go straight to vector search. Used by the
    /// dashboard's semantic search box.
    pub force_vector: bool,
}

pub struct SearchOrchestrator {
    store: Arc<dyn RecordStore>,
    client: reqwest::Client,
    embedding: EmbeddingConfig,
}

impl SearchOrchestrator {
    pub fn new(
        store: Arc<dyn RecordStore>,
        client: reqwest::Client,
        embedding: EmbeddingConfig,
    ) -> Self {
        Self {
            store,
            client,
            embedding,
        }
    }

    /// Run a hybrid search.
    ///
    /// Hard-fails only on an empty query (`InvalidArgument`) or a store
    /// failure (`StoreUnavailable`); everything else degrades softly.
    pub async fn search(
        &self,
        query: &str,
        opts: &SearchOptions,
    ) -> Result<SearchResponse, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidArgument(
                "search query must not be empty".to_string(),
            ));
        }

        // ── Text branch ──────────────────────────────────────────
        // Skipped under force_vector; revisited below as a fallback if the
        // vector branch degrades.
        let mut text_hits = if opts.force_vector {
            Vec::new()
        } else {
            self.store
                .text_search(query, &opts.categories, &opts.locations, opts.limit)?
        };

        // ── Vector branch decision ───────────────────────────────
        // Strictly sequential after the text branch: attempting it depends on
        // the text result count, and skipping it saves an embedding call.
        let attempt_vector = self.embedding.is_configured()
            && (opts.force_vector || text_hits.len() < VECTOR_SEARCH_THRESHOLD);

        // The vector branch counts as successful only when both the embedding
        // call and the similarity procedure went through.
        let mut vector_ok = false;
        let mut vector_hits: Vec<SimilarityHit> = Vec::new();

        if attempt_vector {
            match embedding::embed_query(&self.client, &self.embedding, query).await {
                Ok(query_embedding) => {
                    match self.store.vector_search(
                        &query_embedding,
                        &opts.categories,
                        &opts.locations,
                        opts.limit,
                    ) {
                        Ok(hits) => {
                            vector_ok = true;
                            vector_hits = hits;
                        }
                        Err(e) => {
                            tracing::warn!("Similarity search failed, degrading to text-only: {e}");
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Embedding failed, degrading to text-only: {e}");
                }
            }
        }

        // Fallback: a forced vector search whose vector branch degraded still
        // has to answer with something usable.
        if opts.force_vector && !vector_ok {
            text_hits =
                self.store
                    .text_search(query, &opts.categories, &opts.locations, opts.limit)?;
        }

        let search_type = if opts.force_vector && vector_ok {
            SearchType::VectorOnly
        } else if vector_ok && !text_hits.is_empty() {
            SearchType::Combined
        } else {
            SearchType::TextOnly
        };

        let merged = merge_results(text_hits, vector_hits, opts.limit);

        Ok(SearchResponse {
            success: true,
            count: merged.data.len(),
            data: merged.data,
            text_match_count: merged.text_count,
            vector_match_count: merged.vector_count,
            search_type,
            query: query.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::models::StartupRecord;
    use crate::test_support::record;

    /// Store stub with canned branch results.
    struct StubStore {
        text: Vec<StartupRecord>,
        vector: Vec<SimilarityHit>,
        fail_text: bool,
        fail_vector: bool,
    }

    impl StubStore {
        fn new(text: Vec<StartupRecord>, vector: Vec<SimilarityHit>) -> Self {
            Self {
                text,
                vector,
                fail_text: false,
                fail_vector: false,
            }
        }
    }

    impl RecordStore for StubStore {
        fn all(&self) -> Result<Vec<StartupRecord>, StoreError> {
            Ok(self.text.clone())
        }

        fn text_search(
            &self,
            _query: &str,
            _categories: &[String],
            _locations: &[String],
            limit: usize,
        ) -> Result<Vec<StartupRecord>, StoreError> {
            if self.fail_text {
                return Err(StoreError::Unreachable("connection refused".into()));
            }
            Ok(self.text.iter().take(limit).cloned().collect())
        }

        fn vector_search(
            &self,
            _embedding: &[f32],
            _categories: &[String],
            _locations: &[String],
            limit: usize,
        ) -> Result<Vec<SimilarityHit>, StoreError> {
            if self.fail_vector {
                return Err(StoreError::Unreachable("function does not exist".into()));
            }
            Ok(self.vector.iter().take(limit).cloned().collect())
        }
    }

    fn unconfigured() -> EmbeddingConfig {
        EmbeddingConfig {
            api_key: None,
            ..EmbeddingConfig::default()
        }
    }

    fn orchestrator(store: StubStore, embedding: EmbeddingConfig) -> SearchOrchestrator {
        SearchOrchestrator::new(Arc::new(store), reqwest::Client::new(), embedding)
    }

    fn opts(limit: usize) -> SearchOptions {
        SearchOptions {
            limit,
            ..SearchOptions::default()
        }
    }

    #[tokio::test]
    async fn test_empty_query_is_invalid_argument() {
        let orch = orchestrator(StubStore::new(vec![], vec![]), unconfigured());
        let err = orch.search("   ", &opts(10)).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_no_credential_means_text_only_without_embedding_call() {
        let orch = orchestrator(
            StubStore::new(vec![record("a", "Acme")], vec![]),
            unconfigured(),
        );
        let resp = orch.search("acme", &opts(10)).await.unwrap();
        assert_eq!(resp.search_type, SearchType::TextOnly);
        assert_eq!(resp.count, 1);
        assert_eq!(resp.text_match_count, 1);
        assert_eq!(resp.vector_match_count, 0);
    }

    #[tokio::test]
    async fn test_threshold_skips_vector_branch_when_text_is_plentiful() {
        // 10+ text hits and a *configured but unreachable* provider: the
        // threshold rule means the provider is never contacted, so the
        // response stays clean text-only.
        let text: Vec<_> = (0..12).map(|i| record(&format!("t{i}"), "T")).collect();
        let embedding = EmbeddingConfig {
            base_url: "http://127.0.0.1:1".to_string(), // nothing listens here
            api_key: Some("key".to_string()),
            ..EmbeddingConfig::default()
        };
        let orch = orchestrator(StubStore::new(text, vec![]), embedding);
        let resp = orch.search("t", &opts(50)).await.unwrap();
        assert_eq!(resp.search_type, SearchType::TextOnly);
        assert_eq!(resp.text_match_count, 12);
    }

    #[tokio::test]
    async fn test_embedding_failure_is_soft() {
        // Provider configured but unreachable; text branch is sparse so the
        // vector branch is attempted and fails softly.
        let embedding = EmbeddingConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: Some("key".to_string()),
            ..EmbeddingConfig::default()
        };
        let orch = orchestrator(
            StubStore::new(vec![record("a", "Acme")], vec![]),
            embedding,
        );
        let resp = orch.search("acme", &opts(10)).await.unwrap();
        assert_eq!(resp.search_type, SearchType::TextOnly);
        assert_eq!(resp.count, 1);
    }

    #[tokio::test]
    async fn test_force_vector_with_failed_embedding_falls_back_to_text() {
        let embedding = EmbeddingConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: Some("key".to_string()),
            ..EmbeddingConfig::default()
        };
        let orch = orchestrator(
            StubStore::new(vec![record("a", "Acme")], vec![]),
            embedding,
        );
        let resp = orch
            .search(
                "acme",
                &SearchOptions {
                    limit: 10,
                    force_vector: true,
                    ..SearchOptions::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(resp.search_type, SearchType::TextOnly);
        assert_eq!(resp.count, 1);
        assert_eq!(resp.data[0].record.id, "a");
    }

    async fn healthy_provider() -> (httpmock::MockServer, EmbeddingConfig) {
        let server = httpmock::MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST).path("/v1/embeddings");
                then.status(200).json_body(serde_json::json!({
                    "data": [ { "embedding": [1.0, 0.0, 0.0] } ]
                }));
            })
            .await;
        let config = EmbeddingConfig {
            base_url: server.base_url(),
            api_key: Some("key".to_string()),
            dimension: 3,
            ..EmbeddingConfig::default()
        };
        (server, config)
    }

    #[tokio::test]
    async fn test_similarity_failure_degrades_even_with_good_embedding() {
        let (_server, embedding) = healthy_provider().await;
        let mut store = StubStore::new(vec![record("a", "Acme")], vec![]);
        store.fail_vector = true;
        let orch = orchestrator(store, embedding);

        let resp = orch.search("acme", &opts(10)).await.unwrap();
        assert_eq!(resp.search_type, SearchType::TextOnly);
        assert_eq!(resp.count, 1);
        assert_eq!(resp.vector_match_count, 0);
    }

    #[tokio::test]
    async fn test_both_branches_succeeding_is_combined() {
        let (_server, embedding) = healthy_provider().await;
        let vector = vec![SimilarityHit {
            record: record("v", "Vector Hit"),
            similarity: 0.9,
        }];
        let orch = orchestrator(StubStore::new(vec![record("a", "Acme")], vector), embedding);

        let resp = orch.search("acme", &opts(10)).await.unwrap();
        assert_eq!(resp.search_type, SearchType::Combined);
        assert_eq!(resp.count, 2);
        assert_eq!(resp.text_match_count, 1);
        assert_eq!(resp.vector_match_count, 1);
    }

    #[tokio::test]
    async fn test_store_failure_is_hard() {
        let mut store = StubStore::new(vec![], vec![]);
        store.fail_text = true;
        let orch = orchestrator(store, unconfigured());
        let err = orch.search("acme", &opts(10)).await.unwrap_err();
        assert!(matches!(err, SearchError::StoreUnavailable(_)));
    }
}
