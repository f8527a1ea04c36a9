pub mod convert;
pub mod json;

use crate::error::StoreError;
use crate::models::StartupRecord;

/// A row returned by the store's similarity procedure.
#[derive(Debug, Clone)]
pub struct SimilarityHit {
    pub record: StartupRecord,
    /// Cosine similarity in [0, 1], descending across a result set.
    pub similarity: f32,
}

/// The record store consumed by the search orchestrator.
///
/// The production implementation is [`json::JsonRecordStore`]; tests also use
/// failing stubs to exercise the hard-failure path. Text search order is
/// store-defined; similarity search is ordered descending by similarity.
pub trait RecordStore: Send + Sync {
    /// The full dataset, in store order.
    fn all(&self) -> Result<Vec<StartupRecord>, StoreError>;

    /// Case-insensitive substring match of `query` against company name,
    /// description, and CEO, intersected with any category/location filters.
    fn text_search(
        &self,
        query: &str,
        categories: &[String],
        locations: &[String],
        limit: usize,
    ) -> Result<Vec<StartupRecord>, StoreError>;

    /// Cosine-similarity ranked search given a query embedding and optional
    /// filters, best-first.
    fn vector_search(
        &self,
        embedding: &[f32],
        categories: &[String],
        locations: &[String],
        limit: usize,
    ) -> Result<Vec<SimilarityHit>, StoreError>;
}
