//! In-memory record store with JSON disk persistence.
//!
//! Holds the startup rows and a parallel vector table keyed by record id.
//! Substring search and the cosine-similarity procedure both run over the
//! in-memory tables; writes persist atomically via temp file + rename.

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::models::StartupRecord;
use crate::store::{RecordStore, SimilarityHit};

/// One row of the vector table.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VectorRow {
    id: String,
    embedding: Vec<f32>,
}

pub struct JsonRecordStore {
    records: RwLock<Vec<StartupRecord>>,
    vectors: RwLock<Vec<VectorRow>>,
    records_path: PathBuf,
    vectors_path: PathBuf,
}

impl JsonRecordStore {
    /// Open the store at `data_dir`, creating empty tables if none exist.
    pub fn open_or_create(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let records_path = data_dir.join("startups.json");
        let vectors_path = data_dir.join("vectors.json");

        let records = if records_path.exists() {
            let data =
                std::fs::read_to_string(&records_path).context("Failed to read record table")?;
            serde_json::from_str(&data).context("Record table is corrupt")?
        } else {
            Vec::new()
        };

        let vectors = if vectors_path.exists() {
            let data =
                std::fs::read_to_string(&vectors_path).context("Failed to read vector table")?;
            serde_json::from_str(&data).unwrap_or_default()
        } else {
            Vec::new()
        };

        Ok(Self {
            records: RwLock::new(records),
            vectors: RwLock::new(vectors),
            records_path,
            vectors_path,
        })
    }

    /// Replace the dataset wholesale. Embeddings are parallel with `records`;
    /// entries without one simply never match the vector branch.
    pub fn load(
        &self,
        records: Vec<StartupRecord>,
        embeddings: Vec<Option<Vec<f32>>>,
    ) -> Result<(), StoreError> {
        let vector_rows: Vec<VectorRow> = records
            .iter()
            .zip(embeddings)
            .filter_map(|(r, e)| {
                e.map(|embedding| VectorRow {
                    id: r.id.clone(),
                    embedding,
                })
            })
            .collect();

        {
            let mut table = self.records.write();
            *table = records;
            persist(&self.records_path, &*table)?;
        }
        {
            let mut table = self.vectors.write();
            *table = vector_rows;
            persist(&self.vectors_path, &*table)?;
        }
        Ok(())
    }

    pub fn record_count(&self) -> usize {
        self.records.read().len()
    }

    pub fn vector_count(&self) -> usize {
        self.vectors.read().len()
    }
}

/// Atomic-ish JSON persist via temp file + rename.
fn persist<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let data = serde_json::to_string(value)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, data)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

fn matches_filters(record: &StartupRecord, categories: &[String], locations: &[String]) -> bool {
    if !categories.is_empty()
        && !categories
            .iter()
            .any(|c| record.category.eq_ignore_ascii_case(c))
    {
        return false;
    }
    if !locations.is_empty() {
        let loc = record.location.to_lowercase();
        if !locations.iter().any(|l| loc.contains(&l.to_lowercase())) {
            return false;
        }
    }
    true
}

impl RecordStore for JsonRecordStore {
    fn all(&self) -> Result<Vec<StartupRecord>, StoreError> {
        Ok(self.records.read().clone())
    }

    fn text_search(
        &self,
        query: &str,
        categories: &[String],
        locations: &[String],
        limit: usize,
    ) -> Result<Vec<StartupRecord>, StoreError> {
        let needle = query.to_lowercase();
        let records = self.records.read();

        Ok(records
            .iter()
            .filter(|r| matches_filters(r, categories, locations))
            .filter(|r| {
                r.company_name.to_lowercase().contains(&needle)
                    || r.description.to_lowercase().contains(&needle)
                    || r.ceo.to_lowercase().contains(&needle)
            })
            .take(limit)
            .cloned()
            .collect())
    }

    fn vector_search(
        &self,
        embedding: &[f32],
        categories: &[String],
        locations: &[String],
        limit: usize,
    ) -> Result<Vec<SimilarityHit>, StoreError> {
        let records = self.records.read();
        let by_id: HashMap<&str, &StartupRecord> =
            records.iter().map(|r| (r.id.as_str(), r)).collect();

        let vectors = self.vectors.read();
        let mut scored: Vec<(f32, &StartupRecord)> = vectors
            .iter()
            .filter_map(|row| by_id.get(row.id.as_str()).map(|r| (row, *r)))
            .filter(|(_, r)| matches_filters(r, categories, locations))
            .map(|(row, r)| (cosine_similarity(embedding, &row.embedding), r))
            .collect();

        // Sort descending by similarity
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);

        Ok(scored
            .into_iter()
            .map(|(score, r)| SimilarityHit {
                record: r.clone(),
                // Clamp so the wire contract stays within [0, 1] even for
                // unnormalized embeddings.
                similarity: score.max(0.0),
            })
            .collect())
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for i in 0..a.len() {
        dot += a[i] * b[i];
        norm_a += a[i] * a[i];
        norm_b += b[i] * b[i];
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}
