//! Client for the external embedding provider (OpenAI-compatible API).
//!
//! Every failure here is a soft failure from the orchestrator's point of
//! view: callers log the error and continue with text-only results.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::EmbeddingConfig;

/// Maximum characters to send per query to the embedding API. Search queries
/// are short, but nothing stops a caller from pasting a whole paragraph into
/// the search box; the provider rejects over-length inputs with a 400, so we
/// truncate defensively on a UTF-8 char boundary.
const MAX_EMBED_CHARS: usize = 3_000;

fn truncate_for_embedding(text: &str) -> &str {
    if text.len() <= MAX_EMBED_CHARS {
        return text;
    }
    // Find the last char boundary at or before the limit
    let mut end = MAX_EMBED_CHARS;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[derive(Serialize)]
struct EmbedRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

/// Turn a search query into a fixed-length embedding vector.
pub async fn embed_query(
    client: &reqwest::Client,
    config: &EmbeddingConfig,
    text: &str,
) -> Result<Vec<f32>> {
    let url = format!("{}/v1/embeddings", config.base_url);
    let api_key = config.api_key.as_deref().unwrap_or_default();

    let req = EmbedRequest {
        model: config.model.clone(),
        input: vec![truncate_for_embedding(text).to_string()],
    };

    let resp = client
        .post(&url)
        .header("Authorization", format!("Bearer {api_key}"))
        .json(&req)
        .send()
        .await
        .context("Failed to call embedding API")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("Embedding API returned {status}: {body}");
    }

    let body: EmbedResponse = resp
        .json()
        .await
        .context("Failed to parse embedding response")?;

    let embedding = body
        .data
        .into_iter()
        .next()
        .map(|d| d.embedding)
        .context("No embedding returned")?;

    if config.dimension != 0 && embedding.len() != config.dimension {
        anyhow::bail!(
            "Embedding dimension mismatch: expected {}, got {}",
            config.dimension,
            embedding.len()
        );
    }

    Ok(embedding)
}
