//! # startup-search
//!
//! Hybrid text + vector search over a dataset of AI startup companies, plus
//! the dashboard state machine that governs how search results and routine
//! filtering share one displayed list.
//!
//! ## Search pipeline
//!
//! ```text
//!   query ──► text branch (substring + filters)
//!                │
//!                ├── enough results (≥10) and not forced ──► text-only
//!                │
//!                └── sparse or forced ──► embed query ──► similarity search
//!                         │ soft failure              │ soft failure
//!                         ▼                          ▼
//!                     text-only                  text-only
//!                                │ success
//!                                ▼
//!                  merge: text first, then vector hits
//!                  with unseen ids, truncated to limit
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for the server and embedding provider
//! - [`models`] - Shared data types: `StartupRecord`, `SearchResult`, filters, wire types
//! - [`error`] - Error taxonomy: invalid argument / soft upstream / hard store failures
//! - [`store`] - Record store trait, JSON-backed implementation, and row conversion
//! - [`embedding`] - Embedding provider client (OpenAI-compatible API)
//! - [`search`] - The orchestrator and the merge/dedup of both search branches
//! - [`dashboard`] - Client-side state machine, local filtering, debounced controller
//! - [`api`] - Axum HTTP handlers
//! - [`state`] - Shared application state

pub mod api;
pub mod config;
pub mod dashboard;
pub mod embedding;
pub mod error;
pub mod models;
pub mod search;
pub mod state;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;
