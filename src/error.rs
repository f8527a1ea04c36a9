use thiserror::Error;

/// Errors surfaced by the search orchestrator.
///
/// Only two variants ever reach an HTTP caller: `InvalidArgument` (400) and
/// `StoreUnavailable` (500). Embedding-provider and similarity-procedure
/// failures are absorbed inside the orchestrator and downgrade the response's
/// `searchType` instead of erroring.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("record store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

/// Errors from the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("store data corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("store unreachable: {0}")]
    Unreachable(String),
}

/// A raw row could not be converted into a `StartupRecord`.
///
/// Conversion fails closed: rows missing the required identity fields are
/// rejected rather than silently producing empty-field records. Callers drop
/// such rows from results; conversion failure is never fatal to a request.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("row is not a JSON object")]
    NotAnObject,

    #[error("required field missing or empty: {0}")]
    MissingField(&'static str),
}
