use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::SearchError;
use crate::models::{split_csv, SearchParams, SearchResponse};
use crate::search::orchestrator::SearchOptions;
use crate::state::AppState;

/// GET /search - Hybrid text + vector search.
///
/// 400 on an empty/missing `q`; 500 only when the record store itself is
/// unreachable. Embedding-provider outages degrade the response's
/// `searchType` instead of failing the request.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let opts = SearchOptions {
        categories: split_csv(params.categories.as_deref()),
        locations: split_csv(params.locations.as_deref()),
        limit: params.limit,
        force_vector: params.force_vector,
    };

    match state.orchestrator.search(&params.q, &opts).await {
        Ok(response) => {
            tracing::info!(
                query = %response.query,
                search_type = ?response.search_type,
                count = response.count,
                "Search completed"
            );
            Ok(Json(response))
        }
        Err(e @ SearchError::InvalidArgument(_)) => Err((StatusCode::BAD_REQUEST, e.to_string())),
        Err(e @ SearchError::StoreUnavailable(_)) => {
            tracing::error!("Search failed: {e}");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
