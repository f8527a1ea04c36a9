use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::models::StartupRecord;
use crate::state::AppState;

/// GET /startups - The full dataset, in store order. The dashboard feeds this
/// into `DashboardStore::load_data`.
pub async fn list_startups(
    State(state): State<AppState>,
) -> Result<Json<Vec<StartupRecord>>, (StatusCode, String)> {
    match state.store.all() {
        Ok(records) => Ok(Json(records)),
        Err(e) => {
            tracing::error!("Failed to load records: {e}");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

/// GET /health - Liveness probe.
pub async fn health() -> &'static str {
    "OK"
}
