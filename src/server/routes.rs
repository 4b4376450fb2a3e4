use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::debug;

use super::error::ApiError;
use crate::catalog::CatalogStore;
use crate::model::ModRecord;

/// Query string of the search endpoint; a missing `q` matches everything.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Case-insensitive substring of the latest version name.
    #[serde(default)]
    pub q: Option<String>,
}

/// `GET /api/mods?q=` : catalog entries whose latest name contains `q`.
pub async fn search_handler(
    State(store): State<Arc<CatalogStore>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<ModRecord>> {
    let query = params.q.unwrap_or_default();
    let hits = store.search(&query);
    debug!(query = %query, hits = hits.len(), "search");
    Json(hits)
}

/// `GET /api/mods/{id}` : one record, or 404 when the id is unknown.
pub async fn lookup_handler(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<String>,
) -> Result<Json<ModRecord>, ApiError> {
    store.find_by_id(&id).map(Json).ok_or(ApiError::NotFound)
}
