//! Catalog-level endpoints: revision, cache statistics and reload.

use axum::extract::State;
use serde::Serialize;

use super::{error, success, ApiResult};
use crate::cache::CacheStats;
use crate::models::RevisionInfo;
use crate::AppState;

/// Hit/miss counters for the memoized detail views.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheReport {
    pub flows: CacheStats,
    pub screens: CacheStats,
}

/// GET /api/catalog/revision - Current catalog revision.
pub async fn get_revision(State(state): State<AppState>) -> ApiResult<RevisionInfo> {
    let info = state.store.revision_info().await;
    let revision_id = info.revision_id;
    success(info, revision_id)
}

/// GET /api/catalog/cache - View cache statistics.
pub async fn get_cache_stats(State(state): State<AppState>) -> ApiResult<CacheReport> {
    let revision_id = state.store.revision_info().await.revision_id;
    success(
        CacheReport {
            flows: state.flows.stats(),
            screens: state.screens.stats(),
        },
        revision_id,
    )
}

/// POST /api/catalog/reload - Re-read the snapshot and drop memoized views.
pub async fn reload_catalog(State(state): State<AppState>) -> ApiResult<RevisionInfo> {
    match state.store.reload().await {
        Ok(info) => {
            state.flows.invalidate();
            state.screens.invalidate();
            let revision_id = info.revision_id;
            success(info, revision_id)
        }
        Err(e) => {
            let revision_id = state.store.revision_info().await.revision_id;
            error(e, revision_id)
        }
    }
}
