//! App endpoints: browse listing, detail header, tabs and viewer.

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use std::sync::Arc;

use super::{error, parse_platform, resolve_app, success, ApiResult};
use crate::cache::ViewKey;
use crate::errors::AppError;
use crate::models::{AppDetail, CatalogPage, FlowsView, ScreensView, Video, ViewerState};
use crate::pipeline::catalog::{catalog_page, CatalogFilter};
use crate::pipeline::detail::{
    app_detail, flow_selection, flows_view, screen_type_selection, screens_view, viewer_state,
    ViewerRequest,
};
use crate::pipeline::partition::videos_for;
use crate::pipeline::viewer::Step;
use crate::AppState;

/// Browse page query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub flow_type: Option<String>,
    /// Case-insensitive match on name or description.
    pub q: Option<String>,
    /// 1-based load-more page; missing or unparsable means 1.
    pub page: Option<String>,
}

impl CatalogQuery {
    fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<usize>().ok())
            .unwrap_or(1)
    }
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub tab: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowsQuery {
    pub flow_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreensQuery {
    pub screen_type: Option<String>,
}

/// Viewer position as carried in the page URL.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerQuery {
    pub flow: Option<String>,
    pub screen_type: Option<String>,
    /// 1-based screen position.
    pub screen: Option<String>,
    /// `next` or `prev`; anything else is ignored.
    pub step: Option<String>,
}

/// GET /api/:platform/apps - Browse apps for a platform.
pub async fn list_apps(
    State(state): State<AppState>,
    Path(platform): Path<String>,
    Query(params): Query<CatalogQuery>,
) -> ApiResult<CatalogPage> {
    let catalog = state.store.snapshot().await;
    let revision_id = catalog.revision_id;

    let platform = match parse_platform(&platform) {
        Ok(platform) => platform,
        Err(e) => return error(e, revision_id),
    };

    let page = params.page();
    let filter = CatalogFilter {
        category: params.category,
        flow_type: params.flow_type,
        query: params.q,
    };

    success(
        catalog_page(
            &catalog.apps,
            platform,
            state.config.platform_rule,
            &filter,
            page,
            state.config.page_size,
        ),
        revision_id,
    )
}

/// GET /api/:platform/apps/:id - App header and tab selection.
pub async fn get_app(
    State(state): State<AppState>,
    Path((platform, id)): Path<(String, String)>,
    Query(params): Query<DetailQuery>,
) -> ApiResult<AppDetail> {
    let catalog = state.store.snapshot().await;
    let revision_id = catalog.revision_id;
    let rule = state.config.platform_rule;

    let (platform, app) = match resolve_app(&catalog, &platform, &id, rule) {
        Ok(found) => found,
        Err(e) => return error(e, revision_id),
    };

    match app_detail(app, platform, rule, params.tab.as_deref()) {
        Some(detail) => success(detail, revision_id),
        None => error(
            AppError::NotFound(format!("App {} has no {} screens", id, platform)),
            revision_id,
        ),
    }
}

/// GET /api/:platform/apps/:id/flows - Screens grouped by flow type.
pub async fn get_flows(
    State(state): State<AppState>,
    Path((platform, id)): Path<(String, String)>,
    Query(params): Query<FlowsQuery>,
) -> ApiResult<Arc<FlowsView>> {
    let catalog = state.store.snapshot().await;
    let revision_id = catalog.revision_id;
    let rule = state.config.platform_rule;

    let (platform, app) = match resolve_app(&catalog, &platform, &id, rule) {
        Ok(found) => found,
        Err(e) => return error(e, revision_id),
    };

    let selection = flow_selection(app, platform, rule, params.flow_type.as_deref());
    let key = ViewKey {
        revision_id,
        app_id: app.id.clone(),
        platform,
        selection: selection.clone(),
    };
    let view = state
        .flows
        .get_or_insert_with(key, || flows_view(app, platform, rule, &selection));

    success(view, revision_id)
}

/// GET /api/:platform/apps/:id/screens - Flat screen list filtered by screen type.
pub async fn get_screens(
    State(state): State<AppState>,
    Path((platform, id)): Path<(String, String)>,
    Query(params): Query<ScreensQuery>,
) -> ApiResult<Arc<ScreensView>> {
    let catalog = state.store.snapshot().await;
    let revision_id = catalog.revision_id;
    let rule = state.config.platform_rule;

    let (platform, app) = match resolve_app(&catalog, &platform, &id, rule) {
        Ok(found) => found,
        Err(e) => return error(e, revision_id),
    };

    let selection = screen_type_selection(app, platform, rule, params.screen_type.as_deref());
    let key = ViewKey {
        revision_id,
        app_id: app.id.clone(),
        platform,
        selection: selection.clone(),
    };
    let view = state
        .screens
        .get_or_insert_with(key, || screens_view(app, platform, rule, &selection));

    success(view, revision_id)
}

/// GET /api/:platform/apps/:id/videos - Videos for the platform.
pub async fn get_videos(
    State(state): State<AppState>,
    Path((platform, id)): Path<(String, String)>,
) -> ApiResult<Vec<Video>> {
    let catalog = state.store.snapshot().await;
    let revision_id = catalog.revision_id;

    match resolve_app(&catalog, &platform, &id, state.config.platform_rule) {
        Ok((platform, app)) => success(videos_for(&app.videos, platform), revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/:platform/apps/:id/viewer - Lightbox position and neighbours.
pub async fn get_viewer(
    State(state): State<AppState>,
    Path((platform, id)): Path<(String, String)>,
    Query(params): Query<ViewerQuery>,
) -> ApiResult<ViewerState> {
    let catalog = state.store.snapshot().await;
    let revision_id = catalog.revision_id;
    let rule = state.config.platform_rule;

    let (platform, app) = match resolve_app(&catalog, &platform, &id, rule) {
        Ok(found) => found,
        Err(e) => return error(e, revision_id),
    };

    let request = ViewerRequest {
        flow: params.flow.as_deref(),
        screen_type: params.screen_type.as_deref(),
        screen: params.screen.as_deref(),
        step: params.step.as_deref().and_then(Step::parse),
    };

    success(viewer_state(app, platform, rule, &request), revision_id)
}
