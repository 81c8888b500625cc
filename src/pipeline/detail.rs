//! App detail page views: header, flows tab, screens tab and the lightbox viewer.

use crate::models::{
    App, AppDetail, FlowsView, Platform, PlatformRule, ScreensView, Tab, ViewerState,
};

use super::grouping::{
    available_flow_types, available_screen_types, filter_by_screen_type, flow_screens,
    group_by_flow, Selection,
};
use super::partition::{partition, platform_names, videos_for};
use super::viewer::{Step, ViewerCursor};

/// Which tab to show: a requested tab wins unless it is `flows` with nothing to show.
pub fn resolve_tab(requested: Option<&str>, has_flows: bool) -> Tab {
    match requested.and_then(Tab::parse) {
        Some(Tab::Flows) | None if has_flows => Tab::Flows,
        Some(Tab::Flows) | None => Tab::Screens,
        Some(tab) => tab,
    }
}

/// Header and selector lists. `None` when the app has no screens on `platform`.
pub fn app_detail(
    app: &App,
    platform: Platform,
    rule: PlatformRule,
    requested_tab: Option<&str>,
) -> Option<AppDetail> {
    let screens = partition(&app.screens, platform, rule);
    if screens.is_empty() {
        return None;
    }

    let flow_types = available_flow_types(&screens, &app.flow_types);
    let has_flows = !flow_types.is_empty();

    Some(AppDetail {
        id: app.id.clone(),
        name: app.name.clone(),
        category: app.category.clone(),
        description: app.description.clone(),
        logo_url: app.logo_url.clone(),
        updated_at: app.updated_at.clone(),
        platform,
        tab: resolve_tab(requested_tab, has_flows),
        has_flows,
        platform_names: platform_names(&screens, platform),
        screen_count: screens.len(),
        video_count: videos_for(&app.videos, platform).len(),
        flow_types,
        screen_types: available_screen_types(&screens, &app.screen_types),
    })
}

/// Resolve a requested flow type against the flows shown on `platform`.
///
/// A flow that only exists on the other platform falls back to `All`.
pub fn flow_selection(
    app: &App,
    platform: Platform,
    rule: PlatformRule,
    requested: Option<&str>,
) -> Selection {
    let screens = partition(&app.screens, platform, rule);
    Selection::for_flow(requested, &available_flow_types(&screens, &app.flow_types))
}

/// Resolve a requested screen type against the types shown on `platform`.
pub fn screen_type_selection(
    app: &App,
    platform: Platform,
    rule: PlatformRule,
    requested: Option<&str>,
) -> Selection {
    let screens = partition(&app.screens, platform, rule);
    Selection::for_screen_type(requested, &available_screen_types(&screens, &app.screen_types))
}

pub fn flows_view(
    app: &App,
    platform: Platform,
    rule: PlatformRule,
    filter: &Selection,
) -> FlowsView {
    let screens = partition(&app.screens, platform, rule);
    FlowsView {
        selected: filter.selected().map(str::to_string),
        flow_types: available_flow_types(&screens, &app.flow_types),
        groups: group_by_flow(&screens, &app.flow_types, filter),
    }
}

pub fn screens_view(
    app: &App,
    platform: Platform,
    rule: PlatformRule,
    filter: &Selection,
) -> ScreensView {
    let screens = partition(&app.screens, platform, rule);
    ScreensView {
        selected: filter.selected().map(str::to_string),
        screen_types: available_screen_types(&screens, &app.screen_types),
        screens: filter_by_screen_type(&screens, filter),
    }
}

/// Viewer position request, as carried in the page URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewerRequest<'a> {
    /// Flow being viewed; without it the viewer walks the screens tab.
    pub flow: Option<&'a str>,
    pub screen_type: Option<&'a str>,
    /// 1-based position.
    pub screen: Option<&'a str>,
    pub step: Option<Step>,
}

pub fn viewer_state(
    app: &App,
    platform: Platform,
    rule: PlatformRule,
    request: &ViewerRequest<'_>,
) -> ViewerState {
    let screens = partition(&app.screens, platform, rule);
    let flow = request.flow.map(str::trim).filter(|f| !f.is_empty());

    let sequence = match flow {
        Some(name) => flow_screens(&screens, name),
        None => {
            let scoped_types = available_screen_types(&screens, &app.screen_types);
            let filter = Selection::for_screen_type(request.screen_type, &scoped_types);
            filter_by_screen_type(&screens, &filter)
        }
    };

    let mut cursor = ViewerCursor::from_param(sequence.len(), request.screen);
    if let Some(step) = request.step {
        cursor.step(step);
    }

    ViewerState {
        flow: flow
            .filter(|_| cursor.is_open())
            .map(str::to_string),
        index: cursor.index(),
        total: cursor.len(),
        has_prev: cursor.has_prev(),
        has_next: cursor.has_next(),
        screen: cursor.index().map(|i| sequence[i].clone()),
        screen_param: cursor.to_param(),
    }
}
