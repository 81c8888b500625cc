//! Browse-grid listing: platform scoping, facets, filters and paging.

use std::collections::HashSet;

use crate::models::{App, AppSummary, CatalogPage, Platform, PlatformRule, ScreenPreview};

use super::grouping::ALL;
use super::partition::{has_platform, is_visible};

/// Screens shown in an app card carousel.
pub const PREVIEW_LIMIT: usize = 3;

/// Requested browse filters, straight from the query string.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub category: Option<String>,
    pub flow_type: Option<String>,
    pub query: Option<String>,
}

/// A filter value that is actually set: not blank and not the `all` sentinel.
fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != ALL)
}

/// Apps with at least one screen on `platform`, payload order preserved.
pub fn apps_for_platform(apps: &[App], platform: Platform, rule: PlatformRule) -> Vec<&App> {
    apps.iter()
        .filter(|app| has_platform(&app.screens, platform, rule))
        .collect()
}

/// Distinct non-empty categories, first appearance first.
pub fn categories(apps: &[&App]) -> Vec<String> {
    let mut seen = HashSet::new();
    apps.iter()
        .map(|app| app.category.as_str())
        .filter(|c| !c.is_empty() && seen.insert(*c))
        .map(str::to_string)
        .collect()
}

/// Distinct flow-type names across the apps' platform-scoped screens.
pub fn flow_type_names(apps: &[&App], platform: Platform, rule: PlatformRule) -> Vec<String> {
    let mut seen = HashSet::new();
    apps.iter()
        .flat_map(|app| app.screens.iter())
        .filter(|s| is_visible(s, platform, rule))
        .filter_map(|s| s.flow_name())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Apply the category, flow-type and text filters.
///
/// Unknown categories behave like "all"; an unknown flow type simply matches nothing.
pub fn filter_apps<'a>(
    apps: &[&'a App],
    filter: &CatalogFilter,
    platform: Platform,
    rule: PlatformRule,
) -> Vec<&'a App> {
    let known = categories(apps);
    let category = active(&filter.category).filter(|c| known.iter().any(|k| k.as_str() == *c));
    let flow_type = active(&filter.flow_type);
    let query = active(&filter.query).map(str::to_lowercase);

    apps.iter()
        .copied()
        .filter(|app| category.map_or(true, |c| app.category == c))
        .filter(|app| {
            flow_type.map_or(true, |ft| {
                app.screens
                    .iter()
                    .any(|s| is_visible(s, platform, rule) && s.flow_name() == Some(ft))
            })
        })
        .filter(|app| {
            query.as_deref().map_or(true, |q| {
                app.name.to_lowercase().contains(q)
                    || app
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(q))
            })
        })
        .collect()
}

/// "Load more" paging: page `n` shows the first `n * page_size` items.
///
/// Returns the visible slice and whether more items remain.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> (&[T], bool) {
    let end = page.max(1).saturating_mul(page_size.max(1)).min(items.len());
    (&items[..end], end < items.len())
}

/// Up to `PREVIEW_LIMIT` screens for the app card.
///
/// Mobile cards only use screens flagged as thumbnails.
pub fn previews(app: &App, platform: Platform, rule: PlatformRule) -> Vec<ScreenPreview> {
    app.screens
        .iter()
        .filter(|s| is_visible(s, platform, rule))
        .filter(|s| platform == Platform::Desktop || s.thumbnail)
        .take(PREVIEW_LIMIT)
        .map(|s| ScreenPreview {
            id: s.id.clone(),
            image_url: s.image_url.clone(),
        })
        .collect()
}

pub fn summarize(app: &App, platform: Platform, rule: PlatformRule) -> AppSummary {
    AppSummary {
        id: app.id.clone(),
        name: app.name.clone(),
        category: app.category.clone(),
        description: app.description.clone(),
        logo_url: app.logo_url.clone(),
        screen_count: app
            .screens
            .iter()
            .filter(|s| is_visible(s, platform, rule))
            .count(),
        previews: previews(app, platform, rule),
    }
}

/// Build one browse page.
pub fn catalog_page(
    apps: &[App],
    platform: Platform,
    rule: PlatformRule,
    filter: &CatalogFilter,
    page: usize,
    page_size: usize,
) -> CatalogPage {
    let scoped = apps_for_platform(apps, platform, rule);
    let matching = filter_apps(&scoped, filter, platform, rule);
    let (visible, has_more) = paginate(&matching, page, page_size);

    CatalogPage {
        platform,
        apps: visible
            .iter()
            .map(|app| summarize(app, platform, rule))
            .collect(),
        total: matching.len(),
        page: page.max(1),
        page_size: page_size.max(1),
        has_more,
        categories: categories(&scoped),
        flow_types: flow_type_names(&scoped, platform, rule),
    }
}
