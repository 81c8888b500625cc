//! Record normalizer: raw CMS entries to canonical models.
//!
//! This is the only place that looks at raw payload shapes. Records missing a
//! required field are dropped and counted, never reported as errors.

use std::collections::{HashMap, HashSet};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::models::raw::{Asset, RawAppEntry, RawPayload, RawScreenEntry, RawVideoEntry};
use crate::models::{App, FlowType, Screen, ScreenType, Video};

use super::ordering::{sort_flow_types, sort_screens};

/// Title used when the CMS record has none.
pub const UNTITLED_SCREEN: &str = "Untitled Screen";

/// What happened to the records of one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    pub apps: usize,
    pub screens: usize,
    pub videos: usize,
    pub malformed: usize,
    pub missing_image: usize,
    pub duplicated: usize,
    pub orphaned: usize,
    pub missing_video_url: usize,
    pub duplicate_app_ids: usize,
}

impl IngestReport {
    pub fn dropped(&self) -> usize {
        self.malformed
            + self.missing_image
            + self.duplicated
            + self.orphaned
            + self.missing_video_url
            + self.duplicate_app_ids
    }
}

/// Resolve an asset to an absolute URL.
///
/// Protocol-relative CMS URLs get an `https:` scheme; blank URLs count as missing.
pub fn asset_url(asset: Option<&Asset>) -> Option<String> {
    let url = asset?.file_url()?.trim();
    if url.is_empty() {
        None
    } else if url.starts_with("//") {
        Some(format!("https:{}", url))
    } else {
        Some(url.to_string())
    }
}

/// Normalize one screen entry. `None` when it has no usable image.
pub fn normalize_screen(entry: &RawScreenEntry) -> Option<Screen> {
    let fields = &entry.fields;
    let image_url = asset_url(fields.image.as_ref())?;

    let title = fields
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNTITLED_SCREEN)
        .to_string();

    let platforms = fields
        .platform
        .iter()
        .flatten()
        .filter_map(|p| p.name())
        .map(str::to_string)
        .collect();

    let flow_type = fields.flow_type.as_ref().and_then(|ft| {
        ft.name().map(|name| FlowType {
            name: name.to_string(),
            order: ft.order(),
        })
    });

    let screen_types = fields
        .screen_type
        .iter()
        .flatten()
        .filter_map(|st| st.name())
        .map(|name| ScreenType {
            name: name.to_string(),
        })
        .collect();

    Some(Screen {
        id: entry.sys.id.clone(),
        title,
        image_url,
        platforms,
        flow_type,
        screen_types,
        is_desktop: fields.is_desktop.unwrap_or(false),
        desktop_flag_explicit: fields.is_desktop.is_some(),
        duplicated_screen: fields.duplicated_screen.unwrap_or(false),
        thumbnail: fields.thumbnail.unwrap_or(false),
        order: fields
            .order
            .as_ref()
            .and_then(crate::models::raw::order_value),
        created_at: entry.sys.created_at.clone().unwrap_or_default(),
    })
}

/// Normalize a batch of screens, dropping unusable and duplicated records.
///
/// The result is in resolved display order. Drops are counted in `report`.
pub fn normalize_screens<'a>(
    entries: impl IntoIterator<Item = &'a RawScreenEntry>,
    report: &mut IngestReport,
) -> Vec<Screen> {
    let mut screens: Vec<Screen> = entries
        .into_iter()
        .filter_map(|entry| match normalize_screen(entry) {
            None => {
                tracing::debug!("Dropping screen {}: no image url", entry.sys.id);
                report.missing_image += 1;
                None
            }
            Some(screen) if screen.duplicated_screen => {
                tracing::debug!("Dropping screen {}: flagged as duplicate", screen.id);
                report.duplicated += 1;
                None
            }
            Some(screen) => Some(screen),
        })
        .collect();
    sort_screens(&mut screens);
    screens
}

/// Normalize one video entry. `None` when it has no usable video file.
pub fn normalize_video(entry: &RawVideoEntry) -> Option<Video> {
    let video_url = asset_url(entry.fields.video.as_ref())?;
    Some(Video {
        id: entry.sys.id.clone(),
        title: entry.fields.title.clone().unwrap_or_default(),
        video_url,
        is_desktop: entry.fields.is_desktop.unwrap_or(false),
    })
}

/// Distinct flow types present on `screens`, order-sorted.
///
/// Each flow type keeps the order of its first occurrence.
pub fn derive_flow_types(screens: &[Screen]) -> Vec<FlowType> {
    let mut seen = HashSet::new();
    let mut flow_types: Vec<FlowType> = screens
        .iter()
        .filter(|s| !s.duplicated_screen)
        .filter_map(|s| s.flow_type.as_ref())
        .filter(|ft| seen.insert(ft.name.as_str()))
        .cloned()
        .collect();
    sort_flow_types(&mut flow_types);
    flow_types
}

/// Distinct screen types present on `screens`, first appearance first.
pub fn derive_screen_types(screens: &[Screen]) -> Vec<ScreenType> {
    let mut seen = HashSet::new();
    screens
        .iter()
        .filter(|s| !s.duplicated_screen)
        .flat_map(|s| s.screen_types.iter())
        .filter(|st| seen.insert(st.name.as_str()))
        .cloned()
        .collect()
}

fn decode<T: DeserializeOwned>(kind: &str, value: &Value, report: &mut IngestReport) -> Option<T> {
    match serde_json::from_value(value.clone()) {
        Ok(entry) => Some(entry),
        Err(e) => {
            tracing::debug!("Skipping malformed {} entry: {}", kind, e);
            report.malformed += 1;
            None
        }
    }
}

fn linked_app(link: Option<&crate::models::raw::Link>) -> Option<&str> {
    link.map(|l| l.sys.id.as_str()).filter(|id| !id.is_empty())
}

/// Turn a whole payload into app aggregates, in payload app order.
pub fn normalize_payload(payload: &RawPayload) -> (Vec<App>, IngestReport) {
    let mut report = IngestReport::default();

    let app_entries: Vec<RawAppEntry> = payload
        .apps
        .iter()
        .filter_map(|v| decode("app", v, &mut report))
        .collect();
    let screen_entries: Vec<RawScreenEntry> = payload
        .screens
        .iter()
        .filter_map(|v| decode("screen", v, &mut report))
        .collect();
    let video_entries: Vec<RawVideoEntry> = payload
        .videos
        .iter()
        .filter_map(|v| decode("video", v, &mut report))
        .collect();

    let mut app_ids = HashSet::new();
    let app_entries: Vec<&RawAppEntry> = app_entries
        .iter()
        .filter(|entry| {
            let fresh = app_ids.insert(entry.sys.id.as_str());
            if !fresh {
                tracing::debug!("Skipping repeated app id {}", entry.sys.id);
                report.duplicate_app_ids += 1;
            }
            fresh
        })
        .collect();

    let mut screens_by_app: HashMap<&str, Vec<&RawScreenEntry>> = HashMap::new();
    for entry in &screen_entries {
        match linked_app(entry.fields.app.as_ref()) {
            Some(app_id) if app_ids.contains(app_id) => {
                screens_by_app.entry(app_id).or_default().push(entry);
            }
            _ => {
                tracing::debug!("Dropping screen {}: no known app", entry.sys.id);
                report.orphaned += 1;
            }
        }
    }

    let mut videos_by_app: HashMap<&str, Vec<Video>> = HashMap::new();
    for entry in &video_entries {
        let Some(app_id) = linked_app(entry.fields.app.as_ref()).filter(|id| app_ids.contains(id))
        else {
            tracing::debug!("Dropping video {}: no known app", entry.sys.id);
            report.orphaned += 1;
            continue;
        };
        match normalize_video(entry) {
            Some(video) => videos_by_app.entry(app_id).or_default().push(video),
            None => {
                tracing::debug!("Dropping video {}: no video url", entry.sys.id);
                report.missing_video_url += 1;
            }
        }
    }

    let apps: Vec<App> = app_entries
        .into_iter()
        .map(|entry| {
            let id = entry.sys.id.as_str();
            let screens =
                normalize_screens(screens_by_app.remove(id).unwrap_or_default(), &mut report);
            let videos = videos_by_app.remove(id).unwrap_or_default();
            normalize_app(entry, screens, videos)
        })
        .collect();

    report.apps = apps.len();
    report.screens = apps.iter().map(|a| a.screens.len()).sum();
    report.videos = apps.iter().map(|a| a.videos.len()).sum();

    (apps, report)
}

fn normalize_app(entry: &RawAppEntry, screens: Vec<Screen>, videos: Vec<Video>) -> App {
    let fields = &entry.fields;
    let flow_types = derive_flow_types(&screens);
    let screen_types = derive_screen_types(&screens);

    App {
        id: entry.sys.id.clone(),
        name: fields.name.clone().unwrap_or_default(),
        category: fields
            .category
            .as_ref()
            .and_then(|c| c.name())
            .unwrap_or_default()
            .to_string(),
        description: fields
            .description
            .clone()
            .filter(|d| !d.trim().is_empty()),
        logo_url: asset_url(fields.app_logo.as_ref()),
        screens,
        videos,
        flow_types,
        screen_types,
        updated_at: fields
            .date_updated
            .clone()
            .filter(|d| !d.is_empty())
            .or_else(|| entry.sys.updated_at.clone()),
    }
}
