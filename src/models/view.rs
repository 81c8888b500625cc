//! View models handed to the gallery and modal front end.

use serde::{Deserialize, Serialize};

use super::{FlowType, Platform, Screen, ScreenType};

/// Tabs of the app detail page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Flows,
    Screens,
    Videos,
}

impl Tab {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "flows" => Some(Tab::Flows),
            "screens" => Some(Tab::Screens),
            "videos" => Some(Tab::Videos),
            _ => None,
        }
    }
}

/// Image shown in an app card carousel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScreenPreview {
    pub id: String,
    pub image_url: String,
}

/// Compact app card for the browse grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSummary {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub screen_count: usize,
    pub previews: Vec<ScreenPreview>,
}

/// One page of the browse grid plus its filter facets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub platform: Platform,
    pub apps: Vec<AppSummary>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub has_more: bool,
    pub categories: Vec<String>,
    pub flow_types: Vec<String>,
}

/// App header and selector lists for the detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDetail {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub platform: Platform,
    pub tab: Tab,
    pub has_flows: bool,
    pub platform_names: Vec<String>,
    pub screen_count: usize,
    pub video_count: usize,
    pub flow_types: Vec<FlowType>,
    pub screen_types: Vec<ScreenType>,
}

/// Screens sharing one flow type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlowGroup {
    pub flow_type_name: String,
    pub screens: Vec<Screen>,
}

/// The flows tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowsView {
    /// Selected flow type, `None` when showing all flows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    pub flow_types: Vec<FlowType>,
    pub groups: Vec<FlowGroup>,
}

/// The screens tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreensView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    pub screen_types: Vec<ScreenType>,
    pub screens: Vec<Screen>,
}

/// Position of the lightbox viewer within one screen sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen: Option<Screen>,
    /// Value for the 1-based `screen` URL parameter, absent when closed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_param: Option<String>,
}
