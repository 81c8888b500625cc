//! App aggregate and its videos.

use serde::{Deserialize, Serialize};

use super::{FlowType, Screen, ScreenType};

/// A short clip associated with an app.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub video_url: String,
    pub is_desktop: bool,
}

/// The root aggregate served to the front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Non-duplicated screens in resolved display order.
    pub screens: Vec<Screen>,
    #[serde(default)]
    pub videos: Vec<Video>,
    /// Distinct flow types present on `screens`, order-sorted.
    #[serde(default)]
    pub flow_types: Vec<FlowType>,
    /// Distinct screen types present on `screens`, first appearance first.
    #[serde(default)]
    pub screen_types: Vec<ScreenType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}
