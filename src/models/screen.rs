//! Canonical screen model.

use serde::{Deserialize, Serialize};

/// A named grouping category for screens within one app.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlowType {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// A secondary classification tag, independent of flow type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScreenType {
    pub name: String,
}

/// A single UI capture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub id: String,
    pub title: String,
    pub image_url: String,
    /// Platform tag names in CMS order, e.g. "iOS", "Web".
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_type: Option<FlowType>,
    #[serde(default)]
    pub screen_types: Vec<ScreenType>,
    pub is_desktop: bool,
    /// Whether the CMS record carried `isDesktop` at all.
    #[serde(skip)]
    pub desktop_flag_explicit: bool,
    pub duplicated_screen: bool,
    pub thumbnail: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Creation timestamp exactly as the CMS reported it.
    pub created_at: String,
}

impl Screen {
    pub fn flow_name(&self) -> Option<&str> {
        self.flow_type.as_ref().map(|f| f.name.as_str())
    }

    pub fn has_screen_type(&self, name: &str) -> bool {
        self.screen_types.iter().any(|st| st.name == name)
    }
}
