//! Catalog snapshot and revision info.

use serde::{Deserialize, Serialize};

use super::App;

/// One normalized snapshot of the CMS content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub revision_id: i64,
    pub generated_at: String,
    pub apps: Vec<App>,
}

impl Catalog {
    /// A catalog with no content, served when the CMS snapshot is unavailable.
    pub fn empty(revision_id: i64) -> Self {
        Self {
            revision_id,
            generated_at: chrono::Utc::now().to_rfc3339(),
            apps: Vec::new(),
        }
    }

    pub fn app(&self, id: &str) -> Option<&App> {
        self.apps.iter().find(|app| app.id == id)
    }

    pub fn revision_info(&self) -> RevisionInfo {
        RevisionInfo {
            revision_id: self.revision_id,
            generated_at: self.generated_at.clone(),
            app_count: self.apps.len(),
        }
    }
}

/// Revision information for change detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionInfo {
    pub revision_id: i64,
    pub generated_at: String,
    pub app_count: usize,
}
