//! Snapshot store.
//!
//! Holds the current normalized catalog. The CMS fetch itself lives outside this
//! service; it drops a JSON export at the configured path and the store loads it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::raw::RawPayload;
use crate::models::{Catalog, RevisionInfo};
use crate::pipeline::normalize::{normalize_payload, IngestReport};

/// Parse and normalize a raw payload into a catalog at `revision_id`.
pub fn build_catalog(bytes: &[u8], revision_id: i64) -> Result<(Catalog, IngestReport), AppError> {
    let payload: RawPayload = serde_json::from_slice(bytes)?;
    let (apps, report) = normalize_payload(&payload);
    let catalog = Catalog {
        revision_id,
        generated_at: Utc::now().to_rfc3339(),
        apps,
    };
    Ok((catalog, report))
}

/// Read and normalize the snapshot file.
pub async fn load_snapshot(
    path: &Path,
    revision_id: i64,
) -> Result<(Catalog, IngestReport), AppError> {
    let bytes = tokio::fs::read(path).await?;
    build_catalog(&bytes, revision_id)
}

fn log_report(report: &IngestReport) {
    tracing::info!(
        "Catalog loaded: {} apps, {} screens, {} videos",
        report.apps,
        report.screens,
        report.videos
    );
    if report.dropped() > 0 {
        tracing::info!(
            malformed = report.malformed,
            missing_image = report.missing_image,
            duplicated = report.duplicated,
            orphaned = report.orphaned,
            missing_video_url = report.missing_video_url,
            duplicate_app_ids = report.duplicate_app_ids,
            "Dropped {} CMS records during ingestion",
            report.dropped()
        );
    }
}

/// In-memory catalog with a revision counter.
pub struct CatalogStore {
    path: PathBuf,
    current: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    /// Load the snapshot at `path`.
    ///
    /// A missing or unreadable snapshot yields an empty catalog so the front end
    /// can render its empty state.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let catalog = match load_snapshot(&path, 1).await {
            Ok((catalog, report)) => {
                log_report(&report);
                catalog
            }
            Err(e) => {
                tracing::warn!(
                    "Serving empty catalog, snapshot {:?} unavailable: {}",
                    path,
                    e
                );
                Catalog::empty(1)
            }
        };

        Self {
            path,
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Current snapshot. Handlers hold the `Arc` for the whole request.
    pub async fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&*self.current.read().await)
    }

    pub async fn revision_info(&self) -> RevisionInfo {
        self.current.read().await.revision_info()
    }

    /// Re-read the snapshot file.
    ///
    /// On success the revision advances; on failure the previous catalog stays.
    pub async fn reload(&self) -> Result<RevisionInfo, AppError> {
        // Held across the load so concurrent reloads serialize.
        let mut current = self.current.write().await;
        let (catalog, report) = load_snapshot(&self.path, current.revision_id + 1).await?;
        log_report(&report);

        let info = catalog.revision_info();
        *current = Arc::new(catalog);
        tracing::info!("Catalog revision is now {}", info.revision_id);
        Ok(info)
    }
}
