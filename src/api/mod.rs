//! REST API module.
//!
//! Thin handlers over the pipeline: each request works on one catalog snapshot.

mod apps;
mod catalog;

pub use apps::*;
pub use catalog::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::{AppError, AppErrorWithRevision};
use crate::models::{App, Catalog, Platform, PlatformRule};
use crate::pipeline::partition::has_platform;

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub revision_id: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, revision_id: i64) -> Self {
        Self {
            success: true,
            data,
            revision_id,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppErrorWithRevision>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T, revision_id: i64) -> ApiResult<T> {
    Ok(ApiResponse::new(data, revision_id))
}

/// Create an error API response.
pub fn error<T: Serialize>(err: AppError, revision_id: i64) -> ApiResult<T> {
    Err(AppErrorWithRevision {
        error: err,
        revision_id,
    })
}

/// Parse the `{platform}` path segment.
fn parse_platform(segment: &str) -> Result<Platform, AppError> {
    Platform::parse(segment).ok_or_else(|| AppError::UnknownPlatform(segment.to_string()))
}

/// Look up an app that has something to show on the requested platform.
fn resolve_app<'a>(
    catalog: &'a Catalog,
    segment: &str,
    id: &str,
    rule: PlatformRule,
) -> Result<(Platform, &'a App), AppError> {
    let platform = parse_platform(segment)?;
    let app = catalog
        .app(id)
        .ok_or_else(|| AppError::NotFound(format!("App {} not found", id)))?;
    if !has_platform(&app.screens, platform, rule) {
        return Err(AppError::NotFound(format!(
            "App {} has no {} screens",
            id, platform
        )));
    }
    Ok((platform, app))
}
