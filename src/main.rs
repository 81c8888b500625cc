//! Screen Catalog Backend
//!
//! Serves a UI design catalog (apps, flows, screens, videos) from a CMS snapshot.

mod api;
mod auth;
mod cache;
mod config;
mod errors;
mod models;
mod pipeline;
mod store;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cache::ViewCache;
use config::Config;
use models::{FlowsView, ScreensView};
use pipeline::grouping::Selection;
use store::CatalogStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CatalogStore>,
    pub flows: Arc<ViewCache<Selection, FlowsView>>,
    pub screens: Arc<ViewCache<Selection, ScreensView>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: CatalogStore, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            flows: Arc::new(ViewCache::new(config.cache_capacity)),
            screens: Arc::new(ViewCache::new(config.cache_capacity)),
            config: Arc::new(config),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting Screen Catalog Backend");
    tracing::info!("Snapshot path: {:?}", config.snapshot_path);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Platform rule: {}", config.platform_rule.as_str());

    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (CATALOG_API_PSK). Reload endpoint is open!");
    }

    let store = CatalogStore::open(&config.snapshot_path).await;
    let info = store.revision_info().await;
    tracing::info!(
        "Catalog revision {} loaded with {} apps",
        info.revision_id,
        info.app_count
    );

    let state = AppState::new(store, config.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let psk = state.config.api_psk.clone();

    // Reload is the only mutating route
    let admin_routes = Router::new()
        .route("/catalog/reload", post(api::reload_catalog))
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    let api_routes = Router::new()
        // Catalog
        .route("/catalog/revision", get(api::get_revision))
        .route("/catalog/cache", get(api::get_cache_stats))
        // Browse
        .route("/{platform}/apps", get(api::list_apps))
        // App detail
        .route("/{platform}/apps/{id}", get(api::get_app))
        .route("/{platform}/apps/{id}/flows", get(api::get_flows))
        .route("/{platform}/apps/{id}/screens", get(api::get_screens))
        .route("/{platform}/apps/{id}/videos", get(api::get_videos))
        .route("/{platform}/apps/{id}/viewer", get(api::get_viewer))
        .merge(admin_routes);

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
