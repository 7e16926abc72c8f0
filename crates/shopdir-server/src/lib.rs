//! HTTP surface for the shop directory.
//!
//! Serves the read-only JSON API and the rendered public pages from one
//! shared loader, so both always see the same record set.

mod api;
mod cors;
mod error;
mod pages;
mod state;

pub use error::ServerError;
pub use state::AppState;

use axum::Router;
use axum::middleware;
use axum::routing::get;
use log::{info, warn};
use shopdir_config::ShopdirConfig;
use shopdir_core::{DataOrigin, ShopCache, ShopLoader};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Default number of results returned by `/api/search`.
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Router with every API and page route.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/index.html", get(pages::home))
        .route("/food.html", get(pages::food))
        .route("/entertainment.html", get(pages::entertainment))
        .route("/service.html", get(pages::service))
        .route("/search.html", get(pages::search))
        .route("/details.html", get(pages::details))
        .route("/ping", get(api::ping))
        .route("/api", get(api::root))
        .route("/api/shops", get(api::shops))
        .route("/api/shops/{id}", get(api::shop))
        .route("/api/shops/category/{category}", get(api::shops_by_category))
        .route("/api/search", get(api::search))
        .route("/api/stats", get(api::stats))
        .layer(middleware::from_fn_with_state(state.clone(), cors::cors))
        .with_state(state)
}

/// Load data once, then serve until interrupted.
pub async fn serve(config: &ShopdirConfig) -> Result<(), ServerError> {
    let loader = ShopLoader::from_config(config, Arc::new(ShopCache::new()))?;
    let state = AppState::from_config(config, loader);
    let report = state.loader.load_with_report().await;
    if report.origin == DataOrigin::Empty {
        warn!("starting with an empty catalog");
    } else {
        info!("catalog ready: {} shops ({:?})", report.records.len(), report.origin);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("shopdir listening on http://{addr}");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await
        .map_err(ServerError::Serve)
}
