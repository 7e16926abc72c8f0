//! Read-only JSON API.

use crate::DEFAULT_SEARCH_LIMIT;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use shopdir_core::CatalogStats;
use shopdir_protocol::{Category, ShopRecord};

pub(crate) async fn ping(State(state): State<AppState>) -> Json<serde_json::Value> {
    let records = state.loader.load().await;
    Json(json!({ "message": "pong", "shops_count": records.len() }))
}

pub(crate) async fn root(State(state): State<AppState>) -> Json<serde_json::Value> {
    let records = state.loader.load().await;
    Json(json!({
        "message": "shopdir API",
        "shops_count": records.len(),
    }))
}

pub(crate) async fn shops(State(state): State<AppState>) -> Json<Vec<ShopRecord>> {
    let records = state.loader.load().await;
    Json(records.as_ref().clone())
}

pub(crate) async fn shop(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let records = state.loader.load().await;
    match records.iter().find(|record| record.id == id) {
        Some(record) => Json(record.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "shop not found", "id": id })),
        )
            .into_response(),
    }
}

pub(crate) async fn shops_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<Vec<ShopRecord>> {
    let records = state.loader.load().await;
    Json(state.engine.by_category(&records, &Category::from(category)))
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchParams {
    #[serde(default)]
    q: String,
    category: Option<String>,
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    query: String,
    category: Option<String>,
    count: usize,
    results: Vec<ShopRecord>,
}

pub(crate) async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = params.q.trim();
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "query parameter q is required" })),
        )
            .into_response();
    }
    let category = params
        .category
        .filter(|category| !category.trim().is_empty());
    let selector = category.as_deref().map(Category::from);
    let records = state.loader.load().await;
    let results = state.engine.search(
        &records,
        query,
        selector.as_ref(),
        params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
    );
    Json(SearchResponse {
        query: query.to_string(),
        category,
        count: results.len(),
        results,
    })
    .into_response()
}

pub(crate) async fn stats(State(state): State<AppState>) -> Json<CatalogStats> {
    let records = state.loader.load().await;
    Json(CatalogStats::collect(&records))
}
