//! Server-rendered public pages.

use crate::state::AppState;
use axum::extract::{RawQuery, State};
use axum::response::Html;
use shopdir_core::{DetailView, ListingState, PageQuery, SearchState, render::category_title};
use shopdir_protocol::Category;

fn page_query(raw: Option<String>) -> PageQuery {
    PageQuery::parse(raw.as_deref().unwrap_or_default())
}

pub(crate) async fn home(State(state): State<AppState>) -> Html<String> {
    let records = state.loader.load().await;
    let highlights = state.engine.highlights(&records, state.highlight_count);
    let body = state.renderer.home(&highlights);
    Html(state.renderer.page("Local Shop Directory", &body))
}

async fn listing(state: AppState, category: Category, raw: Option<String>) -> Html<String> {
    let query = page_query(raw);
    let records = state.loader.load().await;
    let listing = ListingState::new(&records, &state.engine, category)
        .apply_filter(query.q.as_deref().unwrap_or_default());
    let body = state.renderer.listing(&listing);
    Html(
        state
            .renderer
            .page(category_title(&listing.category), &body),
    )
}

pub(crate) async fn food(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Html<String> {
    listing(state, Category::Food, raw).await
}

pub(crate) async fn entertainment(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Html<String> {
    listing(state, Category::Entertainment, raw).await
}

pub(crate) async fn service(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Html<String> {
    listing(state, Category::Service, raw).await
}

pub(crate) async fn search(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Html<String> {
    let query = page_query(raw);
    let records = state.loader.load().await;
    let search = SearchState::new(records).apply_query(query.q.as_deref().unwrap_or_default());
    let body = state.renderer.search(&search);
    Html(state.renderer.page("Search", &body))
}

pub(crate) async fn details(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Html<String> {
    let query = page_query(raw);
    let records = state.loader.load().await;
    let view = DetailView::resolve(&records, query.id.as_deref());
    let title = match &view {
        DetailView::Found(record) => record.name.clone(),
        _ => "Shop details".to_string(),
    };
    let body = state.renderer.detail(&view);
    Html(state.renderer.page(&title, &body))
}
