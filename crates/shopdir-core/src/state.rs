//! Page state transitions for the listing, search, and detail views.
//!
//! Each view is a plain value; user input produces a new value instead of
//! mutating markup, so the transitions can be tested without a UI.

use crate::query::{QueryEngine, SearchScope, filter_text};
use reqwest::Url;
use shopdir_protocol::{Category, ShopRecord};
use std::sync::Arc;

/// Parameters a page reads from its query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub id: Option<String>,
    pub q: Option<String>,
}

impl PageQuery {
    /// Parse `id` and `q` from a raw query string, with or without the
    /// leading `?`. Values are percent-decoded; the first occurrence wins.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut parsed = Self::default();
        let Ok(mut url) = Url::parse("http://localhost/") else {
            return parsed;
        };
        url.set_query(Some(query));
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "id" if parsed.id.is_none() => parsed.id = Some(value.into_owned()),
                "q" if parsed.q.is_none() => parsed.q = Some(value.into_owned()),
                _ => {}
            }
        }
        parsed
    }
}

/// A category page: its pool of records and the currently shown subset.
#[derive(Debug, Clone)]
pub struct ListingState {
    pub category: Category,
    pub query: String,
    pool: Vec<ShopRecord>,
    pub results: Vec<ShopRecord>,
}

impl ListingState {
    pub fn new(records: &[ShopRecord], engine: &QueryEngine, category: Category) -> Self {
        let pool = engine.by_category(records, &category);
        Self {
            category,
            query: String::new(),
            results: pool.clone(),
            pool,
        }
    }

    /// Narrow the category pool by a free-text query.
    pub fn apply_filter(self, query: &str) -> Self {
        let results = filter_text(&self.pool, query, SearchScope::Listing);
        Self {
            query: query.to_string(),
            results,
            ..self
        }
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }
}

/// What the search page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchView {
    /// No query yet; ask for one.
    Prompt,
    /// Matches for the current query, possibly none.
    Results(Vec<ShopRecord>),
}

/// The site-wide search page.
#[derive(Debug, Clone)]
pub struct SearchState {
    records: Arc<Vec<ShopRecord>>,
    pub query: String,
    pub view: SearchView,
}

impl SearchState {
    pub fn new(records: Arc<Vec<ShopRecord>>) -> Self {
        Self {
            records,
            query: String::new(),
            view: SearchView::Prompt,
        }
    }

    pub fn apply_query(self, query: &str) -> Self {
        let view = if query.trim().is_empty() {
            SearchView::Prompt
        } else {
            SearchView::Results(filter_text(&self.records, query, SearchScope::Global))
        };
        Self {
            query: query.to_string(),
            view,
            ..self
        }
    }
}

/// Outcome of looking up the record a detail page asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    /// The page was opened without an id.
    MissingId,
    /// No record carries the requested id.
    NotFound(String),
    Found(Box<ShopRecord>),
}

impl DetailView {
    pub fn resolve(records: &[ShopRecord], id: Option<&str>) -> Self {
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            return Self::MissingId;
        };
        match records.iter().find(|record| record.id == id) {
            Some(record) => Self::Found(Box::new(record.clone())),
            None => Self::NotFound(id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DetailView, ListingState, PageQuery, SearchState, SearchView};
    use crate::query::QueryEngine;
    use pretty_assertions::assert_eq;
    use shopdir_protocol::{Category, ShopRecord};
    use std::sync::Arc;

    fn shop(id: &str, category: &str, name: &str) -> ShopRecord {
        ShopRecord {
            id: id.to_string(),
            category: Category::from(category),
            name: name.to_string(),
            ..ShopRecord::default()
        }
    }

    fn records() -> Vec<ShopRecord> {
        vec![
            shop("chef_001", "food", "Noodle House"),
            shop("chef_002", "food", "Dumpling Bar"),
            shop("srv_001", "service", "Phone Repair"),
        ]
    }

    #[test]
    fn query_string_is_decoded() {
        let query = PageQuery::parse("?id=chef%5F001&q=noodle+house&id=other");
        assert_eq!(
            query,
            PageQuery {
                id: Some("chef_001".to_string()),
                q: Some("noodle house".to_string()),
            }
        );
        assert_eq!(PageQuery::parse(""), PageQuery::default());
    }

    #[test]
    fn listing_filter_narrows_the_category_pool() {
        let engine = QueryEngine::new(["KTV"]);
        let state = ListingState::new(&records(), &engine, Category::Food);
        assert_eq!(state.results.len(), 2);

        let state = state.apply_filter("DUMPLING");
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].id, "chef_002");

        let state = state.apply_filter("");
        assert_eq!(state.results.len(), state.pool_len());
    }

    #[test]
    fn blank_search_prompts() {
        let state = SearchState::new(Arc::new(records()));
        assert_eq!(state.view, SearchView::Prompt);

        let state = state.apply_query("service");
        let SearchView::Results(found) = &state.view else {
            panic!("expected results");
        };
        assert_eq!(found.len(), 1);

        let state = state.apply_query("   ");
        assert_eq!(state.view, SearchView::Prompt);
        assert_eq!(
            state.apply_query("zzz").view,
            SearchView::Results(Vec::new())
        );
    }

    #[test]
    fn detail_resolution() {
        let records = records();
        assert_eq!(DetailView::resolve(&records, None), DetailView::MissingId);
        assert_eq!(DetailView::resolve(&records, Some("")), DetailView::MissingId);
        assert_eq!(
            DetailView::resolve(&records, Some("chef_404")),
            DetailView::NotFound("chef_404".to_string())
        );
        assert!(matches!(
            DetailView::resolve(&records, Some("srv_001")),
            DetailView::Found(record) if record.name == "Phone Repair"
        ));
    }
}
