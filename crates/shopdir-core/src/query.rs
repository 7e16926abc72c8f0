//! Category selection, free-text filtering, and random sampling.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use shopdir_config::CatalogConfig;
use shopdir_protocol::{Category, ShopRecord};
use std::collections::HashSet;

/// Which fields a free-text query looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Category pages: name, type, tags, description.
    Listing,
    /// Site-wide search: additionally the category.
    Global,
}

/// Filtering rules shared by the home, category, and search views.
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    entertainment_extra_types: HashSet<String>,
}

impl QueryEngine {
    pub fn new<I, S>(entertainment_extra_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entertainment_extra_types: entertainment_extra_types
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.entertainment_extra_types.iter().cloned())
    }

    /// Whether a record belongs under a category selector.
    ///
    /// The entertainment selector also takes records whose `type` is on the
    /// extra-types list, whatever their own category. No other selector has
    /// such a rule.
    pub fn matches_category(&self, record: &ShopRecord, selector: &Category) -> bool {
        if matches!(selector, Category::Other(_)) {
            return false;
        }
        if record.category == *selector {
            return true;
        }
        *selector == Category::Entertainment
            && self.entertainment_extra_types.contains(&record.shop_type)
    }

    /// Records under a category selector, in input order.
    pub fn by_category(&self, records: &[ShopRecord], selector: &Category) -> Vec<ShopRecord> {
        records
            .iter()
            .filter(|record| self.matches_category(record, selector))
            .cloned()
            .collect()
    }

    /// Global search with an optional category selector and a result cap.
    pub fn search(
        &self,
        records: &[ShopRecord],
        query: &str,
        category: Option<&Category>,
        limit: usize,
    ) -> Vec<ShopRecord> {
        records
            .iter()
            .filter(|record| {
                category.is_none_or(|selector| self.matches_category(record, selector))
            })
            .filter(|record| matches_text(record, query, SearchScope::Global))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Random highlights for each selectable category.
    pub fn highlights(&self, records: &[ShopRecord], count: usize) -> Highlights {
        let mut rng = rand::rng();
        let mut sample = |selector: Category| {
            pick_random_with(&mut rng, &self.by_category(records, &selector), count)
        };
        Highlights {
            food: sample(Category::Food),
            entertainment: sample(Category::Entertainment),
            service: sample(Category::Service),
        }
    }
}

/// Per-category random samples for the home page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Highlights {
    pub food: Vec<ShopRecord>,
    pub entertainment: Vec<ShopRecord>,
    pub service: Vec<ShopRecord>,
}

/// Case-insensitive substring match; a blank query matches everything.
pub fn matches_text(record: &ShopRecord, query: &str, scope: SearchScope) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    haystack(record, scope).contains(&needle)
}

/// Records matching a free-text query, in input order.
pub fn filter_text(records: &[ShopRecord], query: &str, scope: SearchScope) -> Vec<ShopRecord> {
    records
        .iter()
        .filter(|record| matches_text(record, query, scope))
        .cloned()
        .collect()
}

fn haystack(record: &ShopRecord, scope: SearchScope) -> String {
    let mut parts = vec![record.name.as_str(), record.shop_type.as_str()];
    if scope == SearchScope::Global {
        parts.push(record.category.as_str());
    }
    parts.push(record.tags.as_str());
    parts.push(record.description.as_str());
    parts.join(" ").to_lowercase()
}

/// Up to `count` distinct records in random order.
pub fn pick_random(candidates: &[ShopRecord], count: usize) -> Vec<ShopRecord> {
    pick_random_with(&mut rand::rng(), candidates, count)
}

/// [`pick_random`] with a caller-supplied generator.
pub fn pick_random_with<R: Rng + ?Sized>(
    rng: &mut R,
    candidates: &[ShopRecord],
    count: usize,
) -> Vec<ShopRecord> {
    let mut pool = candidates.to_vec();
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

#[cfg(test)]
mod tests {
    use super::{QueryEngine, SearchScope, filter_text, pick_random, pick_random_with};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use shopdir_protocol::{Category, ShopRecord};

    fn shop(id: &str, category: &str, shop_type: &str) -> ShopRecord {
        ShopRecord {
            id: id.to_string(),
            category: Category::from(category),
            shop_type: shop_type.to_string(),
            name: id.to_string(),
            ..ShopRecord::default()
        }
    }

    fn ids(records: &[ShopRecord]) -> Vec<&str> {
        records.iter().map(|record| record.id.as_str()).collect()
    }

    #[test]
    fn extra_types_only_widen_entertainment() {
        let engine = QueryEngine::new(["KTV"]);
        let records = vec![
            shop("ent_001", "entertainment", "Bar"),
            shop("srv_001", "service", "KTV"),
            shop("chef_001", "food", "KTV"),
            shop("chef_002", "food", "Noodles"),
        ];
        assert_eq!(
            ids(&engine.by_category(&records, &Category::Entertainment)),
            vec!["ent_001", "srv_001", "chef_001"]
        );
        assert_eq!(
            ids(&engine.by_category(&records, &Category::Food)),
            vec!["chef_001", "chef_002"]
        );
        assert_eq!(
            ids(&engine.by_category(&records, &Category::Service)),
            vec!["srv_001"]
        );
    }

    #[test]
    fn food_selector_excludes_foreign_ktv() {
        let engine = QueryEngine::new(["KTV"]);
        let records = vec![shop("srv_009", "service", "KTV")];
        assert!(engine.by_category(&records, &Category::Food).is_empty());
    }

    #[test]
    fn unknown_categories_match_nothing() {
        let engine = QueryEngine::new(["KTV"]);
        let records = vec![shop("x_001", "nightlife", "KTV")];
        assert!(engine.by_category(&records, &Category::from("nightlife")).is_empty());
        assert_eq!(engine.by_category(&records, &Category::Entertainment).len(), 1);
    }

    #[test]
    fn text_filter_is_case_insensitive_and_ordered() {
        let mut first = shop("chef_001", "food", "Restaurant");
        first.description = "Hand-pulled Noodle House".to_string();
        let mut second = shop("chef_002", "food", "Cafe");
        second.tags = "noodle, soup".to_string();
        let third = shop("chef_003", "food", "Bakery");
        let records = vec![first, second, third];

        let found = filter_text(&records, "  NOODLE ", SearchScope::Listing);
        assert_eq!(ids(&found), vec!["chef_001", "chef_002"]);
        assert_eq!(filter_text(&records, "   ", SearchScope::Listing).len(), 3);
    }

    #[test]
    fn category_text_only_searched_globally() {
        let records = vec![shop("srv_001", "service", "Repair")];
        assert!(filter_text(&records, "service", SearchScope::Listing).is_empty());
        assert_eq!(filter_text(&records, "service", SearchScope::Global).len(), 1);
    }

    #[test]
    fn search_applies_category_and_limit() {
        let engine = QueryEngine::new(["KTV"]);
        let records = vec![
            shop("chef_001", "food", "Hotpot"),
            shop("chef_002", "food", "Hotpot"),
            shop("srv_001", "service", "Hotpot supplies"),
        ];
        let found = engine.search(&records, "hotpot", Some(&Category::Food), 1);
        assert_eq!(ids(&found), vec!["chef_001"]);
        assert_eq!(engine.search(&records, "hotpot", None, 50).len(), 3);
    }

    #[test]
    fn random_sample_never_exceeds_pool() {
        let pool = vec![shop("a_001", "food", ""), shop("a_002", "food", "")];
        let mut sample = pick_random(&pool, 4);
        sample.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(sample, pool);
        assert!(pick_random(&[], 4).is_empty());
    }

    #[test]
    fn random_sample_is_distinct() {
        let pool: Vec<_> = (1..=10)
            .map(|n| shop(&format!("chef_{n:03}"), "food", ""))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);
        let sample = pick_random_with(&mut rng, &pool, 4);
        assert_eq!(sample.len(), 4);
        let mut unique = ids(&sample);
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn highlights_cover_each_category() {
        let engine = QueryEngine::new(["KTV"]);
        let records = vec![
            shop("chef_001", "food", ""),
            shop("ent_001", "entertainment", ""),
            shop("srv_001", "service", "KTV"),
        ];
        let highlights = engine.highlights(&records, 4);
        assert_eq!(ids(&highlights.food), vec!["chef_001"]);
        assert_eq!(highlights.entertainment.len(), 2);
        assert_eq!(ids(&highlights.service), vec!["srv_001"]);
    }
}
