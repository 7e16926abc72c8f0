use serde::Serialize;
use shopdir_protocol::ShopRecord;
use std::collections::HashMap;

/// One bucket of a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatEntry {
    pub name: String,
    pub count: usize,
}

/// Record counts for the admin dashboard and `/api/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub by_category: Vec<StatEntry>,
    pub by_type: Vec<StatEntry>,
}

impl CatalogStats {
    /// Count records by category and by type; buckets are ordered by count
    /// (largest first), then by name.
    pub fn collect(records: &[ShopRecord]) -> Self {
        Self {
            total: records.len(),
            by_category: tally(records.iter().map(|record| record.category.as_str())),
            by_type: tally(
                records
                    .iter()
                    .map(|record| record.shop_type.as_str())
                    .filter(|name| !name.is_empty()),
            ),
        }
    }

    /// Count for a single category name, zero when absent.
    pub fn category_count(&self, name: &str) -> usize {
        self.by_category
            .iter()
            .find(|entry| entry.name == name)
            .map_or(0, |entry| entry.count)
    }
}

fn tally<'a>(names: impl Iterator<Item = &'a str>) -> Vec<StatEntry> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in names {
        *counts.entry(name).or_default() += 1;
    }
    let mut entries: Vec<StatEntry> = counts
        .into_iter()
        .map(|(name, count)| StatEntry {
            name: name.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    entries
}

#[cfg(test)]
mod tests {
    use super::{CatalogStats, StatEntry};
    use pretty_assertions::assert_eq;
    use shopdir_protocol::{Category, ShopRecord};

    fn shop(category: &str, shop_type: &str) -> ShopRecord {
        ShopRecord {
            category: Category::from(category),
            shop_type: shop_type.to_string(),
            ..ShopRecord::default()
        }
    }

    #[test]
    fn counts_are_sorted_by_size_then_name() {
        let stats = CatalogStats::collect(&[
            shop("food", "Noodles"),
            shop("service", "Repair"),
            shop("food", "Cafe"),
            shop("entertainment", "KTV"),
            shop("food", "Noodles"),
            shop("service", ""),
        ]);
        assert_eq!(stats.total, 6);
        assert_eq!(
            stats.by_category,
            vec![
                StatEntry { name: "food".to_string(), count: 3 },
                StatEntry { name: "service".to_string(), count: 2 },
                StatEntry { name: "entertainment".to_string(), count: 1 },
            ]
        );
        assert_eq!(stats.by_type[0], StatEntry { name: "Noodles".to_string(), count: 2 });
        assert_eq!(stats.by_type.len(), 4);
        assert_eq!(stats.category_count("service"), 2);
        assert_eq!(stats.category_count("nightlife"), 0);
    }
}
