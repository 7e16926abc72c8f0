use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level shop category.
///
/// Values outside the fixed set are kept verbatim in [`Category::Other`] so a
/// record round-trips unchanged; they simply never match a category selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Food,
    Entertainment,
    Service,
    Other(String),
}

impl Category {
    /// The three selectable categories, in display order.
    pub const SELECTABLE: [Category; 3] =
        [Category::Food, Category::Entertainment, Category::Service];

    /// Parse a selectable category, returning `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        match Self::from(value) {
            Category::Other(_) => None,
            category => Some(category),
        }
    }

    /// Wire value of the category.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Food => "food",
            Category::Entertainment => "entertainment",
            Category::Service => "service",
            Category::Other(value) => value.as_str(),
        }
    }

    /// Id prefix used when generating record ids for this category.
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Category::Food => Some("chef"),
            Category::Entertainment => Some("ent"),
            Category::Service => Some("srv"),
            Category::Other(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other(String::new())
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        match value {
            "food" => Category::Food,
            "entertainment" => Category::Entertainment,
            "service" => Category::Service,
            other => Category::Other(other.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "food" | "entertainment" | "service" => Category::from(value.as_str()),
            _ => Category::Other(value),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(value) => value,
            category => category.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
