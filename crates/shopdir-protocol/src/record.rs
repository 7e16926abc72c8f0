use crate::Category;
use serde::{Deserialize, Serialize};

/// Contact details for a shop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub wechat: String,
    #[serde(default)]
    pub phone: String,
}

impl Contact {
    pub fn is_empty(&self) -> bool {
        self.wechat.is_empty() && self.phone.is_empty()
    }
}

/// One shop or service directory entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopRecord {
    /// `<category-prefix>_<zero-padded-sequence>`, e.g. `chef_001`.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub category: Category,
    /// Free-text subtype such as "KTV" or "Restaurant".
    #[serde(default, rename = "type")]
    pub shop_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub services: String,
    #[serde(default)]
    pub open_time: String,
    /// Image filenames, resolved under the folder named by [`ShopRecord::id_suffix`].
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub menu: String,
    /// Comma-separated tags; see [`ShopRecord::tag_list`].
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub last_update: String,
}

impl ShopRecord {
    /// Parsed, trimmed, non-empty tags in their original order.
    pub fn tag_list(&self) -> Vec<String> {
        split_list(&self.tags)
    }

    /// Numeric part of the id (`chef_001` -> `001`), used as the image folder.
    pub fn id_suffix(&self) -> &str {
        self.id.rsplit('_').next().unwrap_or_default()
    }

    /// Sequence number after the last `_` of the id, if it is numeric.
    pub fn sequence(&self) -> Option<u64> {
        let (_, suffix) = self.id.rsplit_once('_')?;
        suffix.parse().ok()
    }
}

/// Split a comma-delimited list, trimming entries and dropping empty ones.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join list entries back into the comma-delimited stored form.
pub fn join_list<S: AsRef<str>>(entries: &[S]) -> String {
    entries
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::{ShopRecord, join_list, split_list};
    use crate::Category;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn split_list_trims_and_drops_empty_entries() {
        assert_eq!(
            split_list(" spicy, ,late night ,,halal"),
            vec!["spicy", "late night", "halal"]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn split_list_is_idempotent_through_join() {
        let once = split_list("a, b ,, c");
        let twice = split_list(&join_list(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn id_suffix_and_sequence() {
        let record = ShopRecord {
            id: "chef_012".to_string(),
            ..ShopRecord::default()
        };
        assert_eq!(record.id_suffix(), "012");
        assert_eq!(record.sequence(), Some(12));

        let odd = ShopRecord {
            id: "legacy".to_string(),
            ..ShopRecord::default()
        };
        assert_eq!(odd.id_suffix(), "legacy");
        assert_eq!(odd.sequence(), None);

        let nested = ShopRecord {
            id: "chef_old_007".to_string(),
            ..ShopRecord::default()
        };
        assert_eq!(nested.id_suffix(), "007");
        assert_eq!(nested.sequence(), Some(7));
    }

    #[test]
    fn json_form_uses_type_key_and_omits_empty_menu() {
        let record = ShopRecord {
            id: "ent_001".to_string(),
            category: Category::Entertainment,
            shop_type: "KTV".to_string(),
            name: "Echo".to_string(),
            ..ShopRecord::default()
        };
        let value = serde_json::to_value(&record).expect("json");
        assert_eq!(value["type"], json!("KTV"));
        assert_eq!(value["contact"], json!({ "wechat": "", "phone": "" }));
        assert!(value.get("menu").is_none());

        let back: ShopRecord = serde_json::from_value(value).expect("record");
        assert_eq!(back, record);
    }
}
