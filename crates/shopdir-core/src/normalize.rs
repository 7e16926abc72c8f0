//! Mapping of loosely shaped input into canonical [`ShopRecord`]s.
//!
//! Every function here is total: missing, empty, `null`, or oddly typed
//! inputs fall back to field defaults and unknown fields are ignored.

use crate::csv::CsvRow;
use serde_json::{Map, Value};
use shopdir_protocol::{Category, Contact, ShopRecord, split_list};

/// Build a record from a flat spreadsheet row.
///
/// Contact details come from the flattened `contact_wechat` and
/// `contact_phone` columns; `images` is a comma-delimited cell.
pub fn normalize_row(row: &CsvRow) -> ShopRecord {
    ShopRecord {
        id: row.get("id").to_string(),
        category: Category::from(row.get("category")),
        shop_type: row.get("type").to_string(),
        name: row.get("name").to_string(),
        address: row.get("address").to_string(),
        contact: Contact {
            wechat: row.get("contact_wechat").to_string(),
            phone: row.get("contact_phone").to_string(),
        },
        description: row.get("description").to_string(),
        services: row.get("services").to_string(),
        open_time: row.get("open_time").to_string(),
        images: split_list(row.get("images")),
        menu: row.get("menu").to_string(),
        tags: row.get("tags").to_string(),
        last_update: row.get("last_update").to_string(),
    }
}

/// Normalize every row of a parsed sheet, preserving order.
pub fn normalize_rows(rows: &[CsvRow]) -> Vec<ShopRecord> {
    rows.iter().map(normalize_row).collect()
}

/// Build a record from a JSON object of any reasonable shape.
pub fn normalize_value(value: &Value) -> ShopRecord {
    let Value::Object(map) = value else {
        return ShopRecord::default();
    };
    let nested_contact = map.get("contact").and_then(Value::as_object);
    let contact_field = |nested: &str, flat: &str| {
        let from_nested = nested_contact.map(|contact| text(contact, nested));
        match from_nested {
            Some(value) if !value.is_empty() => value,
            _ => text(map, flat),
        }
    };

    ShopRecord {
        id: text(map, "id"),
        category: Category::from(text(map, "category")),
        shop_type: text(map, "type"),
        name: text(map, "name"),
        address: text(map, "address"),
        contact: Contact {
            wechat: contact_field("wechat", "contact_wechat"),
            phone: contact_field("phone", "contact_phone"),
        },
        description: text(map, "description"),
        services: text(map, "services"),
        open_time: text(map, "open_time"),
        images: list(map.get("images")),
        menu: text(map, "menu"),
        tags: tags(map.get("tags")),
        last_update: text(map, "last_update"),
    }
}

/// Normalize a JSON array of records; anything else yields no records.
pub fn normalize_values(value: &Value) -> Vec<ShopRecord> {
    match value {
        Value::Array(items) => items.iter().map(normalize_value).collect(),
        _ => Vec::new(),
    }
}

fn text(map: &Map<String, Value>, key: &str) -> String {
    map.get(key).map(scalar_text).unwrap_or_default()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(value) => value.clone(),
        Value::Number(value) => value.to_string(),
        Value::Bool(true) => "true".to_string(),
        _ => String::new(),
    }
}

fn list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(scalar_text)
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
        Some(other) => split_list(&scalar_text(other)),
        None => Vec::new(),
    }
}

fn tags(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(_)) => list(value).join(", "),
        Some(other) => scalar_text(other),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_row, normalize_value, normalize_values};
    use crate::csv::parse_csv;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use shopdir_protocol::{Category, Contact, ShopRecord};

    #[test]
    fn minimal_csv_row_fills_every_field() {
        let rows = parse_csv("id,category,type,name\nchef_001,food,Noodles,Joe's\n");
        let record = normalize_row(&rows[0]);
        assert_eq!(
            record,
            ShopRecord {
                id: "chef_001".to_string(),
                category: Category::Food,
                shop_type: "Noodles".to_string(),
                name: "Joe's".to_string(),
                ..ShopRecord::default()
            }
        );
        assert_eq!(record.contact, Contact::default());
        assert!(record.images.is_empty());
        assert_eq!(record.tags, "");
    }

    #[test]
    fn csv_images_and_flattened_contact() {
        let rows = parse_csv(concat!(
            "id,images,contact_wechat,contact_phone\n",
            "chef_002,\"002-1.jpg, ,002-2.png\",joe_wx,0113\n",
        ));
        let record = normalize_row(&rows[0]);
        assert_eq!(record.images, vec!["002-1.jpg", "002-2.png"]);
        assert_eq!(record.contact.wechat, "joe_wx");
        assert_eq!(record.contact.phone, "0113");
    }

    #[test]
    fn loose_json_is_coerced() {
        let record = normalize_value(&json!({
            "id": "srv_004",
            "category": "service",
            "type": null,
            "name": "Fixit",
            "contact_phone": 7700900123u64,
            "images": "004-1.jpg,004-2.jpg",
            "tags": ["repair", " phones ", ""],
            "unexpected": { "nested": true }
        }));
        assert_eq!(record.shop_type, "");
        assert_eq!(record.contact.phone, "7700900123");
        assert_eq!(record.images, vec!["004-1.jpg", "004-2.jpg"]);
        assert_eq!(record.tags, "repair, phones");
    }

    #[test]
    fn normalizing_canonical_json_is_identity() {
        let canonical = ShopRecord {
            id: "ent_003".to_string(),
            category: Category::Entertainment,
            shop_type: "KTV".to_string(),
            name: "Echo".to_string(),
            address: "1 Briggate".to_string(),
            contact: Contact {
                wechat: "echo".to_string(),
                phone: "0113 000".to_string(),
            },
            description: "Private rooms".to_string(),
            services: "Karaoke".to_string(),
            open_time: "18:00-02:00".to_string(),
            images: vec!["003-1.jpg".to_string()],
            menu: "ent_003-menu.pdf".to_string(),
            tags: "ktv, late".to_string(),
            last_update: "2025/01/02".to_string(),
        };
        let value = serde_json::to_value(&canonical).expect("json");
        assert_eq!(normalize_value(&value), canonical);
        let again = serde_json::to_value(normalize_value(&value)).expect("json");
        assert_eq!(normalize_value(&again), canonical);
    }

    #[test]
    fn non_array_and_non_object_inputs_are_total() {
        assert!(normalize_values(&json!({ "id": "x" })).is_empty());
        assert_eq!(normalize_value(&json!("text")), ShopRecord::default());
        assert_eq!(normalize_values(&json!([1, null])).len(), 2);
    }
}
