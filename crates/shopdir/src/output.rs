//! Text and JSON printing for CLI results.

use serde::Serialize;
use shopdir::core::{CatalogStats, Highlights};
use shopdir::protocol::ShopRecord;

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One line per shop: id, category, type, name.
pub(crate) fn records(records: &[ShopRecord], json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(records);
    }
    if records.is_empty() {
        println!("no shops found");
    }
    for record in records {
        println!("{}", summary_line(record));
    }
    Ok(())
}

pub(crate) fn record(record: &ShopRecord, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(record);
    }
    for (label, value) in detail_lines(record) {
        println!("{label:<12} {value}");
    }
    Ok(())
}

pub(crate) fn highlights(highlights: &Highlights, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(highlights);
    }
    let sections = [
        ("food", &highlights.food),
        ("entertainment", &highlights.entertainment),
        ("service", &highlights.service),
    ];
    for (title, shops) in sections {
        println!("[{title}]");
        for record in shops.iter() {
            println!("  {}", summary_line(record));
        }
    }
    Ok(())
}

pub(crate) fn stats(stats: &CatalogStats, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(stats);
    }
    println!("total: {}", stats.total);
    println!("by category:");
    for entry in &stats.by_category {
        println!("  {:<16} {}", entry.name, entry.count);
    }
    println!("by type:");
    for entry in &stats.by_type {
        println!("  {:<16} {}", entry.name, entry.count);
    }
    Ok(())
}

fn summary_line(record: &ShopRecord) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        record.id, record.category, record.shop_type, record.name
    )
}

/// Labelled fields of a record, skipping empty ones.
fn detail_lines(record: &ShopRecord) -> Vec<(&'static str, String)> {
    let fields = [
        ("id", record.id.clone()),
        ("name", record.name.clone()),
        ("category", record.category.to_string()),
        ("type", record.shop_type.clone()),
        ("address", record.address.clone()),
        ("hours", record.open_time.clone()),
        ("services", record.services.clone()),
        ("wechat", record.contact.wechat.clone()),
        ("phone", record.contact.phone.clone()),
        ("description", record.description.clone()),
        ("tags", record.tag_list().join(" / ")),
        ("images", record.images.join(", ")),
        ("menu", record.menu.clone()),
        ("updated", record.last_update.clone()),
    ];
    fields
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
}
