//! Minimal CSV reader for spreadsheet exports.
//!
//! Rows are split on newlines, so quoted fields cannot span lines. A double
//! quote only toggles the in-quotes state and is dropped from the output;
//! escaped quotes (`""`) are not recognized and simply toggle twice.

use std::collections::BTreeMap;

/// One data row keyed by trimmed header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    fields: BTreeMap<String, String>,
}

impl CsvRow {
    /// Value for a header, or `""` when the column is absent.
    pub fn get(&self, header: &str) -> &str {
        self.fields.get(header).map(String::as_str).unwrap_or_default()
    }

    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(header.into(), value.into());
    }

    fn has_content(&self) -> bool {
        self.fields.values().any(|value| !value.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CsvRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = CsvRow::default();
        for (header, value) in iter {
            row.insert(header, value);
        }
        row
    }
}

/// Parse CSV text whose first line is the header row.
///
/// Returns an empty list when there is no data row. Rows whose values are
/// all empty (blank lines, trailing separators) are skipped; missing trailing
/// values read as `""`.
pub fn parse_csv(text: &str) -> Vec<CsvRow> {
    let mut lines = text.trim().split('\n').map(|line| line.trim_end_matches('\r'));
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = split_csv_line(header_line)
        .into_iter()
        .map(|header| header.trim().to_string())
        .collect();

    lines
        .map(|line| {
            let values = split_csv_line(line);
            headers
                .iter()
                .enumerate()
                .map(|(idx, header)| {
                    let value = values.get(idx).map(|value| value.trim()).unwrap_or_default();
                    (header.clone(), value.to_string())
                })
                .collect::<CsvRow>()
        })
        .filter(CsvRow::has_content)
        .collect()
}

/// Split a single CSV line into raw (untrimmed) fields.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut inside_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => inside_quotes = !inside_quotes,
            ',' if !inside_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}
