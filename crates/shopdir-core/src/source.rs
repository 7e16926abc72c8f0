//! Data sources the loader can pull shop records from.

use crate::csv::parse_csv;
use crate::error::SourceError;
use crate::normalize::{normalize_rows, normalize_values};
use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use shopdir_config::{FallbackConfig, SheetConfig};
use shopdir_protocol::ShopRecord;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// A place shop records can be fetched from.
#[async_trait]
pub trait ShopSource: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &str;

    /// Fetch and normalize the full record set.
    async fn fetch(&self) -> Result<Vec<ShopRecord>, SourceError>;
}

/// Build an HTTP client with an explicit overall timeout.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, SourceError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Public CSV export of a spreadsheet tab.
#[derive(Debug, Clone)]
pub struct SheetCsvSource {
    client: reqwest::Client,
    url: String,
}

impl SheetCsvSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Source for the configured sheet, using its timeout.
    pub fn from_config(config: &SheetConfig) -> Result<Self, SourceError> {
        let client = http_client(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::new(client, config.export_url()))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ShopSource for SheetCsvSource {
    fn name(&self) -> &str {
        "sheet"
    }

    async fn fetch(&self) -> Result<Vec<ShopRecord>, SourceError> {
        let body = get_text(&self.client, &self.url).await?;
        let rows = parse_csv(&body);
        debug!("parsed sheet export (rows={})", rows.len());
        Ok(normalize_rows(&rows))
    }
}

/// Bundled JSON array on the local filesystem.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ShopSource for JsonFileSource {
    fn name(&self) -> &str {
        "bundled-file"
    }

    async fn fetch(&self) -> Result<Vec<ShopRecord>, SourceError> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        records_from_json(&contents)
    }
}

/// Bundled JSON array served over HTTP.
#[derive(Debug, Clone)]
pub struct JsonUrlSource {
    client: reqwest::Client,
    url: String,
}

impl JsonUrlSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ShopSource for JsonUrlSource {
    fn name(&self) -> &str {
        "bundled-url"
    }

    async fn fetch(&self) -> Result<Vec<ShopRecord>, SourceError> {
        let body = get_text(&self.client, &self.url).await?;
        records_from_json(&body)
    }
}

/// Pick the bundled-data source for a location: http(s) URLs are fetched,
/// anything else is read as a local path.
pub fn fallback_source(
    config: &FallbackConfig,
    client: reqwest::Client,
) -> Arc<dyn ShopSource> {
    let location = config.location.trim();
    if location.starts_with("http://") || location.starts_with("https://") {
        Arc::new(JsonUrlSource::new(client, location))
    } else {
        Arc::new(JsonFileSource::new(location))
    }
}

/// Decode a JSON array of records. A top-level non-array is malformed.
pub fn records_from_json(contents: &str) -> Result<Vec<ShopRecord>, SourceError> {
    let value: Value = serde_json::from_str(strip_bom(contents))?;
    if !value.is_array() {
        return Err(SourceError::Malformed(
            "expected a JSON array of shops".to_string(),
        ));
    }
    Ok(normalize_values(&value))
}

/// Drop a leading UTF-8 byte-order mark.
pub(crate) fn strip_bom(contents: &str) -> &str {
    contents.strip_prefix('\u{feff}').unwrap_or(contents)
}

async fn get_text(client: &reqwest::Client, url: &str) -> Result<String, SourceError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::{fallback_source, records_from_json};
    use crate::error::SourceError;
    use pretty_assertions::assert_eq;
    use shopdir_config::FallbackConfig;

    #[test]
    fn non_array_json_is_malformed() {
        let err = records_from_json(r#"{ "shops": [] }"#).unwrap_err();
        assert!(matches!(err, SourceError::Malformed(_)));
        assert!(matches!(
            records_from_json("not json").unwrap_err(),
            SourceError::Malformed(_)
        ));
    }

    #[test]
    fn leading_byte_order_mark_is_ignored() {
        let records =
            records_from_json("\u{feff}[{\"id\": \"chef_001\", \"name\": \"Noodles\"}]")
                .expect("records");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "chef_001");
    }

    #[test]
    fn fallback_location_picks_source_kind() {
        let client = reqwest::Client::new();
        let remote = FallbackConfig {
            enabled: true,
            location: "https://cdn.example/shops.json".to_string(),
        };
        let local = FallbackConfig::default();
        assert_eq!(fallback_source(&remote, client.clone()).name(), "bundled-url");
        assert_eq!(fallback_source(&local, client).name(), "bundled-file");
    }
}
