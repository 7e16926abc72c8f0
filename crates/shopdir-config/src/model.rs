//! Configuration schema for the shop directory.

use serde::{Deserialize, Serialize};

/// Default spreadsheet export host.
pub const DEFAULT_SHEET_HOST: &str = "https://docs.google.com/spreadsheets/d";
/// Default location of the bundled shop list.
pub const DEFAULT_FALLBACK_LOCATION: &str = "data/shops.json";

/// Root config.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ShopdirConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub sheet: SheetConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Remote spreadsheet CSV export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_sheet_host")]
    pub host: String,
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub tab_id: u64,
    /// Request timeout for the export download.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl SheetConfig {
    /// Public CSV export URL for the configured sheet tab.
    pub fn export_url(&self) -> String {
        format!(
            "{}/{}/export?format=csv&gid={}",
            self.host.trim_end_matches('/'),
            self.spreadsheet_id,
            self.tab_id
        )
    }

    /// Whether the remote source should be attempted at all.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.spreadsheet_id.trim().is_empty()
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: default_sheet_host(),
            spreadsheet_id: String::new(),
            tab_id: 0,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Bundled JSON fallback settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Local path or http(s) URL of the bundled JSON array.
    #[serde(default = "default_fallback_location")]
    pub location: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            location: default_fallback_location(),
        }
    }
}

/// Listing and search behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// `type` values that also count as entertainment.
    #[serde(default = "default_extra_types")]
    pub entertainment_extra_types: Vec<String>,
    /// Number of records sampled per category on the home page.
    #[serde(default = "default_highlight_count")]
    pub highlight_count: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            entertainment_extra_types: default_extra_types(),
            highlight_count: default_highlight_count(),
        }
    }
}

/// Where rendered pages point for images, menus, and detail links.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetsConfig {
    #[serde(default = "default_image_root")]
    pub image_root: String,
    #[serde(default = "default_menu_root")]
    pub menu_root: String,
    #[serde(default = "default_detail_page")]
    pub detail_page: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            image_root: default_image_root(),
            menu_root: default_menu_root(),
            detail_page: default_detail_page(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Allowed CORS origins; `"*"` allows any.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sheet_host() -> String {
    DEFAULT_SHEET_HOST.to_string()
}

fn default_timeout_secs() -> u64 {
    8
}

fn default_fallback_location() -> String {
    DEFAULT_FALLBACK_LOCATION.to_string()
}

fn default_extra_types() -> Vec<String> {
    vec!["KTV".to_string()]
}

fn default_highlight_count() -> usize {
    4
}

fn default_image_root() -> String {
    "assets/images".to_string()
}

fn default_menu_root() -> String {
    "assets/menus".to_string()
}

fn default_detail_page() -> String {
    "details.html".to_string()
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
