//! Layered configuration loader.
//!
//! Discovers configuration layers (user/project/cwd/repo/runtime), validates
//! each against the schema, merges them in precedence order, and produces the
//! effective `ShopdirConfig`.

mod layer_io;
mod merge;
mod schema;
mod utils;

#[cfg(test)]
mod tests;

use crate::{ConfigError, ShopdirConfig};
use log::{debug, info};
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default config filename in local layers.
const DEFAULT_CONFIG_FILE: &str = "shopdir.json5";
/// Default config directory under user or repo roots.
const DEFAULT_CONFIG_DIR: &str = ".shopdir";
/// Marker files/dirs that identify a project root.
const DEFAULT_PROJECT_ROOT_MARKERS: &[&str] = &[".git"];

/// Effective config plus metadata about which layers were loaded.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// The merged, validated config.
    pub config: ShopdirConfig,
    /// Metadata for each layer that contributed to the result.
    pub layers: Vec<ConfigLayer>,
}

/// Origin for a single config layer in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    /// User-specific configuration.
    User,
    /// Project root configuration.
    Project,
    /// Current working directory configuration.
    Cwd,
    /// `.shopdir/` directory under the project root.
    Repo,
    /// Explicit overrides (highest precedence).
    Runtime,
}

impl ConfigLayerSource {
    fn label(self) -> &'static str {
        match self {
            ConfigLayerSource::User => "user",
            ConfigLayerSource::Project => "project",
            ConfigLayerSource::Cwd => "cwd",
            ConfigLayerSource::Repo => "repo",
            ConfigLayerSource::Runtime => "runtime",
        }
    }
}

/// Metadata about a loaded config layer.
#[derive(Debug, Clone)]
pub struct ConfigLayer {
    pub source: ConfigLayerSource,
    pub path: PathBuf,
}

/// Options controlling layered config discovery and overrides.
#[derive(Debug, Clone)]
pub struct LayeredConfigOptions {
    /// Working directory used to find local layers.
    pub cwd: PathBuf,
    /// Optional user config path (defaults to `~/.shopdir/shopdir.json5`).
    pub user_config_path: Option<PathBuf>,
    /// Override config paths applied last, in order.
    pub runtime_paths: Vec<PathBuf>,
    /// Marker files/dirs used to detect the project root.
    pub project_root_markers: Vec<String>,
}

impl LayeredConfigOptions {
    /// Create options with default layer locations for the provided cwd.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            user_config_path: layer_io::default_user_config_path(),
            runtime_paths: Vec::new(),
            project_root_markers: DEFAULT_PROJECT_ROOT_MARKERS
                .iter()
                .map(|marker| marker.to_string())
                .collect(),
        }
    }

    /// Add an override config path that is applied last.
    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }
}

impl ShopdirConfig {
    /// Load a single config from a path (no layering).
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("loading config from path: {}", path.display());
        let layer = layer_io::read_layer(ConfigLayerSource::Runtime, path)?;
        config_from_value(layer.value)
    }

    /// Load a single config from JSON5 contents (no layering).
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value = layer_io::parse_json5(contents, "config")?;
        schema::validate_layer(&value, "config")?;
        config_from_value(value)
    }

    /// Load a layered config stack using the default layer locations.
    pub fn load_layered(cwd: impl AsRef<Path>) -> Result<LayeredConfig, ConfigError> {
        Self::load_layered_with_options(LayeredConfigOptions::new(cwd))
    }

    /// Load a layered config stack using explicit layer locations.
    ///
    /// Precedence (low -> high): user, project, cwd, repo, runtime overrides.
    pub fn load_layered_with_options(
        options: LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        let cwd = utils::normalize_path(&options.cwd)?;
        let project_root = utils::find_project_root(&cwd, &options.project_root_markers);
        match project_root.as_ref() {
            Some(root) => debug!("resolved project root: {}", root.display()),
            None => debug!("project root not found; skipping project/repo layers"),
        }

        let mut candidates = Vec::new();
        if let Some(path) = options.user_config_path.clone() {
            candidates.push((ConfigLayerSource::User, path));
        }
        if let Some(root) = project_root.as_ref() {
            candidates.push((ConfigLayerSource::Project, root.join(DEFAULT_CONFIG_FILE)));
        }
        candidates.push((ConfigLayerSource::Cwd, cwd.join(DEFAULT_CONFIG_FILE)));
        if let Some(root) = project_root.as_ref() {
            candidates.push((
                ConfigLayerSource::Repo,
                root.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILE),
            ));
        }

        let mut merged = Value::Object(serde_json::Map::new());
        let mut layers = Vec::new();
        let mut seen = HashSet::new();

        for (source, path) in candidates {
            if !path.exists() {
                debug!(
                    "skipping missing layer (source={:?}, path={})",
                    source,
                    path.display()
                );
                continue;
            }
            // The project root and the cwd are often the same directory.
            if !seen.insert(utils::unique_path(&path)) {
                debug!("skipping duplicate layer (path={})", path.display());
                continue;
            }
            let layer = layer_io::read_layer(source, &path)?;
            merge::merge_json_values(&mut merged, &layer.value);
            layers.push(layer.meta);
        }

        // Runtime paths are explicit, so a missing file is an error.
        for path in &options.runtime_paths {
            let layer = layer_io::read_layer(ConfigLayerSource::Runtime, path)?;
            merge::merge_json_values(&mut merged, &layer.value);
            layers.push(layer.meta);
        }

        let config = config_from_value(merged)?;
        info!("layered config loaded (layers={})", layers.len());
        Ok(LayeredConfig { config, layers })
    }

    /// Validate invariants that cannot be expressed in serde.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sheet.timeout_secs == 0 {
            return Err(ConfigError::InvalidField {
                path: "sheet.timeout_secs".to_string(),
                message: "timeout must be at least one second".to_string(),
            });
        }
        if self.sheet.enabled && self.sheet.host.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                path: "sheet.host".to_string(),
                message: "host cannot be empty while the sheet is enabled".to_string(),
            });
        }
        if self.fallback.enabled && self.fallback.location.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                path: "fallback.location".to_string(),
                message: "location cannot be empty while the fallback is enabled".to_string(),
            });
        }
        Ok(())
    }
}

/// A layer read from disk and schema-checked.
#[derive(Debug, Clone)]
struct LoadedLayer {
    meta: ConfigLayer,
    value: Value,
}

fn config_from_value(value: Value) -> Result<ShopdirConfig, ConfigError> {
    let config: ShopdirConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}
