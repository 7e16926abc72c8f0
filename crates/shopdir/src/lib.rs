//! Public SDK surface for shopdir.
//!
//! Re-exports the workspace crates and provides the logging setup shared by
//! the binary and embedders.

/// Re-export for convenience.
pub use shopdir_config as config;
pub use shopdir_core as core;
/// Re-export for convenience.
pub use shopdir_protocol as protocol;
pub use shopdir_server as server;

use anyhow::Context;
use log::debug;
use shopdir_config::{LayeredConfigOptions, ShopdirConfig};
use std::path::PathBuf;

/// Initialize `env_logger` from `RUST_LOG`; repeated calls are ignored.
pub fn init_logging() {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();
}

/// Resolve the effective config: the layered stack from `cwd`, with any
/// explicit paths applied last.
pub fn load_config(cwd: PathBuf, overrides: &[PathBuf]) -> anyhow::Result<ShopdirConfig> {
    let options = overrides
        .iter()
        .fold(LayeredConfigOptions::new(&cwd), |options, path| {
            options.with_runtime_path(path)
        });
    let layered = ShopdirConfig::load_layered_with_options(options)
        .with_context(|| format!("failed to load config from {}", cwd.display()))?;
    debug!("config loaded (layers={})", layered.layers.len());
    Ok(layered.config)
}
