//! Data loader with remote-then-bundled fallback and a session cache.

use crate::error::SourceError;
use crate::source::{ShopSource, SheetCsvSource, fallback_source, http_client};
use futures_util::FutureExt;
use log::{debug, info, warn};
use parking_lot::RwLock;
use shopdir_config::ShopdirConfig;
use shopdir_protocol::ShopRecord;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Memoized record set shared by everything that reads shop data.
///
/// Nothing expires it; [`ShopCache::reset`] is the only way to force a refetch.
#[derive(Debug, Default)]
pub struct ShopCache {
    records: RwLock<Option<Arc<Vec<ShopRecord>>>>,
}

impl ShopCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Arc<Vec<ShopRecord>>> {
        self.records.read().clone()
    }

    pub fn store(&self, records: Vec<ShopRecord>) -> Arc<Vec<ShopRecord>> {
        let records = Arc::new(records);
        *self.records.write() = Some(records.clone());
        records
    }

    pub fn reset(&self) {
        *self.records.write() = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.records.read().is_some()
    }
}

/// Where the effective record set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    /// Served from the cache without touching any source.
    Cache,
    /// The remote spreadsheet export.
    Remote,
    /// The bundled JSON file.
    Fallback,
    /// Every source failed; the set is empty and was not cached.
    Empty,
}

/// Records plus a note on which source produced them.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub records: Arc<Vec<ShopRecord>>,
    pub origin: DataOrigin,
}

/// Produces the effective record set for a session.
///
/// The remote source is tried first and only counts when it yields at least
/// one record; otherwise the fallback is used even if it is empty. Loads are
/// serialized, so concurrent callers share a single fetch.
pub struct ShopLoader {
    remote: Option<Arc<dyn ShopSource>>,
    fallback: Option<Arc<dyn ShopSource>>,
    cache: Arc<ShopCache>,
    in_flight: Mutex<()>,
}

impl ShopLoader {
    /// A loader with no sources; add them with the `with_*` methods.
    pub fn new(cache: Arc<ShopCache>) -> Self {
        Self {
            remote: None,
            fallback: None,
            cache,
            in_flight: Mutex::new(()),
        }
    }

    pub fn with_remote(mut self, source: Arc<dyn ShopSource>) -> Self {
        self.remote = Some(source);
        self
    }

    pub fn with_fallback(mut self, source: Arc<dyn ShopSource>) -> Self {
        self.fallback = Some(source);
        self
    }

    /// Wire sources from config: the sheet when it has an id and is enabled,
    /// the bundled JSON when the fallback is enabled.
    pub fn from_config(
        config: &ShopdirConfig,
        cache: Arc<ShopCache>,
    ) -> Result<Self, SourceError> {
        let mut loader = Self::new(cache);
        if config.sheet.is_active() {
            let sheet = SheetCsvSource::from_config(&config.sheet)?;
            info!("remote sheet source: {}", sheet.url());
            loader = loader.with_remote(Arc::new(sheet));
        } else {
            debug!("remote sheet disabled or not configured");
        }
        if config.fallback.enabled {
            let client = http_client(Duration::from_secs(config.sheet.timeout_secs))?;
            loader = loader.with_fallback(fallback_source(&config.fallback, client));
        }
        Ok(loader)
    }

    pub fn cache(&self) -> &Arc<ShopCache> {
        &self.cache
    }

    /// Effective record set; never fails, at worst returns an empty set.
    pub async fn load(&self) -> Arc<Vec<ShopRecord>> {
        self.load_with_report().await.records
    }

    /// Like [`ShopLoader::load`], also reporting which source answered.
    pub async fn load_with_report(&self) -> LoadReport {
        if let Some(records) = self.cache.get() {
            return LoadReport {
                records,
                origin: DataOrigin::Cache,
            };
        }

        let _guard = self.in_flight.lock().await;
        // Another caller may have finished loading while we waited.
        if let Some(records) = self.cache.get() {
            return LoadReport {
                records,
                origin: DataOrigin::Cache,
            };
        }

        if let Some(remote) = self.remote.as_ref() {
            match attempt(remote.as_ref()).await {
                Some(records) if !records.is_empty() => {
                    info!("loaded {} shops from {}", records.len(), remote.name());
                    return LoadReport {
                        records: self.cache.store(records),
                        origin: DataOrigin::Remote,
                    };
                }
                Some(_) => warn!("{} returned no shops", remote.name()),
                None => {}
            }
        }

        if let Some(fallback) = self.fallback.as_ref() {
            if let Some(records) = attempt(fallback.as_ref()).await {
                info!("loaded {} shops from {}", records.len(), fallback.name());
                return LoadReport {
                    records: self.cache.store(records),
                    origin: DataOrigin::Fallback,
                };
            }
        }

        warn!("no shop data available from any source");
        LoadReport {
            records: Arc::new(Vec::new()),
            origin: DataOrigin::Empty,
        }
    }

    /// Drop the cached set and load again.
    pub async fn reload(&self) -> LoadReport {
        self.cache.reset();
        self.load_with_report().await
    }
}

/// Run one source, turning errors and panics into `None`.
async fn attempt(source: &dyn ShopSource) -> Option<Vec<ShopRecord>> {
    let outcome = AssertUnwindSafe(source.fetch())
        .catch_unwind()
        .await
        .unwrap_or_else(|payload| Err(SourceError::Panicked(panic_message(payload.as_ref()))));
    match outcome {
        Ok(records) => Some(records),
        Err(err) => {
            warn!("{} unavailable: {err}", source.name());
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
