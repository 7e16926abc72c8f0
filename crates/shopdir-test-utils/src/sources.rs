use async_trait::async_trait;
use parking_lot::Mutex;
use shopdir_core::{ShopSource, SourceError};
use shopdir_protocol::ShopRecord;
use std::sync::Arc;

/// Always returns the same records.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    name: String,
    records: Vec<ShopRecord>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, records: Vec<ShopRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

#[async_trait]
impl ShopSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<ShopRecord>, SourceError> {
        Ok(self.records.clone())
    }
}

/// Always fails with a non-success status.
#[derive(Debug, Clone)]
pub struct FailingSource {
    name: String,
    status: u16,
}

impl FailingSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_status(name, 503)
    }

    pub fn with_status(name: impl Into<String>, status: u16) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}

#[async_trait]
impl ShopSource for FailingSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<ShopRecord>, SourceError> {
        Err(SourceError::Status {
            url: format!("stub://{}", self.name),
            status: self.status,
        })
    }
}

/// Panics on every fetch.
#[derive(Debug, Clone)]
pub struct PanickingSource {
    name: String,
}

impl PanickingSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl ShopSource for PanickingSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<ShopRecord>, SourceError> {
        panic!("{} blew up while parsing", self.name)
    }
}

/// Wraps another source and counts how often it is fetched.
#[derive(Clone)]
pub struct CountingSource {
    inner: Arc<dyn ShopSource>,
    calls: Arc<Mutex<usize>>,
}

impl CountingSource {
    pub fn new(inner: Arc<dyn ShopSource>) -> Self {
        Self {
            inner,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl ShopSource for CountingSource {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn fetch(&self) -> Result<Vec<ShopRecord>, SourceError> {
        *self.calls.lock() += 1;
        self.inner.fetch().await
    }
}
