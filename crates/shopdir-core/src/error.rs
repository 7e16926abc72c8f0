//! Error types for the core crate.

use thiserror::Error;

/// Why a data source could not produce records.
///
/// These never escape [`crate::ShopLoader::load`]; they are logged and the
/// loader moves on to the next source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network or client failure, including timeouts.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },
    /// Reading a local file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The payload could not be decoded.
    #[error("malformed data: {0}")]
    Malformed(String),
    /// The source panicked while fetching.
    #[error("source panicked: {0}")]
    Panicked(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Malformed(err.to_string())
    }
}

/// Errors returned by admin editor operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Required form fields are empty; nothing was saved.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    /// The category is not one of the selectable categories.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    /// No record has the given id.
    #[error("unknown shop: {0}")]
    UnknownShop(String),
    /// The highest existing id for the prefix leaves no next sequence.
    #[error("no free id left for prefix {0}")]
    IdsExhausted(String),
    /// An uploaded file is not an image.
    #[error("not an image: {0}")]
    NotAnImage(String),
    /// IO error while opening or exporting a data file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
