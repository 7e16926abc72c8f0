//! Data pipeline for the shop directory.
//!
//! This crate owns CSV parsing, record normalization, the fallback-aware
//! loader and its cache, category and text queries, page rendering, and the
//! admin editor used by the server and the CLI.

pub mod csv;
pub mod editor;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod query;
pub mod render;
pub mod source;
pub mod state;
pub mod stats;

pub use csv::{CsvRow, parse_csv};
/// Admin editing surface.
pub use editor::{ShopDraft, ShopEditor, SubmitOutcome, UploadedImage, image_file_name};
pub use error::{EditorError, SourceError};
/// Loader, cache, and load diagnostics.
pub use loader::{DataOrigin, LoadReport, ShopCache, ShopLoader};
pub use normalize::{normalize_row, normalize_rows, normalize_value, normalize_values};
pub use query::{
    Highlights, QueryEngine, SearchScope, filter_text, matches_text, pick_random,
    pick_random_with,
};
pub use render::{Renderer, escape_html};
/// Data sources the loader can chain.
pub use source::{
    JsonFileSource, JsonUrlSource, SheetCsvSource, ShopSource, fallback_source, http_client,
    records_from_json,
};
pub use state::{DetailView, ListingState, PageQuery, SearchState, SearchView};
pub use stats::{CatalogStats, StatEntry};
