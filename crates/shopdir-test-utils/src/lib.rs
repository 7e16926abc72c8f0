//! Test helpers shared across shopdir crates.

pub mod fixtures;
pub mod sources;

pub use fixtures::{sample_csv, sample_json, sample_shops, shop};
pub use sources::{CountingSource, FailingSource, PanickingSource, StaticSource};
