//! Loader fallback-chain and cache behavior.

use pretty_assertions::assert_eq;
use shopdir_core::{DataOrigin, ShopCache, ShopLoader, ShopSource};
use shopdir_test_utils::{
    CountingSource, FailingSource, PanickingSource, StaticSource, sample_shops, shop,
};
use std::sync::Arc;

fn loader() -> ShopLoader {
    ShopLoader::new(Arc::new(ShopCache::new()))
}

/// A failing remote must fall back to the bundled data unchanged.
#[tokio::test]
async fn failing_remote_uses_fallback() {
    let loader = loader()
        .with_remote(Arc::new(FailingSource::new("sheet")))
        .with_fallback(Arc::new(StaticSource::new("bundled", sample_shops())));

    let report = loader.load_with_report().await;
    assert_eq!(report.origin, DataOrigin::Fallback);
    assert_eq!(report.records.as_slice(), sample_shops().as_slice());
}

#[tokio::test]
async fn panicking_remote_is_isolated() {
    let loader = loader()
        .with_remote(Arc::new(PanickingSource::new("sheet")))
        .with_fallback(Arc::new(StaticSource::new("bundled", sample_shops())));

    let report = loader.load_with_report().await;
    assert_eq!(report.origin, DataOrigin::Fallback);
    assert_eq!(report.records.len(), sample_shops().len());
}

#[tokio::test]
async fn empty_remote_counts_as_failure() {
    let fallback = vec![shop("chef_001", "food", "Noodles", "Joe's")];
    let loader = loader()
        .with_remote(Arc::new(StaticSource::empty("sheet")))
        .with_fallback(Arc::new(StaticSource::new("bundled", fallback.clone())));

    assert_eq!(loader.load().await.as_slice(), fallback.as_slice());
}

#[tokio::test]
async fn non_empty_remote_wins() {
    let remote = vec![shop("ent_001", "entertainment", "Bar", "Owl")];
    let fallback = Arc::new(CountingSource::new(Arc::new(StaticSource::new(
        "bundled",
        sample_shops(),
    ))));
    let loader = loader()
        .with_remote(Arc::new(StaticSource::new("sheet", remote.clone())))
        .with_fallback(fallback.clone());

    let report = loader.load_with_report().await;
    assert_eq!(report.origin, DataOrigin::Remote);
    assert_eq!(report.records.as_slice(), remote.as_slice());
    assert_eq!(fallback.calls(), 0);
}

#[tokio::test]
async fn total_failure_is_empty_and_not_cached() {
    let remote = Arc::new(CountingSource::new(Arc::new(FailingSource::new("sheet"))));
    let fallback = Arc::new(CountingSource::new(Arc::new(PanickingSource::new(
        "bundled",
    ))));
    let loader = loader()
        .with_remote(remote.clone())
        .with_fallback(fallback.clone());

    let report = loader.load_with_report().await;
    assert_eq!(report.origin, DataOrigin::Empty);
    assert!(report.records.is_empty());
    assert!(!loader.cache().is_loaded());

    loader.load().await;
    assert_eq!(remote.calls(), 2);
    assert_eq!(fallback.calls(), 2);
}

#[tokio::test]
async fn successful_load_is_memoized_until_reset() {
    let remote = Arc::new(CountingSource::new(Arc::new(StaticSource::new(
        "sheet",
        sample_shops(),
    ))));
    let loader = loader().with_remote(remote.clone());

    let first = loader.load().await;
    let second = loader.load_with_report().await;
    assert_eq!(second.origin, DataOrigin::Cache);
    assert!(Arc::ptr_eq(&first, &second.records));
    assert_eq!(remote.calls(), 1);

    let reloaded = loader.reload().await;
    assert_eq!(reloaded.origin, DataOrigin::Remote);
    assert_eq!(remote.calls(), 2);
}

#[tokio::test]
async fn concurrent_loads_share_one_fetch() {
    let remote = Arc::new(CountingSource::new(Arc::new(StaticSource::new(
        "sheet",
        sample_shops(),
    ))));
    let loader = Arc::new(loader().with_remote(remote.clone()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let loader = loader.clone();
            tokio::spawn(async move { loader.load().await.len() })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.expect("join"), sample_shops().len());
    }
    assert_eq!(remote.calls(), 1);
}

#[tokio::test]
async fn shared_cache_spans_loaders() {
    let cache = Arc::new(ShopCache::new());
    let source: Arc<dyn ShopSource> = Arc::new(StaticSource::new("sheet", sample_shops()));
    let first = ShopLoader::new(cache.clone()).with_remote(source);
    first.load().await;

    let second = ShopLoader::new(cache).with_remote(Arc::new(FailingSource::new("sheet")));
    let report = second.load_with_report().await;
    assert_eq!(report.origin, DataOrigin::Cache);
    assert_eq!(report.records.len(), sample_shops().len());
}

#[tokio::test]
async fn fallback_disabled_yields_empty() {
    let loader = loader().with_remote(Arc::new(FailingSource::with_status("sheet", 404)));
    assert!(loader.load().await.is_empty());
}
