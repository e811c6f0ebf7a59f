use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use captionify::application::ports::RenderError;
use captionify::infrastructure::rendering::BundleCache;

#[tokio::test]
async fn given_two_concurrent_callers_when_building_then_exactly_one_build_runs() {
    let cache = BundleCache::new();
    let builds = AtomicU32::new(0);

    let build = || async {
        builds.fetch_add(1, Ordering::SeqCst);
        // Keep the build in flight long enough for the second caller to
        // arrive while it is running.
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(PathBuf::from("bundle-dir"))
    };

    let (first, second) = tokio::join!(cache.get_or_build(build), cache.get_or_build(build));

    assert_eq!(first.unwrap(), &PathBuf::from("bundle-dir"));
    assert_eq!(second.unwrap(), &PathBuf::from("bundle-dir"));
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_built_bundle_when_calling_again_then_memo_is_reused() {
    let cache = BundleCache::new();
    let builds = AtomicU32::new(0);

    let build = || async {
        builds.fetch_add(1, Ordering::SeqCst);
        Ok(PathBuf::from("bundle-dir"))
    };

    cache.get_or_build(build).await.unwrap();
    assert!(cache.is_built());

    cache.get_or_build(build).await.unwrap();
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_failed_build_when_calling_again_then_a_fresh_build_is_attempted() {
    let cache = BundleCache::new();
    let builds = AtomicU32::new(0);

    let failing = || async {
        builds.fetch_add(1, Ordering::SeqCst);
        Err(RenderError::BundleFailed("webpack exploded".to_string()))
    };
    let result = cache.get_or_build(failing).await;
    assert!(matches!(result, Err(RenderError::BundleFailed(_))));
    assert!(!cache.is_built());

    let succeeding = || async {
        builds.fetch_add(1, Ordering::SeqCst);
        Ok(PathBuf::from("bundle-dir"))
    };
    let rebuilt = cache.get_or_build(succeeding).await.unwrap();

    assert_eq!(rebuilt, &PathBuf::from("bundle-dir"));
    assert_eq!(builds.load(Ordering::SeqCst), 2);
}
