//! End-to-end render pass scenarios against a mock feed

use httpmock::prelude::*;
use tempfile::TempDir;

use pluginlink::cache::{CacheManager, DatasetStore, FileStore, MemoryStore};
use pluginlink::data::{Dataset, LinkEntry, LinkProvider};
use pluginlink::hooks::Hooks;
use pluginlink::pass::{DatasetSource, PassRequest, RenderPass};

const FOO_FEED: &str = r#"[{"plugin":"foo/foo.php","url":"https://notion.so/foo"}]"#;

#[tokio::test]
async fn test_feed_entry_annotates_only_matching_plugin() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/links");
            then.status(200)
                .header("content-type", "application/json")
                .body(FOO_FEED);
        })
        .await;
    let provider = LinkProvider::new(Some(server.url("/links")), MemoryStore::new());

    let pass = RenderPass::begin(&provider, &PassRequest::new(true)).await;

    let foo = pass.annotate("foo/foo.php", Vec::new());
    assert_eq!(foo.len(), 1);
    assert!(foo[0].contains(r#"href="https://notion.so/foo""#));
    assert_eq!(pass.annotate("bar/bar.php", Vec::new()), Vec::<String>::new());
}

#[tokio::test]
async fn test_dataset_is_resolved_once_per_pass() {
    let server = MockServer::start_async().await;
    let feed = server
        .mock_async(|when, then| {
            when.method(GET).path("/links");
            then.status(200).body(FOO_FEED);
        })
        .await;
    let provider = LinkProvider::new(Some(server.url("/links")), MemoryStore::new());

    let pass = RenderPass::begin(&provider, &PassRequest::new(true)).await;
    for i in 0..50 {
        pass.annotate(&format!("plugin-{}/plugin.php", i), Vec::new());
    }
    pass.annotate("foo/foo.php", Vec::new());

    assert_eq!(pass.source(), DatasetSource::Live);
    feed.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_outage_degrades_to_no_annotations_and_retries_next_pass() {
    let server = MockServer::start_async().await;
    let mut outage = server
        .mock_async(|when, then| {
            when.method(GET).path("/links");
            then.status(503);
        })
        .await;
    let provider = LinkProvider::new(Some(server.url("/links")), MemoryStore::new());
    let meta = vec!["Version 1.0".to_string()];

    let degraded = RenderPass::begin(&provider, &PassRequest::new(true)).await;
    assert!(degraded.notices().is_empty());
    assert!(degraded.annotate("foo/foo.php", meta.clone()).is_empty());

    outage.delete_async().await;
    let recovered_feed = server
        .mock_async(|when, then| {
            when.method(GET).path("/links");
            then.status(200).body(FOO_FEED);
        })
        .await;

    let recovered = RenderPass::begin(&provider, &PassRequest::new(true)).await;
    assert_eq!(recovered.source(), DatasetSource::Live);
    assert_eq!(recovered.annotate("foo/foo.php", meta.clone()).len(), 2);
    recovered_feed.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_cache_bust_query_refetches_feed() {
    let cache_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;
    let feed = server
        .mock_async(|when, then| {
            when.method(GET).path("/links");
            then.status(200).body(FOO_FEED);
        })
        .await;
    let store = FileStore::new(CacheManager::with_dir(cache_dir.path().to_path_buf()));
    store
        .write(&Dataset::from(vec![LinkEntry::new(
            "foo/foo.php",
            "https://notion.so/stale",
        )]))
        .unwrap();
    let provider = LinkProvider::new(Some(server.url("/links")), store);

    let cached = RenderPass::begin(&provider, &PassRequest::from_query("plugin_status=all", true)).await;
    assert_eq!(cached.source(), DatasetSource::Cache);
    assert!(cached.annotate("foo/foo.php", Vec::new())[0].contains("notion.so/stale"));

    let busted = RenderPass::begin(&provider, &PassRequest::from_query("?cacheBust=1", true)).await;
    assert_eq!(busted.source(), DatasetSource::Live);
    assert!(busted.annotate("foo/foo.php", Vec::new())[0].contains("notion.so/foo"));
    feed.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_hooks_shape_request_dataset_and_markup() {
    let server = MockServer::start_async().await;
    let feed = server
        .mock_async(|when, then| {
            when.method(GET).path("/links").header("x-site", "main");
            then.status(200).body(
                r#"[
                    {"plugin":"foo/foo.php","url":"https://notion.so/foo"},
                    {"plugin":"bar/bar.php","url":"http://insecure.test/bar"}
                ]"#,
            );
        })
        .await;
    let hooks = Hooks::new()
        .with_request_options(|options| options.header("X-Site", "main"))
        .with_dataset(|dataset| {
            dataset
                .into_iter()
                .filter(|entry| entry.url.starts_with("https://"))
                .collect()
        })
        .with_link_html(|html| format!(r#"<span class="plugin-link">{}</span>"#, html));
    let provider = LinkProvider::new(Some(server.url("/links")), MemoryStore::new()).with_hooks(hooks);

    let pass = RenderPass::begin(&provider, &PassRequest::new(true)).await;

    let foo = pass.annotate("foo/foo.php", Vec::new());
    assert!(foo[0].starts_with(r#"<span class="plugin-link"><a href="https://notion.so/foo""#));
    assert!(pass.annotate("bar/bar.php", Vec::new()).is_empty());
    assert_eq!(provider.store().read().map(|d| d.len()), Some(1));
    feed.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_unauthorized_viewer_keeps_existing_meta() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/links");
            then.status(200).body(FOO_FEED);
        })
        .await;
    let provider = LinkProvider::new(Some(server.url("/links")), MemoryStore::new());
    let meta = vec!["Version 3.2".to_string(), "By Example".to_string()];

    let pass = RenderPass::begin(&provider, &PassRequest::new(false)).await;

    assert_eq!(pass.annotate("foo/foo.php", meta.clone()), meta);
}
