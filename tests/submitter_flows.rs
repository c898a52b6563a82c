//! End-to-end tests for the submission facade over an in-memory transport.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::{example_urls, sitemap_index, test_config, urlset, FakeTransport, PostOutcome};
use indexnow_submitter::sitemap::parse_timestamp;
use indexnow_submitter::{
    Analytics, Config, IndexNowError, IndexNowSubmitter, SitemapError, SitemapParser,
};

const SITEMAP: &str = "https://www.example.com/sitemap.xml";

fn submitter(config: Config, transport: &Arc<FakeTransport>) -> IndexNowSubmitter {
    IndexNowSubmitter::with_transport(config, transport.clone()).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_single_url_is_sent_once_within_ttl() {
    let transport = Arc::new(FakeTransport::new());
    let mut submitter = submitter(test_config(100, 0, 60), &transport);
    let url = "https://www.example.com/a";

    submitter.submit_single_url(url).await.unwrap();
    submitter.submit_single_url(url).await.unwrap();

    assert_eq!(transport.post_count(), 1);
    assert_eq!(submitter.analytics().total_submissions, 1);
}

#[tokio::test(start_paused = true)]
async fn test_url_is_sent_again_after_ttl() {
    let transport = Arc::new(FakeTransport::new());
    let mut submitter = submitter(test_config(100, 0, 60), &transport);
    let url = "https://www.example.com/a";

    submitter.submit_single_url(url).await.unwrap();
    tokio::time::advance(Duration::from_secs(61)).await;
    submitter.submit_single_url(url).await.unwrap();

    assert_eq!(transport.post_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_maximal_ttl_keeps_url_cached() {
    let transport = Arc::new(FakeTransport::new());
    let mut submitter = submitter(test_config(10, 0, u64::MAX), &transport);
    let url = "https://www.example.com/a";

    submitter.submit_single_url(url).await.unwrap();
    tokio::time::advance(Duration::from_secs(365 * 86_400)).await;
    submitter.submit_single_url(url).await.unwrap();

    assert_eq!(transport.post_count(), 1);
}

#[tokio::test]
async fn test_submit_urls_skips_cached_urls() {
    let transport = Arc::new(FakeTransport::new());
    let mut submitter = submitter(test_config(100, 0, 3600), &transport);
    let urls = example_urls(3);

    submitter.submit_urls(&urls[..2]).await.unwrap();
    submitter.submit_urls(&urls).await.unwrap();

    let posts = transport.posts();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[1].urls(), vec![urls[2].clone()]);
}

#[tokio::test]
async fn test_fully_cached_list_sends_nothing() {
    let transport = Arc::new(FakeTransport::new());
    let mut submitter = submitter(test_config(100, 0, 3600), &transport);
    let urls = example_urls(3);

    submitter.submit_urls(&urls).await.unwrap();
    submitter.submit_urls(&urls).await.unwrap();

    assert_eq!(transport.post_count(), 1);
}

#[tokio::test]
async fn test_empty_list_sends_nothing() {
    let transport = Arc::new(FakeTransport::new());
    let mut submitter = submitter(test_config(100, 0, 3600), &transport);

    submitter.submit_urls(&[]).await.unwrap();

    assert_eq!(transport.post_count(), 0);
    assert_eq!(submitter.analytics(), Analytics::default());
}

#[tokio::test]
async fn test_repeated_urls_in_one_list_are_sent_once() {
    let transport = Arc::new(FakeTransport::new());
    let mut submitter = submitter(test_config(100, 0, 3600), &transport);
    let a = "https://www.example.com/a".to_string();
    let b = "https://www.example.com/b".to_string();

    submitter
        .submit_urls(&[a.clone(), b.clone(), a.clone()])
        .await
        .unwrap();

    let posts = transport.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].urls(), vec![a, b]);
    assert_eq!(submitter.analytics().total_submissions, 2);
}

#[tokio::test]
async fn test_failed_url_is_not_cached() {
    let transport = Arc::new(FakeTransport::new());
    transport.queue_post(PostOutcome::Unavailable("connection refused"));
    let mut submitter = submitter(test_config(100, 0, 3600), &transport);
    let url = "https://www.example.com/a";

    let err = submitter.submit_single_url(url).await.unwrap_err();
    assert!(matches!(err, IndexNowError::Submission(_)));

    submitter.submit_single_url(url).await.unwrap();

    assert_eq!(transport.post_count(), 2);
    let analytics = submitter.analytics();
    assert_eq!(analytics.total_submissions, 2);
    assert_eq!(analytics.successful_submissions, 1);
    assert_eq!(analytics.failed_submissions, 1);
}

#[tokio::test]
async fn test_instances_do_not_share_cache_or_analytics() {
    let transport = Arc::new(FakeTransport::new());
    let mut first = submitter(test_config(100, 0, 3600), &transport);
    let mut second = submitter(test_config(100, 0, 3600), &transport);
    let url = "https://www.example.com/a";

    first.submit_single_url(url).await.unwrap();
    second.submit_single_url(url).await.unwrap();
    second.submit_single_url(url).await.unwrap();

    assert_eq!(transport.post_count(), 2);
    assert_eq!(first.analytics().total_submissions, 1);
    assert_eq!(second.analytics().total_submissions, 1);
}

#[test]
fn test_missing_key_and_host_are_both_reported() {
    let transport: Arc<FakeTransport> = Arc::new(FakeTransport::new());
    let config = Config {
        key: String::new(),
        host: "  ".to_string(),
        ..test_config(100, 0, 3600)
    };

    let err = IndexNowSubmitter::with_transport(config, transport)
        .err()
        .expect("configuration must be rejected");

    assert_eq!(err.missing, vec!["key", "host"]);
    let message = err.to_string();
    assert!(message.contains("key"));
    assert!(message.contains("host"));
}

#[test]
fn test_missing_host_alone_is_reported() {
    let transport: Arc<FakeTransport> = Arc::new(FakeTransport::new());
    let config = Config {
        host: String::new(),
        ..test_config(100, 0, 3600)
    };

    let err = IndexNowSubmitter::with_transport(config, transport)
        .err()
        .expect("configuration must be rejected");

    assert_eq!(err.missing, vec!["host"]);
}

#[test]
fn test_new_rejects_missing_key_before_building_client() {
    let config = Config {
        key: String::new(),
        ..test_config(100, 0, 3600)
    };

    let err = IndexNowSubmitter::new(config).err().expect("must fail");

    assert!(matches!(err, IndexNowError::Config(ref e) if e.missing == vec!["key"]));
}

#[test]
fn test_endpoint_is_derived_from_engine() {
    let transport: Arc<FakeTransport> = Arc::new(FakeTransport::new());
    let submitter = submitter(
        Config {
            engine: "www.bing.com".to_string(),
            ..test_config(100, 0, 3600)
        },
        &transport,
    );

    assert_eq!(submitter.endpoint(), "https://www.bing.com/IndexNow");
}

#[tokio::test]
async fn test_sitemap_urls_are_filtered_by_cutoff() {
    let transport = Arc::new(FakeTransport::new());
    transport.serve(
        SITEMAP,
        200,
        &urlset(&[
            ("https://www.example.com/old", Some("2024-07-20")),
            ("https://www.example.com/new", Some("2024-07-25T08:30:00+00:00")),
            ("https://www.example.com/undated", None),
        ]),
    );
    let mut submitter = submitter(test_config(100, 0, 3600), &transport);

    submitter
        .submit_from_sitemap(SITEMAP, parse_timestamp("2024-07-22"))
        .await
        .unwrap();

    let posts = transport.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].urls(), vec!["https://www.example.com/new"]);
}

#[tokio::test]
async fn test_sitemap_without_cutoff_submits_every_url_in_order() {
    let transport = Arc::new(FakeTransport::new());
    transport.serve(
        SITEMAP,
        200,
        &urlset(&[
            ("https://www.example.com/b", Some("2020-01-01")),
            ("https://www.example.com/a", None),
            ("https://www.example.com/c", Some("not a date")),
        ]),
    );
    let mut submitter = submitter(test_config(100, 0, 3600), &transport);

    submitter.submit_from_sitemap(SITEMAP, None).await.unwrap();

    assert_eq!(
        transport.posts()[0].urls(),
        vec![
            "https://www.example.com/b",
            "https://www.example.com/a",
            "https://www.example.com/c",
        ]
    );
}

#[tokio::test]
async fn test_empty_sitemap_sends_nothing() {
    let transport = Arc::new(FakeTransport::new());
    transport.serve(SITEMAP, 200, &urlset(&[]));
    let mut submitter = submitter(test_config(100, 0, 3600), &transport);

    submitter.submit_from_sitemap(SITEMAP, None).await.unwrap();

    assert_eq!(transport.post_count(), 0);
    assert_eq!(submitter.analytics(), Analytics::default());
}

#[tokio::test]
async fn test_malformed_sitemap_is_a_parse_error() {
    let transport = Arc::new(FakeTransport::new());
    transport.serve(
        SITEMAP,
        200,
        "<urlset><url><loc>https://www.example.com/a</loc></url>",
    );
    let mut submitter = submitter(test_config(100, 0, 3600), &transport);

    let err = submitter
        .submit_from_sitemap(SITEMAP, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        IndexNowError::Sitemap(SitemapError::Parse { .. })
    ));
    assert_eq!(transport.post_count(), 0);
}

#[tokio::test]
async fn test_unreachable_sitemap_is_a_fetch_error() {
    let transport = Arc::new(FakeTransport::new());
    let mut submitter = submitter(test_config(100, 0, 3600), &transport);

    let err = submitter
        .submit_from_sitemap(SITEMAP, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        IndexNowError::Sitemap(SitemapError::Fetch { .. })
    ));
    assert_eq!(transport.post_count(), 0);
}

#[tokio::test]
async fn test_missing_sitemap_is_a_status_error() {
    let transport = Arc::new(FakeTransport::new());
    transport.serve(SITEMAP, 404, "not found");
    let mut submitter = submitter(test_config(100, 0, 3600), &transport);

    let err = submitter
        .submit_from_sitemap(SITEMAP, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        IndexNowError::Sitemap(SitemapError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_sitemap_index_children_are_followed_in_order() {
    let transport = Arc::new(FakeTransport::new());
    let pages = "https://www.example.com/sitemap-pages.xml";
    let posts = "https://www.example.com/sitemap-posts.xml";
    transport.serve(SITEMAP, 200, &sitemap_index(&[pages, posts]));
    transport.serve(
        pages,
        200,
        &urlset(&[("https://www.example.com/about", None)]),
    );
    transport.serve(
        posts,
        200,
        &urlset(&[
            ("https://www.example.com/post-1", None),
            ("https://www.example.com/post-2", None),
        ]),
    );
    let parser = SitemapParser::new(transport.clone());

    let entries = parser.fetch_and_parse(SITEMAP).await.unwrap();

    let locs: Vec<&str> = entries.iter().map(|e| e.loc.as_str()).collect();
    assert_eq!(
        locs,
        vec![
            "https://www.example.com/about",
            "https://www.example.com/post-1",
            "https://www.example.com/post-2",
        ]
    );
    assert_eq!(transport.gets(), vec![SITEMAP, pages, posts]);
}

#[tokio::test]
async fn test_nested_indexes_within_limit_are_followed() {
    let transport = Arc::new(FakeTransport::new());
    let level1 = "https://www.example.com/index-1.xml";
    let level2 = "https://www.example.com/index-2.xml";
    let leaf = "https://www.example.com/leaf.xml";
    transport.serve(SITEMAP, 200, &sitemap_index(&[level1]));
    transport.serve(level1, 200, &sitemap_index(&[level2]));
    transport.serve(level2, 200, &sitemap_index(&[leaf]));
    transport.serve(leaf, 200, &urlset(&[("https://www.example.com/deep", None)]));
    let parser = SitemapParser::new(transport.clone());

    let entries = parser.fetch_and_parse(SITEMAP).await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].loc, "https://www.example.com/deep");
}

#[tokio::test]
async fn test_indexes_nested_too_deep_are_rejected() {
    let transport = Arc::new(FakeTransport::new());
    let chain = [
        SITEMAP,
        "https://www.example.com/index-1.xml",
        "https://www.example.com/index-2.xml",
        "https://www.example.com/index-3.xml",
        "https://www.example.com/index-4.xml",
    ];
    for pair in chain.windows(2) {
        transport.serve(pair[0], 200, &sitemap_index(&[pair[1]]));
    }
    transport.serve(chain[4], 200, &urlset(&[("https://www.example.com/x", None)]));
    let mut submitter = submitter(test_config(100, 0, 3600), &transport);

    let err = submitter
        .submit_from_sitemap(SITEMAP, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        IndexNowError::Sitemap(SitemapError::Parse { .. })
    ));
    assert_eq!(transport.post_count(), 0);
}
