//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use crawli::config::{
    BackoffConfig, Config, CrawlerConfig, HttpConfig, OutputConfig, OutputFormat, TargetConfig,
};
use crawli::crawler::{crawl, Coordinator, CrawlState};
use crawli::output::write_report;
use tempfile::tempdir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling the given mock server
fn create_test_config(base_url: &str, max_pages: u32, output_path: &str) -> Config {
    Config {
        target: TargetConfig {
            base_url: format!("{}/", base_url),
            seed_url: None,
            target_pattern: "/[^/]+/video/[^/]+".to_string(),
            ignore_patterns: vec!["/playlist/".to_string()],
        },
        crawler: CrawlerConfig {
            max_pages,
            request_delay_ms: 0,
            fetch_timeout_secs: 5,
            max_retries: 3,
            backoff: BackoffConfig {
                multiplier_ms: 1,
                min_ms: 1,
                max_ms: 5, // Very short for testing
            },
        },
        http: HttpConfig::default(),
        output: OutputConfig {
            path: output_path.to_string(),
            format: OutputFormat::Txt,
        },
    }
}

/// Mounts an HTML page whose body is a list of anchors
async fn mount_page(server: &MockServer, page_path: &str, links: &[&str]) {
    let anchors: String = links
        .iter()
        .map(|href| format!("<a href=\"{}\">link</a>\n", href))
        .collect();

    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!("<html><body>{}</body></html>", anchors))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Returns how many requests the server received for `page_path`
async fn request_count(server: &MockServer, page_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == page_path)
        .count()
}

#[tokio::test]
async fn test_full_crawl_writes_sorted_targets() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        &["/b2/video/y", "/channels", "/playlist/p1", "https://other.example/c3/video/z"],
    )
    .await;
    mount_page(&mock_server, "/channels", &["/a1/video/x", "/b2/video/y"]).await;

    let dir = tempdir().unwrap();
    let output_path = dir.path().join("videos.txt");
    let config = create_test_config(&base_url, 50, &output_path.to_string_lossy());

    let report = crawl(&config, CancellationToken::new())
        .await
        .expect("Crawl failed");
    write_report(&report, &config.output).expect("Failed to write report");

    assert_eq!(report.state, CrawlState::Completed);
    assert_eq!(report.stats.pages_crawled, 2);
    assert_eq!(report.stats.targets_found, 2);
    assert_eq!(report.stats.fetch_errors, 0);

    let written = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(
        written,
        format!(
            "{base}/a1/video/x\n{base}/b2/video/y\n\nTotal: 2\n",
            base = base_url
        )
    );

    // Targets are reported, never fetched
    assert_eq!(request_count(&mock_server, "/a1/video/x").await, 0);
    assert_eq!(request_count(&mock_server, "/b2/video/y").await, 0);
}

#[tokio::test]
async fn test_ignored_paths_are_never_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["/playlist/p1", "/playlist/p2/a1/video/x"]).await;

    Mock::given(method("GET"))
        .and(path("/playlist/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<a href=\"/a1/video/x\">x</a>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, 50, "unused.txt");
    let report = crawl(&config, CancellationToken::new()).await.unwrap();

    assert!(report.targets.is_empty());
    assert_eq!(report.stats.pages_crawled, 1);
}

#[tokio::test]
async fn test_server_errors_are_retried_then_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["/broken", "/fine"]).await;
    mount_page(&mock_server, "/fine", &["/broken", "/a1/video/x"]).await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, 50, "unused.txt");
    let report = crawl(&config, CancellationToken::new()).await.unwrap();

    assert_eq!(report.state, CrawlState::Completed);
    assert_eq!(report.stats.pages_crawled, 2);
    assert_eq!(report.stats.fetch_errors, 1);
    assert_eq!(report.stats.retries_performed, 2);
    assert_eq!(report.targets.len(), 1);
}

#[tokio::test]
async fn test_transient_failure_recovers() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // First attempt fails, the retry sees the real page
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/", &["/a1/video/x"]).await;

    let config = create_test_config(&base_url, 50, "unused.txt");
    let report = crawl(&config, CancellationToken::new()).await.unwrap();

    assert_eq!(report.stats.pages_crawled, 1);
    assert_eq!(report.stats.retries_performed, 1);
    assert_eq!(report.stats.fetch_errors, 0);
    assert_eq!(report.targets.len(), 1);
}

#[tokio::test]
async fn test_max_pages_budget() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["/p1", "/p2", "/p3", "/p4"]).await;
    for page in ["/p1", "/p2", "/p3", "/p4"] {
        mount_page(&mock_server, page, &[]).await;
    }

    let config = create_test_config(&base_url, 3, "unused.txt");
    let report = crawl(&config, CancellationToken::new()).await.unwrap();

    assert_eq!(report.state, CrawlState::Completed);
    assert_eq!(report.stats.pages_crawled, 3);
    assert_eq!(request_count(&mock_server, "/p3").await, 0);
    assert_eq!(request_count(&mock_server, "/p4").await, 0);
}

#[tokio::test]
async fn test_page_linked_twice_is_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["/a", "/b"]).await;
    mount_page(&mock_server, "/a", &["/shared", "/"]).await;
    mount_page(&mock_server, "/b", &["/shared#top", "/shared"]).await;
    mount_page(&mock_server, "/shared", &["/a1/video/x"]).await;

    let config = create_test_config(&base_url, 50, "unused.txt");
    let report = crawl(&config, CancellationToken::new()).await.unwrap();

    assert_eq!(request_count(&mock_server, "/").await, 1);
    assert_eq!(request_count(&mock_server, "/shared").await, 1);
    assert_eq!(report.stats.pages_crawled, 4);
    assert_eq!(report.targets.len(), 1);
}

#[tokio::test]
async fn test_cancelled_crawl_writes_partial_json_report() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["/a1/video/x"]).await;

    let dir = tempdir().unwrap();
    let output_path = dir.path().join("videos.json");
    let mut config = create_test_config(&base_url, 50, &output_path.to_string_lossy());
    config.output.format = OutputFormat::Json;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut coordinator = Coordinator::new(&config).expect("Failed to create coordinator");
    let report = coordinator.run(cancel).await.unwrap();
    write_report(&report, &config.output).unwrap();

    assert_eq!(report.state, CrawlState::Aborted);
    assert_eq!(request_count(&mock_server, "/").await, 0);

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(value["state"], "aborted");
    assert_eq!(value["stats"]["pages_crawled"], 0);
}
