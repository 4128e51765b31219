//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end over real HTTP.

use docs_ripple::config::{parse_config, Config};
use docs_ripple::crawler::Coordinator;
use docs_ripple::output::{
    load_results, CodeExampleRecord, ConstantRecord, JsonFileSink, LinkRecord, ResultSink,
    ScrapedRecord,
};
use docs_ripple::run_crawl;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RULES: &str = r#"
[crawler]
max-depth = 2
max-concurrent-fetches = 4
request-timeout-secs = 5
connect-timeout-secs = 2

[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0"
contact-url = "https://example.com/bot"

[[rule]]
depth = 0
link-selector = "a.member"

[[rule]]
depth = 1
data-selector = "code"
record = "constant"
link-selector = "a.example"

[[rule]]
depth = 2
terminal = true
data-selector = "pre"
record = "code-example"
language = "vbnet"
link-selector = "a"
"#;

fn create_test_config(seeds: &[String], rules: &str) -> Config {
    let seeds = seeds
        .iter()
        .map(|s| format!("\"{}\"", s))
        .collect::<Vec<_>>()
        .join(", ");
    parse_config(&format!("seeds = [{}]\n{}", seeds, rules)).expect("valid test config")
}

async fn mount_page(server: &MockServer, page: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(html.to_string(), "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Index -> two member pages -> one example page -> a page past the depth bound
async fn mount_site(server: &MockServer) {
    mount_page(
        server,
        "/idx",
        r##"<html><body>
            <a class="member" href="/a">A</a>
            <a class="member" href="b#Pg0">B</a>
        </body></html>"##,
    )
    .await;

    mount_page(
        server,
        "/a",
        r#"<html><body>
            <div><code>IFoo</code></div><p>The foo interface</p>
            <a class="example" href="/a/ex1">Example</a>
        </body></html>"#,
    )
    .await;

    mount_page(
        server,
        "/b",
        r#"<html><body><div><code>IBar</code></div></body></html>"#,
    )
    .await;

    mount_page(
        server,
        "/a/ex1",
        r#"<html><head><title>Example 1</title></head><body>
            <pre>Dim swApp As Object</pre>
            <a href="/too-deep">Next</a>
        </body></html>"#,
    )
    .await;

    mount_page(server, "/too-deep", "<pre>unreachable</pre>").await;
}

async fn requested_paths(server: &MockServer) -> Vec<String> {
    let mut paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    paths.sort();
    paths
}

#[tokio::test]
async fn test_full_crawl_over_http() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_site(&server).await;

    let config = create_test_config(&[format!("{}/idx", base)], RULES);
    let outcome = run_crawl(config).await.expect("crawl should succeed");

    let mut expected = vec![
        ScrapedRecord::Constant(ConstantRecord {
            name: "IFoo".to_string(),
            description: "The foo interface".to_string(),
            source_url: format!("{}/a", base),
        }),
        ScrapedRecord::Constant(ConstantRecord {
            name: "IBar".to_string(),
            description: String::new(),
            source_url: format!("{}/b", base),
        }),
        ScrapedRecord::CodeExample(CodeExampleRecord {
            title: "Example 1".to_string(),
            snippet: "Dim swApp As Object".to_string(),
            language: "vbnet".to_string(),
            source_url: format!("{}/a/ex1", base),
        }),
    ];
    expected.sort();
    assert_eq!(outcome.results.sorted(), expected);

    // Every page within the bound fetched exactly once; nothing past it
    assert_eq!(
        requested_paths(&server).await,
        vec!["/a", "/a/ex1", "/b", "/idx"]
    );
    assert_eq!(outcome.statistics.pages_completed, 4);
    assert_eq!(outcome.statistics.pages_failed, 0);
}

#[tokio::test]
async fn test_results_persisted_as_json_array() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let dir = TempDir::new().unwrap();
    let results_path = dir.path().join("scraped_data.json");

    let config = create_test_config(&[format!("{}/idx", server.uri())], RULES);
    let outcome = run_crawl(config).await.unwrap();
    JsonFileSink::new(&results_path, true)
        .persist(&outcome.results)
        .unwrap();

    let raw = std::fs::read_to_string(&results_path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let array = json.as_array().expect("top level is an array");
    assert_eq!(array.len(), 3);
    assert!(array
        .iter()
        .any(|v| v["type"] == "codeExample" && v["sourceUrl"].as_str().is_some()));

    let loaded = load_results(&results_path).unwrap();
    assert_eq!(loaded.sorted(), outcome.results.sorted());
}

#[tokio::test]
async fn test_failed_pages_are_isolated() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/idx",
        r#"<a class="member" href="/missing">M</a>
           <a class="member" href="/broken">X</a>
           <a class="member" href="/pdf">P</a>
           <a class="member" href="/ok">O</a>"#,
    )
    .await;
    mount_page(&server, "/ok", "<div><code>swDocPART</code></div><p>Part</p>").await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pdf"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"%PDF-1.4".to_vec(), "application/pdf"),
        )
        .mount(&server)
        .await;

    let config = create_test_config(&[format!("{}/idx", server.uri())], RULES);
    let outcome = run_crawl(config).await.unwrap();

    assert_eq!(outcome.statistics.pages_failed, 3);
    assert_eq!(outcome.statistics.pages_completed, 2);
    assert_eq!(
        outcome.results.into_records(),
        vec![ScrapedRecord::Constant(ConstantRecord {
            name: "swDocPART".to_string(),
            description: "Part".to_string(),
            source_url: format!("{}/ok", server.uri()),
        })]
    );
}

#[tokio::test]
async fn test_plain_text_pages_are_parsed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/idx.htm"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<div><code>swDocDRAWING</code></div>", "text/plain"),
        )
        .mount(&server)
        .await;

    let rules = r#"
[crawler]
max-depth = 0

[[rule]]
depth = 0
data-selector = "code"
record = "constant"
"#;
    let config = create_test_config(&[format!("{}/idx.htm", server.uri())], rules);
    let outcome = run_crawl(config).await.unwrap();

    assert_eq!(outcome.statistics.pages_failed, 0);
    assert_eq!(outcome.results.len(), 1);
}

#[tokio::test]
async fn test_unreachable_seed_yields_empty_results() {
    let server = MockServer::start().await;
    let config = create_test_config(&[format!("{}/gone", server.uri())], RULES);

    let outcome = run_crawl(config).await.expect("page failures never abort");

    assert!(outcome.results.is_empty());
    assert_eq!(outcome.statistics.pages_failed, 1);
}

#[tokio::test]
async fn test_fragment_links_fetch_once() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/idx",
        r##"<a class="member" href="/a#Pg0">A</a>
            <a class="member" href="/a#Pg1">A</a>
            <a class="member" href="/a">A</a>"##,
    )
    .await;
    mount_page(&server, "/a", "<div><code>IFoo</code></div>").await;

    let config = create_test_config(&[format!("{}/idx", server.uri())], RULES);
    let outcome = run_crawl(config).await.unwrap();

    assert_eq!(requested_paths(&server).await, vec!["/a", "/idx"]);
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.statistics.duplicates_skipped, 2);
}

#[tokio::test]
async fn test_link_records() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/idx",
        r#"<ul class="see-also"><li><a href="IFoo.htm">IFoo</a></li><li><a href="mailto:x@y.z">Mail</a></li></ul>"#,
    )
    .await;

    let rules = r#"
[crawler]
max-depth = 0

[[rule]]
depth = 0
data-selector = ".see-also a"
record = "link"
"#;
    let config = create_test_config(&[format!("{}/idx", server.uri())], rules);
    let outcome = run_crawl(config).await.unwrap();

    assert_eq!(
        outcome.results.into_records(),
        vec![ScrapedRecord::Link(LinkRecord {
            title: "IFoo".to_string(),
            target_url: format!("{}/IFoo.htm", server.uri()),
            parent_url: format!("{}/idx", server.uri()),
        })]
    );
    assert_eq!(outcome.statistics.links_dropped, 1);
}

#[tokio::test]
async fn test_redirects_resolve_against_final_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/docs/new/index.htm"))
        .mount(&server)
        .await;
    mount_page(
        &server,
        "/docs/new/index.htm",
        r#"<a class="member" href="page.htm">Page</a>"#,
    )
    .await;
    mount_page(&server, "/docs/new/page.htm", "<div><code>IMoved</code></div>").await;

    let config = create_test_config(&[format!("{}/old", server.uri())], RULES);
    let outcome = run_crawl(config).await.unwrap();

    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.statistics.pages_failed, 0);
}

#[tokio::test]
async fn test_user_agent_header_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/idx"))
        .and(header("user-agent", "TestBot/1.0 (+https://example.com/bot)"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<p>hello</p>", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&[format!("{}/idx", server.uri())], RULES);
    let outcome = run_crawl(config).await.unwrap();

    assert_eq!(outcome.statistics.pages_completed, 1);
    assert_eq!(outcome.statistics.pages_failed, 0);
}

#[tokio::test]
async fn test_transient_failure_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/idx"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_page(&server, "/idx", "<div><code>IRetry</code></div>").await;

    let rules = r#"
[crawler]
max-depth = 0
fetch-retries = 2
retry-delay-ms = 10

[[rule]]
depth = 0
data-selector = "code"
record = "constant"
"#;
    let config = create_test_config(&[format!("{}/idx", server.uri())], rules);
    let outcome = run_crawl(config).await.unwrap();

    assert_eq!(outcome.results.len(), 1);
    assert_eq!(requested_paths(&server).await, vec!["/idx", "/idx"]);
}

#[tokio::test]
async fn test_rerun_produces_same_records() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let config = create_test_config(&[format!("{}/idx", server.uri())], RULES);
    let mut coordinator = Coordinator::new(config).unwrap();

    let first = coordinator.run().await.unwrap();
    let second = coordinator.run().await.unwrap();

    assert_eq!(first.results.len(), 3);
    assert_eq!(first.results.sorted(), second.results.sorted());
}

#[tokio::test]
async fn test_concurrency_of_one_completes() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let rules = RULES.replace("max-concurrent-fetches = 4", "max-concurrent-fetches = 1");
    let config = create_test_config(&[format!("{}/idx", server.uri())], &rules);
    let outcome = run_crawl(config).await.unwrap();

    assert_eq!(outcome.results.len(), 3);
}
