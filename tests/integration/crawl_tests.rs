//! Integration tests for the crawler
//!
//! These tests use wiremock to serve small practice websites and run the
//! direct HTTP fetcher and the crawl coordinator against them end-to-end.

use service_scout::classifier::Classifier;
use service_scout::config::CrawlerConfig;
use service_scout::crawler::{CrawlOptions, HttpFetcher, PageFetcher, SiteCrawler};
use service_scout::FetchFailure;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>Clinic</title></head><body>{body}</body></html>"),
        "text/html",
    )
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .mount(server)
        .await;
}

/// Paths requested from the server, in order
async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect()
}

fn seed(server: &MockServer) -> Url {
    Url::parse(&format!("{}/", server.uri())).expect("Failed to parse mock server URI")
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::from_config(&CrawlerConfig::default()).expect("Failed to build HTTP client")
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"
        <nav><a href="/services">What We Do</a><a href="/about">About Us</a></nav>
        <h1>Welcome</h1>
        "#,
    )
    .await;
    mount_page(
        &server,
        "/services",
        r#"
        <h2>Our Services</h2>
        <ul>
          <li>Cataract Surgery</li>
          <li>Why are you covered by insurance?</li>
        </ul>
        <a href="/services/lasik">Learn about LASIK</a>
        "#,
    )
    .await;
    mount_page(
        &server,
        "/services/lasik",
        r#"<div class="service"><h3>Custom LASIK Surgery</h3></div>"#,
    )
    .await;

    let fetcher = fetcher();
    let classifier = Classifier::default();
    let crawler = SiteCrawler::new(&fetcher, &classifier, CrawlOptions::default());

    let services = crawler.crawl(&seed(&server), 2).await;

    assert_eq!(
        services.into_vec(),
        vec!["Cataract Surgery", "Our Services", "Custom LASIK Surgery"]
    );
    assert_eq!(
        requested_paths(&server).await,
        vec!["/", "/services", "/services/lasik"]
    );
}

#[tokio::test]
async fn test_depth_limit_respected() {
    let server = MockServer::start().await;

    mount_page(&server, "/", r#"<a href="/care-1">Next</a>"#).await;
    mount_page(&server, "/care-1", r#"<a href="/care-2">Next</a>"#).await;
    mount_page(&server, "/care-2", r#"<a href="/care-3">Next</a>"#).await;
    mount_page(&server, "/care-3", r#"<h2>Deep Retina Care</h2>"#).await;

    let fetcher = fetcher();
    let classifier = Classifier::default();
    let crawler = SiteCrawler::new(&fetcher, &classifier, CrawlOptions::default());

    let services = crawler.crawl(&seed(&server), 2).await;

    assert!(services.is_empty());
    let paths = requested_paths(&server).await;
    assert_eq!(paths, vec!["/", "/care-1", "/care-2"]);
}

#[tokio::test]
async fn test_other_hosts_never_followed() {
    let server = MockServer::start().await;
    let port = seed(&server).port().expect("mock server has a port");

    // Same server, different host name
    let other_host = format!("http://localhost:{port}/external-services");
    mount_page(
        &server,
        "/",
        &format!(
            r#"<a href="https://otherclinic.com/services">Other</a>
               <a href="{other_host}">Partner</a>
               <h2>Glaucoma Care</h2>"#
        ),
    )
    .await;
    mount_page(&server, "/external-services", "<h2>Partner Eye Care</h2>").await;

    let fetcher = fetcher();
    let classifier = Classifier::default();
    let crawler = SiteCrawler::new(&fetcher, &classifier, CrawlOptions::default());

    let services = crawler.crawl(&seed(&server), 2).await;

    assert_eq!(services.into_vec(), vec!["Glaucoma Care"]);
    assert_eq!(requested_paths(&server).await, vec!["/"]);
}

#[tokio::test]
async fn test_each_url_fetched_once() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"
        <a href="/services">One</a>
        <a href="/services#top">Two</a>
        <a href="/services/">Three</a>
        <a href="/services?utm_source=newsletter">Four</a>
        "#,
    )
    .await;
    mount_page(
        &server,
        "/services",
        r#"<div class="card"><h3>Eye Exams</h3></div><a href="/">Home</a><a href="/services">Again</a>"#,
    )
    .await;
    mount_page(&server, "/services/", r#"<div class="card"><h3>Eye Exams</h3></div>"#).await;

    let fetcher = fetcher();
    let classifier = Classifier::default();
    let crawler = SiteCrawler::new(&fetcher, &classifier, CrawlOptions::default());

    let report = crawler.crawl_with_report(&seed(&server), 2).await;

    assert_eq!(report.services.into_vec(), vec!["Eye Exams"]);
    assert_eq!(report.pages_fetched, 2);
    assert_eq!(requested_paths(&server).await, vec!["/", "/services"]);
}

#[tokio::test]
async fn test_failed_pages_do_not_stop_crawl() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"
        <a href="/services/broken">Broken</a>
        <a href="/services/brochure">Brochure</a>
        <a href="/services/cornea">Cornea</a>
        "#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/services/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services/brochure"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"))
        .mount(&server)
        .await;
    mount_page(&server, "/services/cornea", "<h2>Cornea Care</h2>").await;

    let fetcher = fetcher();
    let classifier = Classifier::default();
    let crawler = SiteCrawler::new(&fetcher, &classifier, CrawlOptions::default());

    let report = crawler.crawl_with_report(&seed(&server), 1).await;

    assert_eq!(report.services.into_vec(), vec!["Cornea Care"]);
    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.pages_failed, 2);
}

#[tokio::test]
async fn test_fetcher_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0u8, 1, 2], "image/png"))
        .mount(&server)
        .await;

    let fetcher = fetcher();
    let base = seed(&server);

    match fetcher.fetch(&base.join("/missing").unwrap()).await {
        Err(FetchFailure::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected status failure, got {:?}", other),
    }
    match fetcher.fetch(&base.join("/logo.png").unwrap()).await {
        Err(FetchFailure::UnsupportedContent { content_type, .. }) => {
            assert!(content_type.starts_with("image/png"))
        }
        other => panic!("expected content failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_redirect_followed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/treatments"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/treatments/2024"))
        .mount(&server)
        .await;
    mount_page(&server, "/treatments/2024", "<h2>Dry Eye Treatment</h2>").await;

    let fetcher = fetcher();
    let page = fetcher
        .fetch(&seed(&server).join("/treatments").unwrap())
        .await
        .expect("redirect should be followed");

    assert_eq!(page.url.path(), "/treatments/2024");
    assert!(!page.rendered);
    assert!(page.html.contains("Dry Eye Treatment"));
}

#[tokio::test]
async fn test_links_followed_after_cross_host_redirect() {
    let server = MockServer::start().await;
    let landing = format!("{}/home", server.uri());

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", landing.as_str()))
        .mount(&server)
        .await;
    mount_page(&server, "/home", r#"<a href="/services">Our Practice</a>"#).await;
    mount_page(&server, "/services", "<h2>Retina Care</h2>").await;

    // Same server under a different host name than the redirect target
    let seed = Url::parse(&format!("http://localhost:{}/", server.address().port())).unwrap();
    let fetcher = fetcher();
    let classifier = Classifier::default();
    let crawler = SiteCrawler::new(&fetcher, &classifier, CrawlOptions::default());

    let services = crawler.crawl(&seed, 2).await;

    assert_eq!(services.into_vec(), vec!["Retina Care"]);
    assert_eq!(requested_paths(&server).await, vec!["/", "/home", "/services"]);
}
