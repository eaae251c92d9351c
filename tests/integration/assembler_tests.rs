//! End-to-end tests for the record assembler
//!
//! One wiremock server plays the search API, another plays the practice
//! website. Input comes from a CSV file and records land in a temp directory.

use serde_json::{json, Value};
use service_scout::assembler::RecordAssembler;
use service_scout::classifier::Classifier;
use service_scout::config::{CrawlerConfig, SearchConfig};
use service_scout::crawler::{CrawlOptions, HttpFetcher, SiteCrawler};
use service_scout::input::load_rows;
use service_scout::output::{RecordWriter, RunStatistics};
use service_scout::search::{Enricher, SearchProvider, SerpApiClient, SiteResolver};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::{Builder, TempDir};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

const ADDRESS: &str = "500 Congress Ave, Austin, TX";

/// Matches search requests whose `q` parameter contains a fragment
struct QueryContains(&'static str);

impl Match for QueryContains {
    fn matches(&self, request: &Request) -> bool {
        request
            .url
            .query_pairs()
            .any(|(key, value)| key == "q" && value.contains(self.0))
    }
}

fn results(items: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "organic_results": items }))
}

async fn start_site() -> MockServer {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<html><body>
                <a href="/services">Services</a>
                <h1>Welcome</h1>
            </body></html>"#,
            "text/html",
        ))
        .mount(&site)
        .await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<html><body>
                <h2>Eye Care Services</h2>
                <ul><li>Cataract Surgery</li><li>LASIK</li><li>Billing questions</li></ul>
            </body></html>"#,
            "text/html",
        ))
        .mount(&site)
        .await;
    site
}

/// Search API that knows Bright Eyes, reports an error for Broken Group and
/// finds nothing for anyone else
async fn start_search(site_uri: &str) -> MockServer {
    let search = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("api_key", "test-key"))
        .and(query_param(
            "q",
            format!("Bright Eyes Bright Eyes {ADDRESS} official website").as_str(),
        ))
        .respond_with(results(json!([
            { "link": "https://www.facebook.com/brighteyes", "title": "Bright Eyes | Facebook" },
            { "link": format!("{site_uri}/"), "title": "Bright Eyes Vision", "snippet": "Eye care in Austin" }
        ])))
        .mount(&search)
        .await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(QueryContains("Broken Group"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "Invalid API key." })))
        .mount(&search)
        .await;

    Mock::given(method("GET"))
        .and(QueryContains("facebook"))
        .respond_with(results(json!([
            { "link": "https://www.facebook.com/brighteyesaustin", "title": "Bright Eyes - Home", "snippet": "Page" }
        ])))
        .mount(&search)
        .await;

    Mock::given(method("GET"))
        .and(QueryContains("yelp reviews"))
        .respond_with(results(json!([
            { "link": "https://www.yelp.com/biz/bright-eyes-austin", "title": "Bright Eyes - Yelp", "snippet": "4.5 stars" }
        ])))
        .mount(&search)
        .await;

    Mock::given(method("GET"))
        .and(QueryContains("eye care optometry ophthalmology Austin, TX"))
        .respond_with(results(json!([
            { "link": "https://clearview.example/", "title": "Clear View Optometry", "snippet": "Austin eye doctors" },
            { "link": "https://brighteyes.example/", "title": "Bright Eyes Vision", "snippet": "Us" }
        ])))
        .mount(&search)
        .await;

    Mock::given(method("GET"))
        .and(QueryContains("Austin TX population median income"))
        .respond_with(results(json!([
            { "link": "https://census.example/austin", "title": "Austin", "snippet": "Population: 974,447. Median income $86,530." }
        ])))
        .mount(&search)
        .await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(results(json!([])))
        .mount(&search)
        .await;

    search
}

fn input_csv(rows: &[&str]) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "Physician Group Name,Address,Specialty").unwrap();
    for name in rows {
        writeln!(file, "{name},\"{ADDRESS}\",Ophthalmology").unwrap();
    }
    file.flush().unwrap();
    file
}

fn provider(search: &MockServer) -> Arc<dyn SearchProvider> {
    let endpoint = format!("{}/search.json", search.uri());
    Arc::new(
        SerpApiClient::new(reqwest::Client::new(), &endpoint, "test-key")
            .expect("Failed to build search client"),
    )
}

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_basic_run_writes_resolved_rows_only() {
    let site = start_site().await;
    let search = start_search(&site.uri()).await;
    let input = input_csv(&["Bright Eyes", "Unknown Clinic", "Broken Group", "nan"]);
    let out = TempDir::new().unwrap();

    let rows = load_rows(input.path()).unwrap();
    let resolver = SiteResolver::new(Some(provider(&search)), &SearchConfig::default());
    let fetcher = HttpFetcher::from_config(&CrawlerConfig::default()).unwrap();
    let classifier = Classifier::default();
    let crawler = SiteCrawler::new(&fetcher, &classifier, CrawlOptions::default());
    let writer = RecordWriter::new(out.path(), true).unwrap();
    let assembler = RecordAssembler::new(&resolver, crawler, &writer, 2, Duration::ZERO);

    let stats = assembler.run(&rows, None).await;

    assert_eq!(
        stats,
        RunStatistics {
            rows_total: 4,
            processed: 1,
            skipped: 1,
            unresolved: 2,
            failed: 0,
            services_found: 3,
        }
    );

    let files: Vec<String> = std::fs::read_dir(out.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files, vec!["Bright_Eyes.json"]);

    let record = read_json(&out.path().join("Bright_Eyes.json"));
    assert_eq!(record["group_name"], "Bright Eyes");
    assert_eq!(record["physician_name"], "Bright Eyes");
    assert_eq!(record["address"], ADDRESS);
    assert_eq!(record["website"], format!("{}/", site.uri()));
    assert_eq!(
        record["services"],
        json!(["Cataract Surgery", "LASIK", "Eye Care Services"])
    );
    assert!(record.get("social_media_presence").is_none());
    assert!(record.get("scraped_at").is_some());
}

#[tokio::test]
async fn test_enriched_run() {
    let site = start_site().await;
    let search = start_search(&site.uri()).await;
    let input = input_csv(&["Bright Eyes"]);
    let out = TempDir::new().unwrap();

    let rows = load_rows(input.path()).unwrap();
    let provider = provider(&search);
    let resolver = SiteResolver::new(Some(provider.clone()), &SearchConfig::default());
    let enricher = Enricher::new(provider, Duration::ZERO);
    let fetcher = HttpFetcher::from_config(&CrawlerConfig::default()).unwrap();
    let classifier = Classifier::default();
    let crawler = SiteCrawler::new(&fetcher, &classifier, CrawlOptions::default());
    let writer = RecordWriter::new(out.path(), true).unwrap();
    let assembler =
        RecordAssembler::new(&resolver, crawler, &writer, 2, Duration::ZERO).with_enricher(&enricher);

    let stats = assembler.run(&rows, None).await;
    assert_eq!(stats.processed, 1);

    let record = read_json(&out.path().join("enhanced_Bright_Eyes.json"));
    assert_eq!(
        record["services"],
        json!(["Cataract Surgery", "LASIK", "Eye Care Services"])
    );
    assert_eq!(
        record["social_media_presence"],
        json!({
            "facebook": {
                "url": "https://www.facebook.com/brighteyesaustin",
                "title": "Bright Eyes - Home",
                "snippet": "Page"
            }
        })
    );
    assert_eq!(
        record["patient_reviews"]["yelp"]["url"],
        "https://www.yelp.com/biz/bright-eyes-austin"
    );
    assert_eq!(
        record["competitors"],
        json!([{ "name": "Clear View Optometry", "url": "https://clearview.example/", "snippet": "Austin eye doctors" }])
    );
    assert_eq!(
        record["location_data"],
        json!({
            "full_address": ADDRESS,
            "city": "Austin",
            "state": "TX",
            "population": "974,447",
            "median_income": "$86,530"
        })
    );
}

#[tokio::test]
async fn test_without_search_key_nothing_is_written() {
    let input = input_csv(&["Bright Eyes", "Clear View"]);
    let out = TempDir::new().unwrap();

    let rows = load_rows(input.path()).unwrap();
    let resolver = SiteResolver::new(None, &SearchConfig::default());
    let fetcher = HttpFetcher::from_config(&CrawlerConfig::default()).unwrap();
    let classifier = Classifier::default();
    let crawler = SiteCrawler::new(&fetcher, &classifier, CrawlOptions::default());
    let writer = RecordWriter::new(out.path(), true).unwrap();
    let assembler = RecordAssembler::new(&resolver, crawler, &writer, 2, Duration::ZERO);

    let stats = assembler.run(&rows, Some(10)).await;

    assert_eq!(stats.rows_total, 2);
    assert_eq!(stats.unresolved, 2);
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}
