use std::fs;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wizard_engine::{
    ContentSource, DirContentSource, FetchSettings, HttpContentSource, SourceErrorKind,
};

const CATALOG: &str = r#"{"default":"v2","versions":{"v1":"Old","v2":"New"}}"#;
const STEPS: &str = r#"{
  "title": "VPN setup",
  "version": "2024.2",
  "steps": [
    { "title": "Install", "text": "Get the app", "link": { "url": "https://example.com/app" } },
    { "title": "Connect", "text": "Press connect", "help": { "video": "https://cdn.example.com/c.mp4" } }
  ]
}"#;

async fn serve(route: &str, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn http_source_reads_catalog_in_document_order() {
    let server = serve("/content/versions.json", CATALOG).await;
    let source = HttpContentSource::new(&server.uri(), FetchSettings::default()).unwrap();

    let catalog = source.fetch_catalog().await.expect("catalog");
    assert_eq!(catalog.default.as_deref(), Some("v2"));
    let keys: Vec<_> = catalog.versions.keys().cloned().collect();
    assert_eq!(keys, vec!["v1".to_string(), "v2".to_string()]);
}

#[tokio::test]
async fn http_source_resolves_paths_below_base() {
    let server = serve("/onboarding/content/v2.json", STEPS).await;
    let base = format!("{}/onboarding", server.uri());
    let source = HttpContentSource::new(&base, FetchSettings::default()).unwrap();

    let config = source.fetch_content("v2").await.expect("content");
    assert_eq!(config.title, "VPN setup");
    assert_eq!(config.version.as_deref(), Some("2024.2"));
    assert_eq!(config.steps.len(), 2);
    assert_eq!(
        config.steps[0].visible_link(),
        Some(("https://example.com/app", "Open link"))
    );
    assert!(config.steps[1].help.is_some());
}

#[tokio::test]
async fn http_source_reports_status_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/content/v9.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let source = HttpContentSource::new(&server.uri(), FetchSettings::default()).unwrap();

    let err = source.fetch_content("v9").await.unwrap_err();
    assert_eq!(err.kind, SourceErrorKind::HttpStatus(404));
}

#[tokio::test]
async fn http_source_rejects_malformed_json() {
    let server = serve("/content/versions.json", "{ not json").await;
    let source = HttpContentSource::new(&server.uri(), FetchSettings::default()).unwrap();

    let err = source.fetch_catalog().await.unwrap_err();
    assert_eq!(err.kind, SourceErrorKind::Malformed);
}

#[tokio::test]
async fn http_source_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/content/versions.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string(CATALOG),
        )
        .mount(&server)
        .await;
    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let source = HttpContentSource::new(&server.uri(), settings).unwrap();

    let err = source.fetch_catalog().await.unwrap_err();
    assert_eq!(err.kind, SourceErrorKind::Timeout);
}

#[tokio::test]
async fn http_source_rejects_oversized_documents() {
    let server = serve("/content/versions.json", CATALOG).await;
    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let source = HttpContentSource::new(&server.uri(), settings).unwrap();

    let err = source.fetch_catalog().await.unwrap_err();
    assert!(matches!(err.kind, SourceErrorKind::TooLarge { max_bytes: 10, .. }));
}

#[test]
fn http_source_requires_a_valid_base() {
    let err = HttpContentSource::new("not a url", FetchSettings::default()).unwrap_err();
    assert_eq!(err.kind, SourceErrorKind::InvalidUrl);
}

#[tokio::test]
async fn dir_source_reads_site_layout() {
    let temp = TempDir::new().unwrap();
    let content = temp.path().join("content");
    fs::create_dir_all(&content).unwrap();
    fs::write(content.join("versions.json"), CATALOG).unwrap();
    fs::write(content.join("v2.json"), STEPS).unwrap();

    let source = DirContentSource::new(temp.path(), &FetchSettings::default());
    let catalog = source.fetch_catalog().await.expect("catalog");
    assert_eq!(catalog.versions.len(), 2);
    let config = source.fetch_content("v2").await.expect("content");
    assert_eq!(config.steps[1].title, "Connect");

    let err = source.fetch_content("v1").await.unwrap_err();
    assert_eq!(err.kind, SourceErrorKind::Io);
    let err = source.fetch_content("../content/v2").await.unwrap_err();
    assert_eq!(err.kind, SourceErrorKind::InvalidVersion);
}
