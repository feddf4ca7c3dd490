use std::time::Duration;

use syndkit::config::FetchConfig;
use syndkit::feed::{fetch_all, fetch_all_until, FetchError};
use syndkit::FeedFormat;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ATOM: &str = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>A</title></feed>"#;
const JSON: &str = r#"{"version":"https://jsonfeed.org/version/1.1","items":[]}"#;

fn local_config() -> FetchConfig {
    FetchConfig {
        allow_private_hosts: true,
        concurrency: 2,
        ..FetchConfig::default()
    }
}

async fn serve(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_batch_isolates_failures() {
    let server = MockServer::start().await;
    serve(&server, "/atom", ResponseTemplate::new(200).set_body_string(ATOM)).await;
    serve(&server, "/json", ResponseTemplate::new(200).set_body_string(JSON)).await;
    serve(&server, "/gone", ResponseTemplate::new(410)).await;

    let urls = vec![
        format!("{}/atom", server.uri()),
        format!("{}/gone", server.uri()),
        format!("{}/json", server.uri()),
        "ftp://example.com/feed".to_string(),
    ];
    let mut outcomes = fetch_all(&reqwest::Client::new(), urls, &local_config()).await;
    assert_eq!(outcomes.len(), 4);
    outcomes.sort_by(|a, b| a.url.cmp(&b.url));

    assert!(matches!(outcomes[0].result, Err(FetchError::InvalidUrl(_))));
    assert_eq!(
        outcomes[1].result.as_ref().map(|feed| feed.format()).ok(),
        Some(FeedFormat::Atom)
    );
    assert!(matches!(outcomes[2].result, Err(FetchError::HttpStatus(410))));
    assert_eq!(
        outcomes[3].result.as_ref().map(|feed| feed.format()).ok(),
        Some(FeedFormat::Json)
    );
}

#[tokio::test]
async fn test_shutdown_drops_pending_fetches() {
    let server = MockServer::start().await;
    serve(&server, "/fast", ResponseTemplate::new(200).set_body_string(ATOM)).await;
    serve(
        &server,
        "/slow",
        ResponseTemplate::new(200)
            .set_body_string(ATOM)
            .set_delay(Duration::from_secs(10)),
    )
    .await;

    let urls = vec![format!("{}/fast", server.uri()), format!("{}/slow", server.uri())];
    let outcomes = fetch_all_until(
        &reqwest::Client::new(),
        urls,
        &local_config(),
        tokio::time::sleep(Duration::from_millis(500)),
    )
    .await;

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].url.ends_with("/fast"));
    assert!(outcomes[0].result.is_ok());
}

#[tokio::test]
async fn test_timeout_applies_to_whole_download() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/slow",
        ResponseTemplate::new(200)
            .set_body_string(ATOM)
            .set_delay(Duration::from_secs(5)),
    )
    .await;

    let config = FetchConfig {
        timeout_secs: 1,
        ..local_config()
    };
    let outcomes = fetch_all(
        &reqwest::Client::new(),
        vec![format!("{}/slow", server.uri())],
        &config,
    )
    .await;
    assert!(matches!(outcomes[0].result, Err(FetchError::Timeout)));
}
