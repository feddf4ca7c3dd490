use std::future::Future;
use std::path::Path;

use futures::stream::{self, StreamExt};
use reqwest::header::USER_AGENT;
use thiserror::Error;

use super::Feed;
use crate::config::FetchConfig;
use crate::error::Error;
use crate::util::{validate_feed_url, UrlValidationError};

/// Errors that can occur while fetching a feed.
///
/// Transport problems, HTTP errors and parse failures all end up here so a
/// batch can report each feed's outcome uniformly.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL failed validation (scheme, private host)
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(#[from] UrlValidationError),
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body exceeded `max_feed_size`
    #[error("Response too large")]
    ResponseTooLarge,
    /// A local feed file could not be read
    #[error("Failed to read feed file: {0}")]
    Io(#[from] std::io::Error),
    /// The body is not a feed we can decode
    #[error("Parse error: {0}")]
    Feed(#[from] Error),
}

/// Result of fetching one URL in a batch.
#[derive(Debug)]
pub struct FetchOutcome {
    pub url: String,
    pub result: Result<Feed, FetchError>,
}

/// Downloads and parses a single feed.
///
/// # Errors
///
/// - [`FetchError::InvalidUrl`] - not http(s), or a private host while
///   `allow_private_hosts` is off
/// - [`FetchError::Timeout`] - request and body took longer than `timeout_secs`
/// - [`FetchError::HttpStatus`] - non-2xx response
/// - [`FetchError::ResponseTooLarge`] - body exceeded `max_feed_size`
/// - [`FetchError::Feed`] - the body is not a supported feed
///
/// No retries are attempted.
pub async fn fetch_feed(
    client: &reqwest::Client,
    url: &str,
    config: &FetchConfig,
) -> Result<Feed, FetchError> {
    let url = validate_feed_url(url, config.allow_private_hosts)?;
    tracing::debug!(url = %url, "Fetching feed");

    let download = async {
        let response = client
            .get(url.clone())
            .header(USER_AGENT, config.user_agent.as_str())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        read_limited_bytes(response, config.max_feed_size).await
    };

    let bytes = tokio::time::timeout(config.timeout(), download)
        .await
        .map_err(|_| FetchError::Timeout)??;

    Ok(Feed::parse(&bytes)?)
}

/// Fetches every URL with at most `concurrency` requests in flight.
///
/// Outcomes are returned in completion order, not input order. One feed's
/// failure never affects the others.
pub async fn fetch_all<I>(
    client: &reqwest::Client,
    urls: I,
    config: &FetchConfig,
) -> Vec<FetchOutcome>
where
    I: IntoIterator<Item = String>,
{
    fetch_all_until(client, urls, config, std::future::pending()).await
}

/// Like [`fetch_all`], but stops once `shutdown` resolves.
///
/// No new fetches start after shutdown and fetches still in flight are
/// dropped. Outcomes gathered before that point are returned.
pub async fn fetch_all_until<I, F>(
    client: &reqwest::Client,
    urls: I,
    config: &FetchConfig,
    shutdown: F,
) -> Vec<FetchOutcome>
where
    I: IntoIterator<Item = String>,
    F: Future<Output = ()>,
{
    let urls: Vec<String> = urls.into_iter().collect();
    let total = urls.len();
    if total == 0 {
        return Vec::new();
    }

    let outcomes: Vec<FetchOutcome> = stream::iter(urls)
        .map(|url| async move {
            let result = fetch_feed(client, &url, config).await;
            if let Err(e) = &result {
                tracing::warn!(url = %url, error = %e, "Feed fetch failed");
            }
            FetchOutcome { url, result }
        })
        .buffer_unordered(config.concurrency.max(1))
        .take_until(shutdown)
        .collect()
        .await;

    let ok = outcomes.iter().filter(|o| o.result.is_ok()).count();
    tracing::info!(
        ok = ok,
        failed = outcomes.len() - ok,
        cancelled = total - outcomes.len(),
        "Feed batch complete"
    );

    outcomes
}

/// Reads and parses a feed stored on disk.
pub async fn read_feed_file(path: impl AsRef<Path>) -> Result<Feed, FetchError> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    Ok(Feed::parse(&bytes)?)
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if usize::try_from(len).map_or(true, |len| len > limit) {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const VALID_RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
    <item><guid>1</guid><title>Test</title></item>
</channel></rss>"#;

    fn local_config() -> FetchConfig {
        FetchConfig {
            allow_private_hosts: true,
            ..FetchConfig::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .and(header("user-agent", "syndkit-test"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(VALID_RSS)
                    .insert_header("Content-Type", "application/xml"),
            )
            .mount(&mock_server)
            .await;

        let config = FetchConfig {
            user_agent: "syndkit-test".into(),
            ..local_config()
        };
        let feed = fetch_feed(
            &reqwest::Client::new(),
            &format!("{}/feed", mock_server.uri()),
            &config,
        )
        .await
        .unwrap();
        assert_eq!(feed.simplify().items.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_404_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let result = fetch_feed(
            &reqwest::Client::new(),
            &format!("{}/feed", mock_server.uri()),
            &local_config(),
        )
        .await;
        match result {
            Err(FetchError::HttpStatus(404)) => {}
            other => panic!("Expected HttpStatus(404), got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = fetch_feed(
            &reqwest::Client::new(),
            &format!("{}/feed", mock_server.uri()),
            &local_config(),
        )
        .await;
        assert!(matches!(result, Err(FetchError::HttpStatus(503))));
    }

    #[tokio::test]
    async fn test_malformed_feed_parse_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<not valid xml"))
            .mount(&mock_server)
            .await;

        let result = fetch_feed(
            &reqwest::Client::new(),
            &format!("{}/feed", mock_server.uri()),
            &local_config(),
        )
        .await;
        assert!(matches!(result, Err(FetchError::Feed(_))));
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(VALID_RSS))
            .mount(&mock_server)
            .await;

        let config = FetchConfig {
            max_feed_size: 16,
            ..local_config()
        };
        let result = fetch_feed(
            &reqwest::Client::new(),
            &format!("{}/feed", mock_server.uri()),
            &config,
        )
        .await;
        assert!(matches!(result, Err(FetchError::ResponseTooLarge)));
    }

    #[tokio::test]
    async fn test_private_host_rejected_by_default() {
        let mock_server = MockServer::start().await;
        let result = fetch_feed(
            &reqwest::Client::new(),
            &format!("{}/feed", mock_server.uri()),
            &FetchConfig::default(),
        )
        .await;
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let outcomes = fetch_all(&reqwest::Client::new(), Vec::new(), &local_config()).await;
        assert!(outcomes.is_empty());
    }
}
