//! HTTP client for Fleep chat hooks.
//!
//! Each hook is addressed by a hash appended to the hook base URL. A message
//! is delivered as a form-encoded POST carrying a single `message` field.
//! Delivery is at most once: there are no retries, and a slow hook is cut off
//! by the client timeout.

use std::time::{Duration, Instant};

use reqwest::Url;
use tracing::{info_span, Instrument};

use crate::error::{DeliveryError, Result};

/// Base URL of Fleep's incoming webhooks.
pub const DEFAULT_HOOK_URL: &str = "https://fleep.io/hook";

/// Parses a hook base URL, requiring one the hook hash can be appended to.
///
/// # Errors
///
/// Returns `DeliveryError::ConfigurationError` if `raw` does not parse or
/// cannot carry a path.
pub fn parse_hook_url(raw: &str) -> Result<Url> {
    let hook_url = Url::parse(raw)
        .map_err(|e| DeliveryError::configuration(format!("invalid hook URL {raw}: {e}")))?;

    if hook_url.cannot_be_a_base() {
        return Err(DeliveryError::configuration(format!("hook URL {raw} cannot carry a path")));
    }

    Ok(hook_url)
}

/// Configuration for the Fleep hook client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the hook hash is appended to.
    pub hook_url: String,
    /// Timeout for a single delivery, connection included.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            hook_url: DEFAULT_HOOK_URL.to_string(),
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECONDS),
            user_agent: format!("hookrelay/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Client that posts rendered messages to Fleep hooks.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct FleepClient {
    client: reqwest::Client,
    hook_url: Url,
    config: ClientConfig,
}

/// Outcome of a completed delivery.
#[derive(Debug, Clone)]
pub struct ForwardResponse {
    /// HTTP status code returned by the hook.
    pub status_code: u16,
    /// Total duration of the request.
    pub duration: Duration,
    /// Whether the hook answered with a 2xx status.
    pub is_success: bool,
}

impl FleepClient {
    /// Creates a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::ConfigurationError` if the hook URL cannot be
    /// parsed or cannot carry a path, or if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let hook_url = parse_hook_url(&config.hook_url)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                DeliveryError::configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, hook_url, config })
    }

    /// Creates a client for the public Fleep endpoint with default settings.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Destination URL for the hook identified by `hash`.
    ///
    /// The hash becomes a single, percent-encoded path segment.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::ConfigurationError` if the base URL cannot
    /// carry a path.
    pub fn hook_url(&self, hash: &str) -> Result<Url> {
        let mut url = self.hook_url.clone();
        url.path_segments_mut()
            .map_err(|()| DeliveryError::configuration("hook URL cannot carry a path"))?
            .pop_if_empty()
            .push(hash);

        Ok(url)
    }

    /// Posts `message` to the hook identified by `hash`.
    ///
    /// Any HTTP response counts as delivered; the status is reported back
    /// for logging only.
    ///
    /// # Errors
    ///
    /// - `Timeout` if the hook does not answer within the configured timeout
    /// - `NetworkError` for connection, DNS or TLS failures
    pub async fn forward(&self, hash: &str, message: &str) -> Result<ForwardResponse> {
        let url = self.hook_url(hash)?;
        let span = info_span!("fleep_delivery", hook = %hash, url = %url);

        async move {
            tracing::debug!(message_len = message.len(), "Posting message to Fleep hook");

            let start_time = Instant::now();
            let response =
                match self.client.post(url).form(&[("message", message)]).send().await {
                    Ok(response) => response,
                    Err(e) => {
                        let duration = start_time.elapsed();
                        tracing::warn!(duration_ms = duration.as_millis(), "Request failed: {}", e);

                        if e.is_timeout() {
                            return Err(DeliveryError::timeout(self.config.timeout.as_secs()));
                        }
                        if e.is_connect() {
                            return Err(DeliveryError::network(format!("connection failed: {e}")));
                        }
                        return Err(DeliveryError::network(e.to_string()));
                    },
                };

            let duration = start_time.elapsed();
            let status = response.status();

            if status.is_success() {
                tracing::info!(
                    status = %status,
                    duration_ms = duration.as_millis(),
                    "Fleep hook response status"
                );
            } else {
                tracing::warn!(
                    status = %status,
                    duration_ms = duration.as_millis(),
                    "Fleep hook response status"
                );
            }

            Ok(ForwardResponse {
                status_code: status.as_u16(),
                duration,
                is_success: status.is_success(),
            })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> FleepClient {
        FleepClient::new(ClientConfig {
            hook_url: format!("{}/hook", server.uri()),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn unparsable_hook_urls_are_rejected() {
        for raw in ["http://[", "fleep.io/hook", "mailto:ops@fleep.io"] {
            let error = parse_hook_url(raw).unwrap_err();
            assert!(matches!(error, DeliveryError::ConfigurationError { .. }), "url {raw}");
        }

        assert!(parse_hook_url("https://fleep.io/hook").is_ok());
    }

    #[test]
    fn default_hook_url_appends_hash() {
        let client = FleepClient::with_defaults().unwrap();

        assert_eq!(client.hook_url("abcHash").unwrap().as_str(), "https://fleep.io/hook/abcHash");
    }

    #[test]
    fn trailing_slash_in_base_is_not_doubled() {
        let client = FleepClient::new(ClientConfig {
            hook_url: "https://fleep.io/hook/".to_string(),
            ..ClientConfig::default()
        })
        .unwrap();

        assert_eq!(client.hook_url("abc").unwrap().as_str(), "https://fleep.io/hook/abc");
    }

    #[test]
    fn hash_is_a_single_encoded_segment() {
        let client = FleepClient::with_defaults().unwrap();

        assert_eq!(
            client.hook_url("a/b?c").unwrap().as_str(),
            "https://fleep.io/hook/a%2Fb%3Fc"
        );
    }

    #[test]
    fn invalid_hook_url_rejected() {
        let result = FleepClient::new(ClientConfig {
            hook_url: "not a url".to_string(),
            ..ClientConfig::default()
        });
        assert!(matches!(result, Err(DeliveryError::ConfigurationError { .. })));

        let result = FleepClient::new(ClientConfig {
            hook_url: "mailto:hooks@fleep.io".to_string(),
            ..ClientConfig::default()
        });
        assert!(matches!(result, Err(DeliveryError::ConfigurationError { .. })));
    }

    #[tokio::test]
    async fn message_sent_as_form_field() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/hook/abcHash"))
            .and(matchers::header("content-type", "application/x-www-form-urlencoded"))
            .and(matchers::body_string("message=Build+7+passed+%3C%3CCircleCI%3E%3E"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = client_for(&mock_server)
            .forward("abcHash", "Build 7 passed <<CircleCI>>")
            .await
            .unwrap();

        assert_eq!(response.status_code, 200);
        assert!(response.is_success);
    }

    #[tokio::test]
    async fn error_status_still_counts_as_delivered() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = client_for(&mock_server).forward("missing", "hello").await.unwrap();

        assert_eq!(response.status_code, 404);
        assert!(!response.is_success);
    }

    #[tokio::test]
    async fn slow_hook_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&mock_server)
            .await;

        let client = FleepClient::new(ClientConfig {
            hook_url: format!("{}/hook", mock_server.uri()),
            timeout: Duration::from_millis(200),
            ..ClientConfig::default()
        })
        .unwrap();

        let result = client.forward("slow", "hello").await;
        assert!(matches!(result, Err(DeliveryError::Timeout { .. })));
    }
}
