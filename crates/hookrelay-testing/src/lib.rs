//! Test infrastructure for the webhook relay.
//!
//! Provides payload fixture builders and a [`TestRelay`] harness that wires
//! the real router to a mock Fleep server, so tests can assert on both the
//! inbound response and what reached the hook.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::{net::TcpListener, time::Duration};

use axum::{
    body::Body,
    http::{header::USER_AGENT, HeaderMap, Request, StatusCode},
    Router,
};
use hookrelay_api::{create_router, AppState, SharedSecret};
use hookrelay_delivery::{ClientConfig, FleepClient};
use tower::ServiceExt;
use wiremock::MockServer;

pub mod fixtures;

pub use fixtures::{BuildKiteBuilder, CircleCiBuilder};

/// Secret the harness configures unless told otherwise.
pub const TEST_SECRET: &str = "secret123";

/// `User-Agent` BuildKite sends.
pub const BUILDKITE_AGENT: &str = "Buildkite-Request";

/// Router under test plus the mock Fleep server it delivers to.
pub struct TestRelay {
    /// Mock standing in for `https://fleep.io`; hooks live under `/hook/`
    pub fleep: MockServer,
    router: Router,
}

/// Buffered response from the router.
#[derive(Debug)]
pub struct TestResponse {
    /// Response status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as text
    pub body: String,
}

impl TestRelay {
    /// Starts a relay configured with [`TEST_SECRET`].
    pub async fn start() -> Self {
        Self::with_secret(TEST_SECRET).await
    }

    /// Starts a relay configured with `secret`.
    pub async fn with_secret(secret: &str) -> Self {
        let fleep = MockServer::start().await;
        let hook_url = format!("{}/hook", fleep.uri());
        Self::build(fleep, secret, hook_url)
    }

    /// Starts a relay whose hook URL points at a closed port.
    ///
    /// The mock server still runs so tests can assert it saw nothing.
    pub async fn with_unreachable_hook() -> Self {
        let fleep = MockServer::start().await;
        Self::build(fleep, TEST_SECRET, unreachable_url())
    }

    /// Starts a relay whose deliveries give up after `timeout`.
    pub async fn with_delivery_timeout(timeout: Duration) -> Self {
        let fleep = MockServer::start().await;
        let hook_url = format!("{}/hook", fleep.uri());
        let config = ClientConfig { hook_url, timeout, ..ClientConfig::default() };
        Self::build_with(fleep, TEST_SECRET, config)
    }

    fn build(fleep: MockServer, secret: &str, hook_url: String) -> Self {
        Self::build_with(fleep, secret, ClientConfig { hook_url, ..ClientConfig::default() })
    }

    fn build_with(fleep: MockServer, secret: &str, config: ClientConfig) -> Self {
        let client = FleepClient::new(config).expect("test hook URL is valid");
        let router = create_router(AppState::new(SharedSecret::new(secret), client));

        Self { fleep, router }
    }

    /// The router under test.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Sends `request` through the router and buffers the response.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router().oneshot(request).await.expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");

        TestResponse { status, headers, body: String::from_utf8_lossy(&bytes).into_owned() }
    }

    /// Sends a request with an empty body.
    pub async fn request(&self, method: &str, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request build");

        self.send(request).await
    }

    /// Posts `body` to `/webhook/{auth}/{hash}`.
    ///
    /// `auth` and `hash` are percent-encoded, so they reach the handler
    /// exactly as given.
    pub async fn post_webhook(
        &self,
        auth: &str,
        hash: &str,
        user_agent: Option<&str>,
        body: impl Into<Body>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method("POST")
            .uri(webhook_path(auth, hash))
            .header("content-type", "application/json");

        if let Some(agent) = user_agent {
            builder = builder.header(USER_AGENT, agent);
        }

        self.send(builder.body(body.into()).expect("request build")).await
    }

    /// `message` fields of every request the mock Fleep server received,
    /// with the request path.
    pub async fn delivered_messages(&self) -> Vec<(String, String)> {
        let requests = self.fleep.received_requests().await.unwrap_or_default();

        requests
            .iter()
            .map(|request| {
                let message = url::form_urlencoded::parse(&request.body)
                    .find(|(key, _)| key == "message")
                    .map(|(_, value)| value.into_owned())
                    .unwrap_or_default();

                (request.url.path().to_string(), message)
            })
            .collect()
    }
}

/// Path of the webhook route with `auth` and `hash` as encoded segments.
pub fn webhook_path(auth: &str, hash: &str) -> String {
    let mut url = url::Url::parse("http://relay.test/").expect("static base URL");
    url.path_segments_mut().expect("base URL has a path").clear().extend(["webhook", auth, hash]);

    url.path().to_string()
}

/// Returns a loopback hook URL nothing is listening on.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    format!("http://{addr}/hook")
}
