//! Liveness endpoint tests.
//!
//! The probe must answer on both methods without touching the Fleep hook,
//! and every response carries a request id.

use axum::http::StatusCode;
use futures::future::join_all;
use hookrelay_api::handlers::health::ALIVE_BODY;
use hookrelay_testing::TestRelay;

#[tokio::test]
async fn get_root_reports_alive() {
    let relay = TestRelay::start().await;

    let response = relay.request("GET", "/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, ALIVE_BODY);
}

#[tokio::test]
async fn post_root_reports_alive() {
    let relay = TestRelay::start().await;

    let response = relay.request("POST", "/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "I'm alive.");
}

#[tokio::test]
async fn liveness_never_contacts_fleep() {
    let relay = TestRelay::start().await;

    relay.request("GET", "/").await;
    relay.request("POST", "/").await;

    assert!(relay.delivered_messages().await.is_empty());
}

#[tokio::test]
async fn responses_carry_request_id() {
    let relay = TestRelay::start().await;

    let first = relay.request("GET", "/").await;
    let second = relay.request("GET", "/").await;

    let first_id = first.headers.get("x-request-id").expect("request id header");
    let second_id = second.headers.get("x-request-id").expect("request id header");
    assert_ne!(first_id, second_id, "each request gets its own id");
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let relay = TestRelay::start().await;

    assert_eq!(relay.request("GET", "/health").await.status, StatusCode::NOT_FOUND);
    assert_eq!(relay.request("POST", "/webhook/secret123").await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        relay.request("POST", "/webhook/secret123/abc/extra").await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn webhook_route_rejects_get() {
    let relay = TestRelay::start().await;

    let response = relay.request("GET", "/webhook/secret123/abcHash").await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn concurrent_liveness_checks() {
    let relay = TestRelay::start().await;

    let responses = join_all((0..16).map(|_| relay.request("GET", "/"))).await;

    for response in responses {
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, ALIVE_BODY);
    }
}
