//! Mock token server tests.
//!
//! These tests use wiremock to simulate the token endpoint and exercise the
//! reqwest-backed fetcher, alone and driven by a session holder.

mod common;

use std::time::Duration;

use serde_json::json;
use tokenkeep::error::TransportError;
use tokenkeep::{
    AuthStrategy, Error, HttpTokenFetcher, Origin, RefreshState, SessionHolder, TokenFetcher,
    token_endpoint,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{bootstrap, environment};

/// Origin of a mock server, as a browser would report it.
fn mock_origin(server: &MockServer) -> Origin {
    Origin::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

/// A fetcher over a client that gives up quickly.
fn short_timeout_fetcher() -> HttpTokenFetcher {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    HttpTokenFetcher::with_client(client)
}

async fn wait_for_state(holder: &SessionHolder, expected: RefreshState) {
    let mut rx = holder.watch_refresh_state();
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| *s == expected))
        .await
        .expect("refresh state not reached in time")
        .expect("session holder dropped");
}

// ============================================================================
// Fetcher Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/app/token"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "fresh-token",
            "tokenRefreshPeriod": 300
        })))
        .expect(1)
        .mount(&server)
        .await;

    let url = token_endpoint(&mock_origin(&server), "/app/").unwrap();
    let grant = HttpTokenFetcher::new().unwrap().fetch(&url).await.unwrap();

    assert_eq!(grant.token, "fresh-token");
    assert_eq!(grant.token_refresh_period, Some(300.0));
}

#[tokio::test]
async fn test_fetch_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "InternalServerError",
            "message": "token service unavailable"
        })))
        .mount(&server)
        .await;

    let url = token_endpoint(&mock_origin(&server), "/").unwrap();
    let err = HttpTokenFetcher::new()
        .unwrap()
        .fetch(&url)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("token service unavailable"));
}

#[tokio::test]
async fn test_fetch_unauthorized_without_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let url = token_endpoint(&mock_origin(&server), "/").unwrap();
    let err = HttpTokenFetcher::new()
        .unwrap()
        .fetch(&url)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_fetch_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jwt": "nope"})))
        .mount(&server)
        .await;

    let url = token_endpoint(&mock_origin(&server), "/").unwrap();
    let err = HttpTokenFetcher::new()
        .unwrap()
        .fetch(&url)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(TransportError::Decode { .. })));
    assert!(!err.may_indicate_session_end());
}

#[tokio::test]
async fn test_fetch_times_out_on_stalled_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"token": "late", "tokenRefreshPeriod": 60}))
                .set_delay(Duration::from_secs(3600)),
        )
        .mount(&server)
        .await;

    let url = token_endpoint(&mock_origin(&server), "/").unwrap();
    let err = short_timeout_fetcher().fetch(&url).await.unwrap_err();

    assert!(matches!(err, Error::Transport(TransportError::Timeout)));
    assert!(err.may_indicate_session_end());
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    // Bind and release a port so nothing is listening on it
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let origin = Origin::new(format!("http://127.0.0.1:{}", port)).unwrap();
    let url = token_endpoint(&origin, "/").unwrap();
    let err = HttpTokenFetcher::new()
        .unwrap()
        .fetch(&url)
        .await
        .unwrap_err();

    assert_eq!(err.status(), None);
    assert!(err.may_indicate_session_end());
}

// ============================================================================
// Holder Tests
// ============================================================================

#[tokio::test]
async fn test_holder_refreshes_against_token_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/app/token"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "fresh-token",
            "tokenRefreshPeriod": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let origin = mock_origin(&server);
    let holder = SessionHolder::start(
        &bootstrap("stale-token", Some(0.05)),
        std::sync::Arc::new(HttpTokenFetcher::new().unwrap()),
        environment(origin.as_str(), "/app/"),
    );

    wait_for_state(&holder, RefreshState::Idle).await;
    assert_eq!(holder.authentication_secret(), "fresh-token");

    let mut headers = reqwest::header::HeaderMap::new();
    holder.inject_auth_headers(&mut headers).unwrap();
    assert_eq!(headers["authorization"], "bearer fresh-token");
}

#[tokio::test]
async fn test_holder_keeps_token_when_endpoint_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let origin = mock_origin(&server);
    let holder = SessionHolder::start(
        &bootstrap("stale-token", Some(0.05)),
        std::sync::Arc::new(HttpTokenFetcher::new().unwrap()),
        environment(origin.as_str(), "/"),
    );

    wait_for_state(
        &holder,
        RefreshState::Waiting {
            delay: tokenkeep::auth::RETRY_DELAY,
        },
    )
    .await;
    assert_eq!(holder.authentication_secret(), "stale-token");
}

#[tokio::test]
async fn test_holder_retries_when_endpoint_stalls() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"token": "late", "tokenRefreshPeriod": 60}))
                .set_delay(Duration::from_secs(3600)),
        )
        .mount(&server)
        .await;

    let origin = mock_origin(&server);
    let holder = SessionHolder::start(
        &bootstrap("stale-token", Some(0.05)),
        std::sync::Arc::new(short_timeout_fetcher()),
        environment(origin.as_str(), "/"),
    );

    wait_for_state(
        &holder,
        RefreshState::Waiting {
            delay: tokenkeep::auth::RETRY_DELAY,
        },
    )
    .await;
    assert_eq!(holder.authentication_secret(), "stale-token");
}

#[tokio::test]
async fn test_bootstrap_file_round_trip_into_holder() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bootstrap.json");
    std::fs::write(
        &file,
        json!({
            "authToken": "from-file",
            "user": {"username": "carol", "displayName": "Carol"},
            "logoutUrl": "https://sso.example.com/logout"
        })
        .to_string(),
    )
    .unwrap();

    let bootstrap = tokenkeep::Bootstrap::from_file(&file).unwrap();
    let env = environment("https://app.example.com", "/");
    let holder = SessionHolder::start(
        &bootstrap,
        std::sync::Arc::new(HttpTokenFetcher::new().unwrap()),
        env.clone(),
    );

    assert_eq!(holder.authentication_secret(), "from-file");
    assert_eq!(holder.authenticated_user_now().unwrap().label(), "Carol");
    assert_eq!(holder.refresh_state(), RefreshState::Idle);

    holder.logout();
    assert_eq!(
        env.last_navigation().as_deref(),
        Some("https://sso.example.com/logout")
    );
}
