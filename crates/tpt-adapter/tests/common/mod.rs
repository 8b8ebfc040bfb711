/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for tpt-adapter tests

use tpt_adapter::{Config, TptClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const APP_TOKEN: &str = "app-token";
pub const USER_TOKEN: &str = "user-token";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Config pointing at the mock server
pub fn test_config(server: &MockServer) -> Config {
    Config::new(server.uri(), "test-client", "test-secret")
}

/// Token endpoint answering with [`APP_TOKEN`]
#[allow(dead_code)]
pub async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": APP_TOKEN,
            "expiry": "2030-01-01T00:00:00Z",
        })))
        .mount(server)
        .await;
}

/// Client that already completed the client-credentials handshake
#[allow(dead_code)]
pub async fn authenticated_client(server: &MockServer) -> TptClient {
    mount_token_endpoint(server).await;
    let client = TptClient::new(test_config(server)).expect("client init");
    client.oauth().await.expect("oauth");
    client
}
