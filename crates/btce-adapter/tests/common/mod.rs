/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for btce-adapter tests

use btce_adapter::{BtceClient, ClientConfig, Credentials};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Fixed key pair for signed requests
pub fn test_credentials() -> Credentials {
    Credentials::new("test-public-key", "test-secret-key")
}

/// Client whose both endpoints point at the mock server
pub fn mock_client(server: &MockServer, credentials: Credentials) -> BtceClient {
    let config = ClientConfig {
        trade_base_url: format!("{}/tapi/", server.uri()),
        public_base_url: format!("{}/api/3/", server.uri()),
        ..ClientConfig::default()
    };
    BtceClient::with_config(config, credentials, 0).expect("client init")
}
