/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for HTTP client
[POS]:    Integration tests - HTTP endpoints
[UPDATE]: When HTTP endpoints change
*/

mod common;

use btce_adapter::{
    BtceClient, BtceError, ClientConfig, Credentials, HistoryFilter, RequestParams, TradeRequest,
    TradeType,
};
use common::{mock_client, setup_mock_server, test_credentials};
use rstest::rstest;
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_creation() {
    let _client = assert_ok!(BtceClient::new());
}

#[test]
fn test_client_with_config() {
    let config = ClientConfig::default();
    let _client = assert_ok!(BtceClient::with_config(config, test_credentials(), 0));
}

#[test]
fn test_client_credentials_roundtrip() {
    let client = assert_ok!(BtceClient::with_credentials(test_credentials(), 5));
    let stored = client.credentials();

    assert_eq!(stored.public_key.as_deref(), Some("test-public-key"));
    assert_eq!(stored.secret_key.as_deref(), Some("test-secret-key"));
}

#[rstest]
#[case("ticker")]
#[case("trades")]
#[case("depth")]
#[case("fee")]
#[tokio::test]
async fn test_public_methods_require_pair(#[case] name: &str) {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = mock_client(&server, Credentials::default());
    let err = match name {
        "ticker" => client.ticker("").await.map(|_| ()),
        "trades" => client.trades("", None).await.map(|_| ()),
        "depth" => client.depth("").await.map(|_| ()),
        _ => client.fee("").await.map(|_| ()),
    }
    .expect_err("pair is required");

    assert!(err.is_precondition());
    assert_eq!(err.to_string(), "Missing pair");
}

#[rstest]
#[case(Credentials { public_key: Some("pk".into()), secret_key: None }, "secret_key")]
#[case(Credentials { public_key: None, secret_key: Some("sk".into()) }, "public_key")]
#[case(Credentials::default(), "secret_key")]
#[tokio::test]
async fn test_trade_api_requires_both_keys(
    #[case] credentials: Credentials,
    #[case] missing: &'static str,
) {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = mock_client(&server, credentials);
    let err = client
        .trans_history(&HistoryFilter::default())
        .await
        .expect_err("keys are required");

    match err {
        BtceError::MissingCredential(field) => assert_eq!(field, missing),
        other => panic!("Expected MissingCredential, got {other:?}"),
    }
}

#[tokio::test]
async fn test_trade_without_amount_is_rejected_locally() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = mock_client(&server, test_credentials());
    let request = TradeRequest {
        pair: Some("btc_usd".to_string()),
        trade_type: Some(TradeType::Buy),
        rate: Some(100.into()),
        ..Default::default()
    };

    let err = client.trade(request).await.expect_err("amount is required");
    assert_eq!(err.to_string(), "Missing amount");
}

#[tokio::test]
async fn test_nonce_resync_end_to_end() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .and(body_string("method=getInfo&nonce=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": 0,
            "error": "invalid nonce parameter; on key:41, you sent:'1', you should send:42"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .and(body_string("method=getInfo&nonce=43"))
        .and(header("Key", "test-public-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": 1,
            "return": {"funds": {"btc": 1}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server, test_credentials());
    let result = assert_ok!(
        client
            .trade_api_request(RequestParams::for_method("getInfo"))
            .await
    );

    assert_eq!(result, json!({"funds": {"btc": 1}}));
}

#[tokio::test]
async fn test_remote_error_exposes_payload() {
    let server = setup_mock_server().await;
    let body = json!({"success": 0, "error": "no orders"});
    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server, test_credentials());
    let err = client
        .active_orders(Some("btc_usd"))
        .await
        .expect_err("no orders");

    assert_eq!(err.payload(), Some(&body));
    assert!(!err.is_retryable());
}
