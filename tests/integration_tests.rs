//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: YAML config → registration → HTTP form post → decoded response

use rust_decimal::Decimal;
use sagepay_client::decode::DecoderConfig;
use sagepay_client::response::{AvsCv2Result, Field, MatchResult};
use sagepay_client::{
    gateway, load_config_from_str, Address, Error, GatewayClient, RegistrationOptions,
    ResponseDecoder, Status,
};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OK_BODY: &str = "VPSProtocol=2.23\r\n\
Status=OK\r\n\
StatusDetail=Transaction completed successfully\r\n\
VPSTxId={A5A5D6A6-3A1D-4C4A-8E7F-3A7E1F3C3D3B}\r\n\
SecurityKey=ABC123\r\n\
TxAuthNo=4\r\n\
AVSCV2=ALL MATCH\r\n\
AddressResult=MATCHED\r\n\
PostCodeResult=NOTMATCHED\r\n\
CV2Result=NOTCHECKED\r\n\
3DSecureStatus=OK\r\n\
CAVV=AAABARR5kwAAAAAAAAAAAAAAAAA=\r\n";

const NOTAUTHED_BODY: &str = "VPSProtocol=2.23\r\n\
Status=NOTAUTHED\r\n\
StatusDetail=The transaction was not authorised\r\n\
TxAuthNo=4\r\n";

fn config_yaml(endpoint: &str) -> String {
    format!(
        r#"
defaults:
  mode: simulator
  vendor: rubaidh
  notification_url: http://test.host/notification
  currency: GBP
endpoint_url: {endpoint}/register
http:
  timeout_seconds: 5
  max_retries: 0
"#
    )
}

fn address() -> Address {
    Address {
        first_names: "Joe".to_string(),
        surname: "Bloggs".to_string(),
        address_1: "1 Main Street".to_string(),
        city: "London".to_string(),
        post_code: "W1A 1AA".to_string(),
        country: "GB".to_string(),
        ..Address::default()
    }
}

fn options() -> RegistrationOptions {
    RegistrationOptions::new()
        .amount(Decimal::new(1000, 2))
        .description("Chocolate")
        .billing_address(address())
}

// ============================================================================
// Registration Round Trip
// ============================================================================

#[tokio::test]
async fn test_register_payment_ok() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("TxType=PAYMENT"))
        .and(body_string_contains("Vendor=rubaidh"))
        .and(body_string_contains("Amount=10.00"))
        .and(body_string_contains("Currency=GBP"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OK_BODY))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = load_config_from_str(&config_yaml(&mock_server.uri())).unwrap();
    let (registrar, client) = gateway::from_config(&config).unwrap();

    let registration = registrar.payment(options()).unwrap();
    let response = client.register(&registration).await.unwrap();

    assert!(response.is_ok());
    assert_eq!(response.vps_protocol(), Some("2.23"));
    assert_eq!(
        response.status_detail(),
        Some("Transaction completed successfully")
    );
    assert_eq!(response.tx_auth_no().unwrap(), Some("4"));
    assert_eq!(response.avs_cv2().unwrap(), Some(AvsCv2Result::AllMatch));
    assert_eq!(response.address_result().unwrap(), Some(MatchResult::Matched));
    assert_eq!(
        response.post_code_result().unwrap(),
        Some(MatchResult::NotMatched)
    );
    assert_eq!(response.cv2_result().unwrap(), Some(MatchResult::NotChecked));
    assert_eq!(
        response.cavv().unwrap(),
        Some("AAABARR5kwAAAAAAAAAAAAAAAAA=")
    );
    // Keys outside the attribute vocabulary are dropped by default
    assert!(response.extensions().is_empty());
}

#[tokio::test]
async fn test_register_payment_not_authed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NOTAUTHED_BODY))
        .mount(&mock_server)
        .await;

    let config = load_config_from_str(&config_yaml(&mock_server.uri())).unwrap();
    let (registrar, client) = gateway::from_config(&config).unwrap();

    let response = client
        .register(&registrar.payment(options()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), Some(Status::NotAuthed));
    assert!(response.is_failed());
    assert_eq!(
        response.status_detail(),
        Some("The transaction was not authorised")
    );

    let err = response.tx_auth_no().unwrap_err();
    assert!(err.is_access_denied());
    assert_eq!(
        err.to_string(),
        "Unable to retrieve tx_auth_no as the status was NOTAUTHED (not OK)"
    );
}

#[tokio::test]
async fn test_register_retains_unknown_fields_when_configured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OK_BODY))
        .mount(&mock_server)
        .await;

    let mut config = load_config_from_str(&config_yaml(&mock_server.uri())).unwrap();
    config.decoder = DecoderConfig::new()
        .with_retain_unknown_fields(true)
        .with_retain_untranslated_values(true);
    let (registrar, client) = gateway::from_config(&config).unwrap();

    let response = client
        .register(&registrar.payment(options()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.extension("SecurityKey"), Some("ABC123"));
    assert_eq!(
        response.extension("VPSTxId"),
        Some("{A5A5D6A6-3A1D-4C4A-8E7F-3A7E1F3C3D3B}")
    );
    assert_eq!(response.untranslated(Field::AvsCv2), None);
}

#[tokio::test]
async fn test_register_http_error_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = load_config_from_str(&config_yaml(&mock_server.uri())).unwrap();
    let (registrar, client) = gateway::from_config(&config).unwrap();

    let err = client
        .register(&registrar.payment(options()).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_client_with_explicit_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/custom"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Status=MALFORMED\n"))
        .mount(&mock_server)
        .await;

    let config = load_config_from_str(&config_yaml(&mock_server.uri())).unwrap();
    let (registrar, _) = gateway::from_config(&config).unwrap();
    let client = GatewayClient::new(
        Box::new(sagepay_client::http::HttpClient::new().unwrap()),
        ResponseDecoder::new(),
    )
    .with_endpoint(format!("{}/custom", mock_server.uri()));

    let response = client
        .register(&registrar.payment(options()).unwrap())
        .await
        .unwrap();
    assert!(response.is_malformed());
    assert!(response.avs_cv2().is_err());
}

// ============================================================================
// Validation Before Transport
// ============================================================================

#[test]
fn test_registration_missing_defaults_fails() {
    let config = load_config_from_str("defaults:\n  vendor: rubaidh").unwrap();
    let (registrar, _) = gateway::from_config(&config).unwrap();

    let err = registrar.payment(options()).unwrap_err();
    assert!(matches!(err, Error::MissingRegistrationField { .. }));
}
