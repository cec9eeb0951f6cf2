//! Gateway client
//!
//! Ties a registration to a transport and the response decoder: the
//! registration is posted as a form, and the body the gateway returns is
//! handed, as received, to the decoder.

use crate::config::GatewayConfig;
use crate::decode::ResponseDecoder;
use crate::error::Result;
use crate::http::HttpClient;
use crate::registration::{Registrar, TransactionRegistration};
use crate::response::{Response, Status};
use async_trait::async_trait;
use tracing::{debug, info};

/// Network exchange with the gateway
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a url-encoded form, returning the response body unchanged
    async fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<String>;
}

/// Posts registrations and decodes the replies
pub struct GatewayClient {
    transport: Box<dyn Transport>,
    decoder: ResponseDecoder,
    endpoint_override: Option<String>,
}

impl GatewayClient {
    /// Create a client over any transport
    pub fn new(transport: Box<dyn Transport>, decoder: ResponseDecoder) -> Self {
        Self {
            transport,
            decoder,
            endpoint_override: None,
        }
    }

    /// Create an HTTP-backed client from configuration
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let http = HttpClient::with_config(config.http.to_client_config())?;
        let mut client = Self::new(
            Box::new(http),
            ResponseDecoder::with_config(config.decoder),
        );
        client.endpoint_override.clone_from(&config.endpoint_url);
        Ok(client)
    }

    /// Post every registration to `url` instead of the mode's endpoint
    #[must_use]
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint_override = Some(url.into());
        self
    }

    pub fn decoder(&self) -> &ResponseDecoder {
        &self.decoder
    }

    /// URL a registration will be posted to
    pub fn endpoint_for<'a>(&'a self, registration: &TransactionRegistration) -> &'a str {
        self.endpoint_override
            .as_deref()
            .unwrap_or_else(|| registration.endpoint_url())
    }

    /// Post a registration and decode the gateway's reply
    ///
    /// Transport failures are errors; a reply with a failed status is a
    /// successfully decoded [`Response`] and must be checked by the caller.
    pub async fn register(&self, registration: &TransactionRegistration) -> Result<Response> {
        let url = self.endpoint_for(registration);
        debug!(
            url,
            vendor_tx_code = %registration.vendor_tx_code(),
            "Posting registration"
        );

        let body = self.transport.post_form(url, &registration.to_form()).await?;
        let response = self.decoder.decode(&body);

        info!(
            vendor_tx_code = %registration.vendor_tx_code(),
            status = response.status().map(Status::as_wire),
            "Registration completed"
        );
        Ok(response)
    }
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("decoder", &self.decoder)
            .field("endpoint_override", &self.endpoint_override)
            .finish_non_exhaustive()
    }
}

/// Build a registrar and client from one configuration
pub fn from_config(config: &GatewayConfig) -> Result<(Registrar, GatewayClient)> {
    let registrar = Registrar::new(config.defaults.clone());
    let client = GatewayClient::from_config(config)?;
    Ok((registrar, client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecoderConfig;
    use crate::error::Error;
    use crate::registration::{Address, RegistrationOptions};
    use crate::types::Mode;
    use rust_decimal::Decimal;
    use std::sync::{Arc, Mutex};

    type Sent = Arc<Mutex<Vec<(String, Vec<(String, String)>)>>>;

    /// Transport replying with a canned body and recording what was sent
    struct CannedTransport {
        body: String,
        sent: Sent,
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<String> {
            self.sent
                .lock()
                .unwrap()
                .push((url.to_string(), form.to_vec()));
            Ok(self.body.clone())
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl Transport for FailingTransport {
        async fn post_form(&self, _url: &str, _form: &[(String, String)]) -> Result<String> {
            Err(Error::http_status(500, "boom"))
        }
    }

    fn registration() -> TransactionRegistration {
        let address = Address {
            first_names: "Joe".to_string(),
            surname: "Bloggs".to_string(),
            address_1: "1 Street".to_string(),
            city: "London".to_string(),
            post_code: "W1 1AA".to_string(),
            country: "GB".to_string(),
            ..Address::default()
        };
        Registrar::new(
            RegistrationOptions::new()
                .mode(Mode::Test)
                .vendor("rubaidh")
                .currency("GBP")
                .notification_url("https://shop.example/notify"),
        )
        .payment(
            RegistrationOptions::new()
                .amount(Decimal::new(999, 2))
                .description("Widget")
                .billing_address(address),
        )
        .unwrap()
    }

    fn canned(body: &str) -> (GatewayClient, Sent) {
        let sent = Sent::default();
        let transport = CannedTransport {
            body: body.to_string(),
            sent: Arc::clone(&sent),
        };
        (
            GatewayClient::new(Box::new(transport), ResponseDecoder::new()),
            sent,
        )
    }

    #[tokio::test]
    async fn test_register_decodes_reply() {
        let (client, sent) = canned("VPSProtocol=3.00\r\nStatus=OK\r\nStatusDetail=Done\r\n");
        let registration = registration();

        let response = client.register(&registration).await.unwrap();
        assert!(response.is_ok());
        assert_eq!(response.status_detail(), Some("Done"));

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, Mode::Test.registration_url());
        assert_eq!(sent[0].1, registration.to_form());
    }

    #[tokio::test]
    async fn test_register_failed_status_is_not_an_error() {
        let (client, _) = canned("Status=INVALID\r\nStatusDetail=Bad vendor\r\n");
        let response = client.register(&registration()).await.unwrap();
        assert_eq!(response.status(), Some(Status::Invalid));
        assert!(response.tx_auth_no().is_err());
    }

    #[tokio::test]
    async fn test_register_uses_endpoint_override() {
        let (client, sent) = canned("Status=OK");
        let client = client.with_endpoint("http://localhost:9999/register");
        client.register(&registration()).await.unwrap();
        assert_eq!(sent.lock().unwrap()[0].0, "http://localhost:9999/register");
    }

    #[tokio::test]
    async fn test_register_propagates_transport_error() {
        let client = GatewayClient::new(Box::new(FailingTransport), ResponseDecoder::new());
        let err = client.register(&registration()).await.unwrap_err();
        assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
    }

    #[test]
    fn test_from_config_applies_settings() {
        let mut config = GatewayConfig::default();
        config.endpoint_url = Some("http://localhost:1234/".to_string());
        config.decoder = DecoderConfig::new().with_retain_unknown_fields(true);

        let (registrar, client) = from_config(&config).unwrap();
        assert_eq!(registrar.defaults(), &config.defaults);
        assert!(client.decoder().config().retain_unknown_fields);
        assert_eq!(client.endpoint_for(&registration()), "http://localhost:1234/");
    }
}
