//! Uzum Receipt-producer API client

pub mod types;

use crate::config::ReceiptConfig;
use crate::transport::{default_headers, header_value, Endpoint, HttpTransport};
use crate::Result;
use reqwest::header::HeaderName;
use serde_json::Value;
use std::fmt;
use types::*;
use url::Url;

/// Async client for the Receipt-producer API
pub struct ReceiptClient {
    transport: HttpTransport,
}

impl fmt::Debug for ReceiptClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiptClient")
            .field("base_url", &self.transport.base_url().as_str())
            .field("closed", &self.transport.is_closed())
            .finish()
    }
}

impl ReceiptClient {
    /// Create a new client with its own connection pool
    pub fn new(config: ReceiptConfig) -> Result<Self> {
        Self::build(config, None)
    }

    /// Create a client on top of an existing `reqwest` client.
    ///
    /// `reqwest::Client` clones share one connection pool. [`close`](Self::close)
    /// drops only this client's handle, so the pool stays open until every other
    /// clone held by the caller is dropped as well.
    pub fn with_http_client(config: ReceiptConfig, client: reqwest::Client) -> Result<Self> {
        Self::build(config, Some(client))
    }

    fn build(config: ReceiptConfig, client: Option<reqwest::Client>) -> Result<Self> {
        config.validate()?;

        let mut headers = default_headers();
        headers.insert(
            HeaderName::from_static("ssl-client-fingerprint"),
            header_value("ssl-client-fingerprint", &config.ssl_client_fingerprint, true)?,
        );

        let transport = HttpTransport::new(
            config.resolved_base_url()?,
            headers,
            None,
            config.timeout,
            client,
        )?;

        Ok(Self { transport })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &Url {
        self.transport.base_url()
    }

    /// Release the connection pool; `true` only for the call that released it
    pub fn close(&mut self) -> bool {
        self.transport.close()
    }

    pub fn is_closed(&self) -> bool {
        self.transport.is_closed()
    }

    /// Send any Receipt-producer endpoint
    pub async fn execute<E: Endpoint>(&self, endpoint: &E) -> Result<E::Response> {
        self.transport.execute(endpoint).await
    }

    /// Check that the service is up
    pub async fn health(&self) -> Result<Value> {
        self.execute(&Health).await
    }

    /// Issue a fiscal receipt for a payment
    pub async fn fiscal_receipt_generation(&self, receipt: &FiscalReceiptGeneration) -> Result<Value> {
        self.execute(receipt).await
    }

    /// Issue a fiscal receipt for a refund
    pub async fn fiscal_receipt_refund(&self, receipt: &FiscalReceiptRefund) -> Result<Value> {
        self.execute(receipt).await
    }

    /// Attach a fiscal QR code link to an operation
    pub async fn save_qr_code_url(
        &self,
        operation_id: impl Into<String>,
        qr_code_url: impl Into<String>,
        amount: u64,
    ) -> Result<Value> {
        self.execute(&SaveQrCodeUrl::new(operation_id, qr_code_url, amount))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteErrorKind;
    use crate::UzumError;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client_for(server: &Server) -> ReceiptClient {
        ReceiptClient::new(ReceiptConfig::new(server.url(), "fp-123")).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_get_without_signature() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/health")
            .match_header("ssl-client-fingerprint", "fp-123")
            .match_header("x-signature", Matcher::Missing)
            .with_status(200)
            .with_body(json!({"status": "ok"}).to_string())
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        assert_eq!(client.base_url().as_str(), format!("{}/", server.url()));

        let health = client.health().await.unwrap();
        assert_eq!(health["status"], "ok");
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_save_qr_code_url() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/save_qr_code_url")
            .match_body(Matcher::Json(json!({
                "operation_id": "op-1",
                "qr_code_url": "https://ofd.example.com/q/1",
                "amount": 0
            })))
            .with_status(200)
            .with_body(json!({"saved": true}).to_string())
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let response = client
            .save_qr_code_url("op-1", "https://ofd.example.com/q/1", 0)
            .await
            .unwrap();

        assert_eq!(response, json!({"saved": true}));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_fingerprint_rejected() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/health")
            .with_status(403)
            .with_body(json!({"message": "unknown fingerprint"}).to_string())
            .create_async()
            .await;

        let err = client_for(&server).health().await.unwrap_err();
        let remote = err.as_remote().unwrap();
        assert_eq!(remote.status, 403);
        assert_eq!(remote.kind, RemoteErrorKind::Fingerprint);
        assert_eq!(remote.message.as_deref(), Some("unknown fingerprint"));
    }

    #[tokio::test]
    async fn test_close_then_call() {
        let server = Server::new_async().await;
        let mut client = client_for(&server);

        assert!(client.close());
        assert!(!client.close());
        assert!(matches!(client.health().await, Err(UzumError::Closed)));
    }
}
