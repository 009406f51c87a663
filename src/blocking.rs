//! Blocking clients
//!
//! Each blocking client owns an async client and a current-thread Tokio runtime,
//! and runs every call to completion on the calling thread. Method names,
//! parameters, validation and errors are the same as the async clients.
//!
//! These clients must not be created, used, or dropped inside an async runtime.
//! Use [`CheckoutClient`] and [`ReceiptClient`] there instead.

use crate::checkout::types::*;
use crate::checkout::CheckoutClient;
use crate::config::{CheckoutConfig, ReceiptConfig};
use crate::receipt::types::*;
use crate::receipt::ReceiptClient;
use crate::transport::Endpoint;
use crate::{Result, UzumError};
use serde_json::Value;
use std::fmt;
use tokio::runtime::{Builder, Runtime};
use url::Url;

fn current_thread_runtime() -> Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| UzumError::config(format!("Failed to create runtime: {}", e)))
}

/// Blocking client for the Checkout API
pub struct BlockingCheckoutClient {
    // Dropped before the runtime it was built on.
    inner: CheckoutClient,
    runtime: Runtime,
}

impl fmt::Debug for BlockingCheckoutClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingCheckoutClient")
            .field("inner", &self.inner)
            .finish()
    }
}

impl BlockingCheckoutClient {
    /// Create a new client with its own connection pool
    pub fn new(config: CheckoutConfig) -> Result<Self> {
        let runtime = current_thread_runtime()?;
        let inner = {
            let _guard = runtime.enter();
            CheckoutClient::new(config)?
        };
        Ok(Self { inner, runtime })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// Terminal this client acts for
    pub fn terminal_id(&self) -> &str {
        self.inner.terminal_id()
    }

    /// Release the connection pool; `true` only for the call that released it
    pub fn close(&mut self) -> bool {
        let _guard = self.runtime.enter();
        self.inner.close()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Send any Checkout endpoint
    pub fn execute<E: Endpoint>(&self, endpoint: &E) -> Result<E::Response> {
        self.runtime.block_on(self.inner.execute(endpoint))
    }

    /// Register a one-step or two-step payment
    pub fn register(&self, request: &RegisterPayment) -> Result<CheckoutResponse<RegisterResult>> {
        self.execute(request)
    }

    /// Pay an order with a stored binding
    pub fn merchant_pay(
        &self,
        order_id: impl Into<String>,
        process_data: Value,
    ) -> Result<CheckoutResponse<Value>> {
        self.execute(&MerchantPay::new(order_id, process_data))
    }

    /// Get the status of an order
    pub fn get_order_status(
        &self,
        order_id: impl Into<String>,
    ) -> Result<CheckoutResponse<OrderStatus>> {
        self.execute(&GetOrderStatus::new(order_id))
    }

    /// Get the state of a single operation
    pub fn get_operation_state(
        &self,
        operation_id: impl Into<String>,
    ) -> Result<CheckoutResponse<Value>> {
        self.execute(&GetOperationState::new(operation_id))
    }

    /// Confirm an authorized two-step payment
    pub fn complete(&self, order_id: impl Into<String>, amount: u64) -> Result<CheckoutResponse<Value>> {
        self.execute(&AcquiringRequest::complete(order_id, amount))
    }

    /// Refund a completed payment, fully or partially
    pub fn refund(&self, order_id: impl Into<String>, amount: u64) -> Result<CheckoutResponse<Value>> {
        self.execute(&AcquiringRequest::refund(order_id, amount))
    }

    /// Release funds held by an authorized payment
    pub fn reverse(&self, order_id: impl Into<String>, amount: u64) -> Result<CheckoutResponse<Value>> {
        self.execute(&AcquiringRequest::reverse(order_id, amount))
    }

    /// List a customer's stored bindings
    pub fn get_bindings(&self, client_id: impl Into<String>) -> Result<CheckoutResponse<Value>> {
        self.execute(&GetBindings::new(client_id))
    }
}

/// Blocking client for the Receipt-producer API
pub struct BlockingReceiptClient {
    inner: ReceiptClient,
    runtime: Runtime,
}

impl fmt::Debug for BlockingReceiptClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingReceiptClient")
            .field("inner", &self.inner)
            .finish()
    }
}

impl BlockingReceiptClient {
    /// Create a new client with its own connection pool
    pub fn new(config: ReceiptConfig) -> Result<Self> {
        let runtime = current_thread_runtime()?;
        let inner = {
            let _guard = runtime.enter();
            ReceiptClient::new(config)?
        };
        Ok(Self { inner, runtime })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// Release the connection pool; `true` only for the call that released it
    pub fn close(&mut self) -> bool {
        let _guard = self.runtime.enter();
        self.inner.close()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Send any Receipt-producer endpoint
    pub fn execute<E: Endpoint>(&self, endpoint: &E) -> Result<E::Response> {
        self.runtime.block_on(self.inner.execute(endpoint))
    }

    /// Check that the service is up
    pub fn health(&self) -> Result<Value> {
        self.execute(&Health)
    }

    /// Issue a fiscal receipt for a payment
    pub fn fiscal_receipt_generation(&self, receipt: &FiscalReceiptGeneration) -> Result<Value> {
        self.execute(receipt)
    }

    /// Issue a fiscal receipt for a refund
    pub fn fiscal_receipt_refund(&self, receipt: &FiscalReceiptRefund) -> Result<Value> {
        self.execute(receipt)
    }

    /// Attach a fiscal QR code link to an operation
    pub fn save_qr_code_url(
        &self,
        operation_id: impl Into<String>,
        qr_code_url: impl Into<String>,
        amount: u64,
    ) -> Result<Value> {
        self.execute(&SaveQrCodeUrl::new(operation_id, qr_code_url, amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::StaticSignature;
    use mockito::Server;
    use serde_json::json;

    #[test]
    fn test_blocking_complete() {
        let mut server = Server::new();
        let m = server
            .mock("POST", "/api/v1/acquiring/complete")
            .match_body(mockito::Matcher::Json(json!({"orderId": "o-2", "amount": 700})))
            .with_status(200)
            .with_body(json!({"errorCode": 0, "result": {"status": "COMPLETED"}}).to_string())
            .expect(1)
            .create();

        let config = CheckoutConfig::new("T-1", StaticSignature::new("sig"))
            .with_base_url(format!("{}/api/v1", server.url()));
        let client = BlockingCheckoutClient::new(config).unwrap();

        let response = client.complete("o-2", 700).unwrap();
        assert_eq!(response.result.unwrap()["status"], "COMPLETED");
        m.assert();
    }

    #[test]
    fn test_blocking_close_is_idempotent() {
        let server = Server::new();
        let mut client =
            BlockingReceiptClient::new(ReceiptConfig::new(server.url(), "fp")).unwrap();

        assert!(client.close());
        assert!(!client.close());
        assert!(client.is_closed());
        assert!(matches!(client.health(), Err(UzumError::Closed)));
    }
}
