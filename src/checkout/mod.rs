//! Uzum Checkout API client
//!
//! Payment sessions, order status, and acquiring operations. Every request is
//! signed through the configured [`RequestSigner`](crate::signer::RequestSigner).

pub mod types;

use crate::config::CheckoutConfig;
use crate::transport::{default_headers, header_value, Endpoint, HttpTransport};
use crate::Result;
use reqwest::header::{HeaderName, CONTENT_LANGUAGE};
use serde_json::Value;
use std::fmt;
use types::*;
use url::Url;

/// Async client for the Checkout API
pub struct CheckoutClient {
    transport: HttpTransport,
    terminal_id: String,
}

impl fmt::Debug for CheckoutClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutClient")
            .field("base_url", &self.transport.base_url().as_str())
            .field("terminal_id", &self.terminal_id)
            .field("closed", &self.transport.is_closed())
            .finish()
    }
}

impl CheckoutClient {
    /// Create a new client with its own connection pool
    pub fn new(config: CheckoutConfig) -> Result<Self> {
        Self::build(config, None)
    }

    /// Create a client on top of an existing `reqwest` client.
    ///
    /// `reqwest::Client` clones share one connection pool. [`close`](Self::close)
    /// drops only this client's handle, so the pool stays open until every other
    /// clone held by the caller is dropped as well.
    pub fn with_http_client(config: CheckoutConfig, client: reqwest::Client) -> Result<Self> {
        Self::build(config, Some(client))
    }

    fn build(config: CheckoutConfig, client: Option<reqwest::Client>) -> Result<Self> {
        config.validate()?;

        let mut headers = default_headers();
        headers.insert(
            CONTENT_LANGUAGE,
            header_value("content-language", &config.content_language, false)?,
        );
        headers.insert(
            HeaderName::from_static("x-terminal-id"),
            header_value("x-terminal-id", &config.terminal_id, false)?,
        );
        if let Some(token) = &config.merchant_access_token {
            headers.insert(
                HeaderName::from_static("x-merchant-access-token"),
                header_value("x-merchant-access-token", token, true)?,
            );
        }
        if let Some(fingerprint) = &config.fingerprint {
            headers.insert(
                HeaderName::from_static("x-fingerprint"),
                header_value("x-fingerprint", fingerprint, true)?,
            );
        }
        if let Some(api_key) = &config.api_key {
            headers.insert(
                HeaderName::from_static("x-api-key"),
                header_value("x-api-key", api_key, true)?,
            );
        }

        let transport = HttpTransport::new(
            config.base_url()?,
            headers,
            Some(config.signer.clone()),
            config.timeout,
            client,
        )?;

        Ok(Self {
            transport,
            terminal_id: config.terminal_id,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &Url {
        self.transport.base_url()
    }

    /// Terminal this client acts for
    pub fn terminal_id(&self) -> &str {
        &self.terminal_id
    }

    /// Release the connection pool.
    ///
    /// Returns `true` for the call that released it and `false` afterwards.
    /// Calls made after closing fail with [`UzumError::Closed`](crate::UzumError::Closed).
    pub fn close(&mut self) -> bool {
        self.transport.close()
    }

    pub fn is_closed(&self) -> bool {
        self.transport.is_closed()
    }

    /// Send any Checkout endpoint
    pub async fn execute<E: Endpoint>(&self, endpoint: &E) -> Result<E::Response> {
        self.transport.execute(endpoint).await
    }

    /// Register a one-step or two-step payment
    pub async fn register(
        &self,
        request: &RegisterPayment,
    ) -> Result<CheckoutResponse<RegisterResult>> {
        self.execute(request).await
    }

    /// Pay an order with a stored binding
    pub async fn merchant_pay(
        &self,
        order_id: impl Into<String>,
        process_data: Value,
    ) -> Result<CheckoutResponse<Value>> {
        self.execute(&MerchantPay::new(order_id, process_data)).await
    }

    /// Get the status of an order
    pub async fn get_order_status(
        &self,
        order_id: impl Into<String>,
    ) -> Result<CheckoutResponse<OrderStatus>> {
        self.execute(&GetOrderStatus::new(order_id)).await
    }

    /// Get the state of a single operation
    pub async fn get_operation_state(
        &self,
        operation_id: impl Into<String>,
    ) -> Result<CheckoutResponse<Value>> {
        self.execute(&GetOperationState::new(operation_id)).await
    }

    /// Confirm an authorized two-step payment
    pub async fn complete(
        &self,
        order_id: impl Into<String>,
        amount: u64,
    ) -> Result<CheckoutResponse<Value>> {
        self.execute(&AcquiringRequest::complete(order_id, amount)).await
    }

    /// Refund a completed payment, fully or partially
    pub async fn refund(
        &self,
        order_id: impl Into<String>,
        amount: u64,
    ) -> Result<CheckoutResponse<Value>> {
        self.execute(&AcquiringRequest::refund(order_id, amount)).await
    }

    /// Release funds held by an authorized payment
    pub async fn reverse(
        &self,
        order_id: impl Into<String>,
        amount: u64,
    ) -> Result<CheckoutResponse<Value>> {
        self.execute(&AcquiringRequest::reverse(order_id, amount)).await
    }

    /// List a customer's stored bindings
    pub async fn get_bindings(&self, client_id: impl Into<String>) -> Result<CheckoutResponse<Value>> {
        self.execute(&GetBindings::new(client_id)).await
    }
}
