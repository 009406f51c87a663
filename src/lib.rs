//! # uzum-payments
//!
//! A client for the Uzum Checkout and Uzum Receipt-producer REST APIs.
//!
//! Every remote operation is available through two calling conventions with the
//! same method names, parameters and errors:
//!
//! - [`CheckoutClient`] and [`ReceiptClient`] are async; each call suspends the
//!   task during the HTTP exchange.
//! - [`BlockingCheckoutClient`] and [`BlockingReceiptClient`] block the calling
//!   thread until the exchange completes.
//!
//! One call is one HTTP request. The client never retries; failures come back
//! as [`UzumError`] and the caller decides what to do with them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use uzum_payments::{
//!     checkout::types::{currency, RegisterPayment},
//!     CheckoutClient, CheckoutConfig, EcdsaSigner,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let signer = EcdsaSigner::from_hex(&std::env::var("UZUM_SIGNING_KEY")?)?;
//!     let config = CheckoutConfig::new("terminal-id", signer).with_api_key("api-key");
//!     let client = CheckoutClient::new(config)?;
//!
//!     let request = RegisterPayment::new(150_000, "client-1", currency::UZS, "order-1")
//!         .with_success_url("https://example.com/ok")
//!         .with_failure_url("https://example.com/fail");
//!
//!     let response = client.register(&request).await?;
//!     if let Some(result) = response.result {
//!         println!("Pay at {:?}", result.payment_redirect_url);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`checkout`**: Checkout API client and request/response types
//! - **`receipt`**: Receipt-producer API client and request types
//! - **`blocking`**: blocking wrappers over the async clients
//! - **`transport`**: the [`Endpoint`] trait and the shared request pipeline
//! - **`signer`**: `X-Signature` producers
//! - **`config`**: client configuration
//! - **`error`**: error types

pub mod blocking;
pub mod checkout;
pub mod config;
pub mod error;
pub mod receipt;
pub mod signer;
pub mod transport;

// Re-exports for convenience
pub use blocking::{BlockingCheckoutClient, BlockingReceiptClient};
pub use checkout::CheckoutClient;
pub use config::{CheckoutConfig, Environment, ReceiptConfig};
pub use error::{RemoteError, RemoteErrorKind, Result, UzumError};
pub use receipt::ReceiptClient;
pub use signer::{EcdsaSigner, RequestSigner, StaticSignature};
pub use transport::Endpoint;

/// Current version of this library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Checkout API version the request types are pinned to
pub const CHECKOUT_API_VERSION: &str = "v1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constants() {
        assert!(!VERSION.is_empty());
        assert!(config::CHECKOUT_PRODUCTION_URL.ends_with(&format!("/{}/", CHECKOUT_API_VERSION)));
    }
}
