#![allow(dead_code)]

use std::net::TcpListener;
use std::time::Duration;
use uzum_payments::{CheckoutConfig, EcdsaSigner, ReceiptConfig, StaticSignature};

pub const TEST_KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

pub fn checkout_config(server_url: &str) -> CheckoutConfig {
    CheckoutConfig::new("terminal-1", StaticSignature::new("test-signature"))
        .with_api_key("api-key")
        .with_base_url(format!("{}/api/v1", server_url))
}

pub fn signed_checkout_config(server_url: &str) -> CheckoutConfig {
    let signer = EcdsaSigner::from_hex(TEST_KEY).unwrap();
    CheckoutConfig::new("terminal-1", signer).with_base_url(format!("{}/api/v1", server_url))
}

pub fn receipt_config(server_url: &str) -> ReceiptConfig {
    ReceiptConfig::new(format!("{}/receipts", server_url), "fingerprint-1")
}

/// A listener that completes TCP handshakes but never answers.
///
/// Keep the listener alive for as long as the test needs the silence.
pub fn silent_server() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    (listener, url)
}

pub const SHORT_TIMEOUT: Duration = Duration::from_millis(300);
