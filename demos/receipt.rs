//! Issue a fiscal receipt with the blocking Receipt-producer client
//!
//! ```sh
//! UZUM_RECEIPT_BASE_URL=... UZUM_SSL_CLIENT_FINGERPRINT=... \
//!     cargo run --example receipt
//! ```

use serde_json::json;
use uzum_payments::{
    receipt::types::{FiscalReceiptGeneration, ReceiptDetails},
    BlockingReceiptClient, ReceiptConfig,
};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut client = BlockingReceiptClient::new(ReceiptConfig::from_env()?)?;

    let health = client.health()?;
    println!("Receipt producer health: {}", health);

    let receipt = FiscalReceiptGeneration::new(
        ReceiptDetails::new(
            "demo-operation-1",
            "2024-03-01 12:00:00",
            0,
            150_000,
            vec![json!({"title": "Demo item", "price": 150000, "count": 1})],
        ),
        "998901234567",
    );

    let response = client.fiscal_receipt_generation(&receipt)?;
    println!("Receipt issued: {}", response);

    client.close();
    Ok(())
}
