//! Register a payment and poll its status with the async Checkout client
//!
//! ```sh
//! UZUM_TERMINAL_ID=... UZUM_SIGNING_KEY=... UZUM_API_KEY=... \
//!     cargo run --example checkout
//! ```

use std::time::{SystemTime, UNIX_EPOCH};
use uzum_payments::{
    checkout::types::{currency, RegisterPayment},
    CheckoutClient, CheckoutConfig, UzumError,
};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = CheckoutConfig::from_env()?;
    let mut client = CheckoutClient::new(config)?;
    println!("Using {:?}", client);

    let order_number = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs().to_string();
    let request = RegisterPayment::new(150_000, "demo-client", currency::UZS, &order_number)
        .with_payment_details("Demo order")
        .with_success_url("https://example.com/success")
        .with_failure_url("https://example.com/failure");

    let registered = match client.register(&request).await {
        Ok(response) => response,
        Err(UzumError::Remote(remote)) => {
            println!("Registration rejected: {}", remote);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let Some(result) = registered.result else {
        println!("Registration returned no result");
        return Ok(());
    };
    println!("Order {} registered", result.order_id);
    if let Some(url) = &result.payment_redirect_url {
        println!("Send the customer to {}", url);
    }

    let status = client.get_order_status(&result.order_id).await?;
    if let Some(status) = status.result {
        println!("Order status: {}", status.status.as_deref().unwrap_or("unknown"));
    }

    client.close();
    Ok(())
}
