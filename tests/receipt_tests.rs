//! Request shape tests for the Receipt-producer operations

mod common;

use common::*;
use mockito::{Matcher, Server};
use serde_json::json;
use uzum_payments::{
    receipt::types::{FiscalReceiptRefund, ReceiptDetails, ReceiptType},
    ReceiptClient, RemoteErrorKind,
};

#[tokio::test]
async fn test_fiscal_receipt_refund_body() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/receipts/fiscal_receipt_refund")
        .match_header("ssl-client-fingerprint", "fingerprint-1")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "payment_id": "pay-1",
            "operation_id": "op-2",
            "date_time": "2024-03-02 09:30:00",
            "receipt_type": 1,
            "cash_amount": 5000,
            "card_amount": 0,
            "items": [{"title": "Book", "price": 5000, "count": 1}]
        })))
        .with_status(200)
        .with_body(json!({"status": "ACCEPTED"}).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = ReceiptClient::new(receipt_config(&server.url())).unwrap();
    let refund = FiscalReceiptRefund::new(
        ReceiptDetails::new(
            "op-2",
            "2024-03-02 09:30:00",
            5000,
            0,
            vec![json!({"title": "Book", "price": 5000, "count": 1})],
        )
        .with_payment_id("pay-1")
        .with_receipt_type(ReceiptType::Prepaid),
    );

    let response = client.fiscal_receipt_refund(&refund).await.unwrap();
    assert_eq!(response["status"], "ACCEPTED");
    m.assert_async().await;
}

#[tokio::test]
async fn test_validation_error_status() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/receipts/save_qr_code_url")
        .with_status(422)
        .with_body(json!({"detail": [{"loc": ["body", "amount"], "msg": "field required"}]}).to_string())
        .create_async()
        .await;

    let client = ReceiptClient::new(receipt_config(&server.url())).unwrap();
    let err = client
        .save_qr_code_url("op-3", "https://ofd.example.com/q/3", 0)
        .await
        .unwrap_err();

    let remote = err.as_remote().unwrap();
    assert_eq!(remote.status, 422);
    assert_eq!(remote.kind, RemoteErrorKind::Validation);
    assert_eq!(
        remote.payload.as_ref().unwrap()["detail"][0]["msg"],
        "field required"
    );
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let (_listener, url) = silent_server();
    let client = ReceiptClient::new(receipt_config(&url).with_timeout(SHORT_TIMEOUT)).unwrap();

    let err = client.health().await.unwrap_err();
    assert!(err.is_transport());
    assert!(err.is_timeout(), "got {:?}", err);
}
