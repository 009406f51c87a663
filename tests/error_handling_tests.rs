//! Error type tests for uzum-payments

use std::error::Error as _;
use uzum_payments::{RemoteError, RemoteErrorKind, UzumError};

#[test]
fn test_remote_error_display() {
    let error = UzumError::from(RemoteError::new(
        401,
        r#"{"errorCode":1000,"message":"Signature is not valid"}"#,
    ));

    let error_msg = error.to_string();
    assert!(
        error_msg.contains("Remote error"),
        "Error message MUST contain 'Remote error' - actual: {}",
        error_msg
    );
    assert!(
        error_msg.contains("signature rejected") && error_msg.contains("status 401"),
        "Error message MUST contain the kind and status - actual: {}",
        error_msg
    );
    assert!(
        error_msg.contains("Signature is not valid"),
        "Error message MUST contain the remote message - actual: {}",
        error_msg
    );
}

#[test]
fn test_remote_error_kind_from_status() {
    let cases = [
        (400, RemoteErrorKind::BadRequest),
        (401, RemoteErrorKind::Signature),
        (403, RemoteErrorKind::Fingerprint),
        (422, RemoteErrorKind::Validation),
        (500, RemoteErrorKind::InternalServer),
    ];

    for (status, kind) in cases {
        assert_eq!(RemoteError::new(status, "").kind, kind, "status {}", status);
    }
}

#[test]
fn test_remote_error_is_the_source() {
    let error = UzumError::from(RemoteError::new(500, "oops"));

    assert!(error.as_remote().is_some());
    assert!(!error.is_transport());
    assert!(!error.is_timeout());
    assert!(error.source().is_some());
}

#[test]
fn test_decode_error_keeps_serde_source() {
    let serde_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error = UzumError::from(serde_error);

    assert!(matches!(error, UzumError::Decode { .. }));
    assert!(
        error.source().is_some(),
        "Decode error MUST expose the serde error as its source"
    );
    assert!(error.to_string().contains("Decode error"));
}

#[test]
fn test_invalid_params_error() {
    let error = UzumError::invalid_params("orderId cannot be empty");

    let error_msg = error.to_string();
    assert!(
        error_msg.contains("Invalid parameters") && error_msg.contains("orderId"),
        "Error message MUST name the parameter - actual: {}",
        error_msg
    );
}

#[test]
fn test_config_error() {
    let error = UzumError::config("Terminal id cannot be empty");
    assert_eq!(
        error.to_string(),
        "Configuration error: Terminal id cannot be empty"
    );
}

#[test]
fn test_signing_error() {
    let error = UzumError::signing("Invalid private key");
    assert!(error.to_string().contains("Signing error"));
}

#[test]
fn test_closed_error() {
    assert_eq!(UzumError::Closed.to_string(), "Client is closed");
}

#[test]
fn test_error_debug_format() {
    let error = UzumError::invalid_params("Test error");

    let debug_str = format!("{:?}", error);
    assert!(
        debug_str.contains("InvalidParams"),
        "Debug format MUST contain variant name 'InvalidParams' - actual: {}",
        debug_str
    );
    assert!(
        debug_str.contains("Test error"),
        "Debug format MUST contain error message 'Test error' - actual: {}",
        debug_str
    );
}
