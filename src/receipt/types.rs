//! Receipt-producer API request types
//!
//! Field names follow the remote API (snake_case). Responses are returned as raw
//! JSON.

use crate::transport::{require_non_empty, Endpoint};
use crate::{Result, UzumError};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of fiscal receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ReceiptType {
    #[default]
    Sale,
    Prepaid,
}

impl From<ReceiptType> for u8 {
    fn from(value: ReceiptType) -> Self {
        match value {
            ReceiptType::Sale => 0,
            ReceiptType::Prepaid => 1,
        }
    }
}

impl TryFrom<u8> for ReceiptType {
    type Error = UzumError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Sale),
            1 => Ok(Self::Prepaid),
            other => Err(UzumError::decode(format!("Unknown receipt type: {}", other))),
        }
    }
}

/// Fields shared by receipt generation and refund
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptDetails {
    /// Payment identifier in the payment system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    /// Unique identifier of the receipt operation
    pub operation_id: String,
    /// Payment time, in the format the receipt producer documents
    pub date_time: String,
    pub receipt_type: ReceiptType,
    /// Cash part in tiyin
    pub cash_amount: u64,
    /// Card part in tiyin
    pub card_amount: u64,
    /// Receipt lines, passed through as documented by the remote API
    pub items: Vec<Value>,
}

impl ReceiptDetails {
    pub fn new(
        operation_id: impl Into<String>,
        date_time: impl Into<String>,
        cash_amount: u64,
        card_amount: u64,
        items: Vec<Value>,
    ) -> Self {
        Self {
            payment_id: None,
            operation_id: operation_id.into(),
            date_time: date_time.into(),
            receipt_type: ReceiptType::Sale,
            cash_amount,
            card_amount,
            items,
        }
    }

    pub fn with_payment_id(mut self, payment_id: impl Into<String>) -> Self {
        self.payment_id = Some(payment_id.into());
        self
    }

    pub fn with_receipt_type(mut self, receipt_type: ReceiptType) -> Self {
        self.receipt_type = receipt_type;
        self
    }

    fn validate(&self) -> Result<()> {
        require_non_empty("operation_id", &self.operation_id)?;
        require_non_empty("date_time", &self.date_time)
    }
}

/// Issue a fiscal receipt (`fiscal_receipt_generation`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiscalReceiptGeneration {
    #[serde(flatten)]
    pub details: ReceiptDetails,
    /// Customer phone number
    pub phone_number: String,
}

impl FiscalReceiptGeneration {
    pub fn new(details: ReceiptDetails, phone_number: impl Into<String>) -> Self {
        Self {
            details,
            phone_number: phone_number.into(),
        }
    }
}

impl Endpoint for FiscalReceiptGeneration {
    type Response = Value;

    fn path(&self) -> &'static str {
        "fiscal_receipt_generation"
    }

    fn validate(&self) -> Result<()> {
        self.details.validate()?;
        require_non_empty("phone_number", &self.phone_number)
    }
}

/// Issue a refund receipt (`fiscal_receipt_refund`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiscalReceiptRefund {
    #[serde(flatten)]
    pub details: ReceiptDetails,
}

impl FiscalReceiptRefund {
    pub fn new(details: ReceiptDetails) -> Self {
        Self { details }
    }
}

impl Endpoint for FiscalReceiptRefund {
    type Response = Value;

    fn path(&self) -> &'static str {
        "fiscal_receipt_refund"
    }

    fn validate(&self) -> Result<()> {
        self.details.validate()
    }
}

/// Attach a fiscal QR code link to an operation (`save_qr_code_url`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveQrCodeUrl {
    pub operation_id: String,
    pub qr_code_url: String,
    /// Amount in tiyin; only meaningful for adaptive payments where part of
    /// the sum was paid in cash
    pub amount: u64,
}

impl SaveQrCodeUrl {
    pub fn new(operation_id: impl Into<String>, qr_code_url: impl Into<String>, amount: u64) -> Self {
        Self {
            operation_id: operation_id.into(),
            qr_code_url: qr_code_url.into(),
            amount,
        }
    }
}

impl Endpoint for SaveQrCodeUrl {
    type Response = Value;

    fn path(&self) -> &'static str {
        "save_qr_code_url"
    }

    fn validate(&self) -> Result<()> {
        require_non_empty("operation_id", &self.operation_id)?;
        require_non_empty("qr_code_url", &self.qr_code_url)
    }
}

/// Liveness check (`GET health`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Health;

impl Endpoint for Health {
    type Response = Value;

    fn path(&self) -> &'static str {
        "health"
    }

    fn method(&self) -> Method {
        Method::GET
    }

    fn body(&self) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }
}
