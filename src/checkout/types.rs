//! Checkout API request and response types
//!
//! Field names follow the remote API (camelCase). Responses keep every field the
//! service returns, so fields added by a newer API version are not lost.

use crate::error::parse_error_code;
use crate::transport::{require_non_empty, Endpoint};
use crate::Result;
use serde::{ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// ISO 4217 numeric currency codes accepted by the Checkout API
pub mod currency {
    /// Uzbekistani sum
    pub const UZS: u16 = 860;
    /// Russian ruble
    pub const RUB: u16 = 643;
}

/// Default payment page display mode
pub const VIEW_TYPE_REDIRECT: &str = "REDIRECT";

/// Default payment session lifetime in seconds
pub const DEFAULT_SESSION_TIMEOUT_SECS: u32 = 600;

/// Response envelope shared by every Checkout operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse<T> {
    /// Zero on success
    #[serde(default, deserialize_with = "deserialize_error_code")]
    pub error_code: i64,
    /// Human-readable message, when the service sends one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Operation result
    pub result: Option<T>,
}

fn deserialize_error_code<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(parse_error_code(&value).unwrap_or(0))
}

/// Write `fields` overlaid with `extra`. An extra entry replaces the typed field
/// of the same name, so every key appears once.
fn serialize_with_extra<S: Serializer>(
    mut fields: Map<String, Value>,
    extra: &Map<String, Value>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    fields.extend(extra.iter().map(|(key, value)| (key.clone(), value.clone())));
    fields.serialize(serializer)
}

fn to_json<T: Serialize, E: ser::Error>(value: &T) -> std::result::Result<Value, E> {
    serde_json::to_value(value).map_err(E::custom)
}

/// One-step or two-step (authorize, then complete) payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayType {
    OneStep,
    TwoStep,
}

/// `paymentParams` of a registration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentParams {
    pub pay_type: PayType,
    /// Any other documented payment parameter. A `payType` entry here wins over
    /// [`pay_type`](Self::pay_type).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Serialize for PaymentParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut fields = Map::new();
        fields.insert("payType".to_string(), to_json::<_, S::Error>(&self.pay_type)?);
        serialize_with_extra(fields, &self.extra, serializer)
    }
}

impl PaymentParams {
    pub fn new(pay_type: PayType) -> Self {
        Self {
            pay_type,
            extra: Map::new(),
        }
    }
}

impl Default for PaymentParams {
    fn default() -> Self {
        Self::new(PayType::OneStep)
    }
}

/// Register a one-step or two-step payment (`payment/register`)
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterPayment {
    /// Amount in tiyin, without commission
    pub amount: u64,
    /// Customer identifier in the merchant's system
    pub client_id: String,
    /// ISO 4217 numeric code, see [`currency`]
    pub currency: u16,
    /// Order identifier in the merchant's system
    pub order_number: String,
    pub payment_details: Option<String>,
    pub success_url: Option<String>,
    pub failure_url: Option<String>,
    pub view_type: String,
    pub payment_params: PaymentParams,
    pub merchant_params: Option<Value>,
    pub session_timeout_secs: u32,
    /// Additional top-level fields sent as-is. An entry named like a typed field
    /// replaces that field in the body.
    pub extra: Map<String, Value>,
}

impl Serialize for RegisterPayment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut fields = Map::new();
        fields.insert("amount".to_string(), Value::from(self.amount));
        fields.insert("clientId".to_string(), Value::from(self.client_id.clone()));
        fields.insert("currency".to_string(), Value::from(self.currency));
        fields.insert("orderNumber".to_string(), Value::from(self.order_number.clone()));

        let optional = [
            ("paymentDetails", &self.payment_details),
            ("successUrl", &self.success_url),
            ("failureUrl", &self.failure_url),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                fields.insert(key.to_string(), Value::from(value.clone()));
            }
        }

        fields.insert("viewType".to_string(), Value::from(self.view_type.clone()));
        fields.insert("paymentParams".to_string(), to_json::<_, S::Error>(&self.payment_params)?);
        if let Some(params) = &self.merchant_params {
            fields.insert("merchantParams".to_string(), params.clone());
        }
        fields.insert(
            "sessionTimeoutSecs".to_string(),
            Value::from(self.session_timeout_secs),
        );

        serialize_with_extra(fields, &self.extra, serializer)
    }
}

impl RegisterPayment {
    /// Create a registration with the documented defaults: `REDIRECT` view,
    /// one-step payment, 600 second session
    pub fn new(
        amount: u64,
        client_id: impl Into<String>,
        currency: u16,
        order_number: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            client_id: client_id.into(),
            currency,
            order_number: order_number.into(),
            payment_details: None,
            success_url: None,
            failure_url: None,
            view_type: VIEW_TYPE_REDIRECT.to_string(),
            payment_params: PaymentParams::default(),
            merchant_params: None,
            session_timeout_secs: DEFAULT_SESSION_TIMEOUT_SECS,
            extra: Map::new(),
        }
    }

    pub fn with_payment_details(mut self, details: impl Into<String>) -> Self {
        self.payment_details = Some(details.into());
        self
    }

    pub fn with_success_url(mut self, url: impl Into<String>) -> Self {
        self.success_url = Some(url.into());
        self
    }

    pub fn with_failure_url(mut self, url: impl Into<String>) -> Self {
        self.failure_url = Some(url.into());
        self
    }

    pub fn with_view_type(mut self, view_type: impl Into<String>) -> Self {
        self.view_type = view_type.into();
        self
    }

    pub fn with_payment_params(mut self, params: PaymentParams) -> Self {
        self.payment_params = params;
        self
    }

    /// Shorthand for a two-step payment
    pub fn two_step(self) -> Self {
        self.with_payment_params(PaymentParams::new(PayType::TwoStep))
    }

    pub fn with_merchant_params(mut self, params: Value) -> Self {
        self.merchant_params = Some(params);
        self
    }

    pub fn with_session_timeout_secs(mut self, secs: u32) -> Self {
        self.session_timeout_secs = secs;
        self
    }

    /// Send an extra top-level field
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

impl Endpoint for RegisterPayment {
    type Response = CheckoutResponse<RegisterResult>;

    fn path(&self) -> &'static str {
        "payment/register"
    }

    fn validate(&self) -> Result<()> {
        require_non_empty("clientId", &self.client_id)?;
        require_non_empty("orderNumber", &self.order_number)
    }
}

/// Result of a registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResult {
    /// Checkout-side order identifier
    pub order_id: String,
    /// Payment page to send the customer to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_redirect_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Pay with a stored binding, server to server (`payment/merchantPay`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantPay {
    /// Payment method data
    pub process_data: Value,
    pub order_id: String,
}

impl MerchantPay {
    pub fn new(order_id: impl Into<String>, process_data: Value) -> Self {
        Self {
            process_data,
            order_id: order_id.into(),
        }
    }
}

impl Endpoint for MerchantPay {
    type Response = CheckoutResponse<Value>;

    fn path(&self) -> &'static str {
        "payment/merchantPay"
    }

    fn validate(&self) -> Result<()> {
        require_non_empty("orderId", &self.order_id)
    }
}

/// Query the status of an order (`payment/getOrderStatus`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOrderStatus {
    pub order_id: String,
}

impl GetOrderStatus {
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
        }
    }
}

impl Endpoint for GetOrderStatus {
    type Response = CheckoutResponse<OrderStatus>;

    fn path(&self) -> &'static str {
        "payment/getOrderStatus"
    }

    fn validate(&self) -> Result<()> {
        require_non_empty("orderId", &self.order_id)
    }
}

/// Status of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatus {
    pub order_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Query the state of a single operation (`payment/getOperationState`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOperationState {
    /// Checkout-side operation identifier
    pub operation_id: String,
}

impl GetOperationState {
    pub fn new(operation_id: impl Into<String>) -> Self {
        Self {
            operation_id: operation_id.into(),
        }
    }
}

impl Endpoint for GetOperationState {
    type Response = CheckoutResponse<Value>;

    fn path(&self) -> &'static str {
        "payment/getOperationState"
    }

    fn validate(&self) -> Result<()> {
        require_non_empty("operationId", &self.operation_id)
    }
}

/// Acquiring operations that move an amount of an existing order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquiringAction {
    /// Confirm an authorized two-step payment
    Complete,
    /// Full or partial refund of a completed payment
    Refund,
    /// Release funds held by an authorized payment
    Reverse,
}

impl AcquiringAction {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Complete => "acquiring/complete",
            Self::Refund => "acquiring/refund",
            Self::Reverse => "acquiring/reverse",
        }
    }
}

/// Body of `acquiring/complete`, `acquiring/refund` and `acquiring/reverse`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquiringRequest {
    #[serde(skip)]
    pub action: AcquiringAction,
    pub order_id: String,
    /// Amount in tiyin
    pub amount: u64,
}

impl AcquiringRequest {
    pub fn new(action: AcquiringAction, order_id: impl Into<String>, amount: u64) -> Self {
        Self {
            action,
            order_id: order_id.into(),
            amount,
        }
    }

    pub fn complete(order_id: impl Into<String>, amount: u64) -> Self {
        Self::new(AcquiringAction::Complete, order_id, amount)
    }

    pub fn refund(order_id: impl Into<String>, amount: u64) -> Self {
        Self::new(AcquiringAction::Refund, order_id, amount)
    }

    pub fn reverse(order_id: impl Into<String>, amount: u64) -> Self {
        Self::new(AcquiringAction::Reverse, order_id, amount)
    }
}

impl Endpoint for AcquiringRequest {
    type Response = CheckoutResponse<Value>;

    fn path(&self) -> &'static str {
        self.action.path()
    }

    fn validate(&self) -> Result<()> {
        require_non_empty("orderId", &self.order_id)
    }
}

/// List a customer's stored bindings (`acquiring/getBindings`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBindings {
    pub client_id: String,
}

impl GetBindings {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
        }
    }
}

impl Endpoint for GetBindings {
    type Response = CheckoutResponse<Value>;

    fn path(&self) -> &'static str {
        "acquiring/getBindings"
    }

    fn validate(&self) -> Result<()> {
        require_non_empty("clientId", &self.client_id)
    }
}
