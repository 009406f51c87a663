//! Client configuration
//!
//! Both clients take an explicit configuration value at construction. Nothing is
//! read from process-wide state unless a `from_env` constructor is called.

use crate::signer::{EcdsaSigner, RequestSigner, StaticSignature};
use crate::{Result, UzumError};
use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Production Checkout API base URL
pub const CHECKOUT_PRODUCTION_URL: &str = "https://www.inplat-tech.ru/api/v1/";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default `Content-Language` header
pub const DEFAULT_CONTENT_LANGUAGE: &str = "ru-RU";

/// Checkout API deployment to talk to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// The public production endpoint
    Production,
    /// Any other deployment, e.g. a sandbox issued to the merchant
    Custom(String),
}

impl Environment {
    /// Base URL of this deployment
    pub fn base_url(&self) -> &str {
        match self {
            Self::Production => CHECKOUT_PRODUCTION_URL,
            Self::Custom(url) => url,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::Production
    }
}

/// Parse a base URL and make sure it ends with `/` so relative paths join under it
pub(crate) fn normalize_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UzumError::config("Base URL cannot be empty"));
    }

    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(UzumError::config(
            "Base URL must start with http:// or https://",
        ));
    }

    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };

    Url::parse(&with_slash).map_err(|e| UzumError::config(format!("Invalid base URL: {}", e)))
}

/// Configuration for [`CheckoutClient`](crate::CheckoutClient)
#[derive(Clone)]
pub struct CheckoutConfig {
    /// Terminal identifier, sent as `X-Terminal-Id`
    pub terminal_id: String,
    /// Produces the `X-Signature` header
    pub signer: Arc<dyn RequestSigner>,
    /// Sent as `X-API-Key`
    pub api_key: Option<String>,
    /// UzumID JWT, sent as `X-Merchant-Access-Token`
    pub merchant_access_token: Option<String>,
    /// mTLS fingerprint, sent as `X-Fingerprint`
    pub fingerprint: Option<String>,
    /// Sent as `Content-Language`
    pub content_language: String,
    /// Deployment to talk to
    pub environment: Environment,
    /// Per-request timeout; `None` disables it
    pub timeout: Option<Duration>,
}

impl fmt::Debug for CheckoutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutConfig")
            .field("terminal_id", &self.terminal_id)
            .field("signer", &"<signer>")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field(
                "merchant_access_token",
                &self.merchant_access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("fingerprint", &self.fingerprint.as_ref().map(|_| "<redacted>"))
            .field("content_language", &self.content_language)
            .field("environment", &self.environment)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CheckoutConfig {
    /// Create a production config for a terminal
    pub fn new(terminal_id: impl Into<String>, signer: impl RequestSigner + 'static) -> Self {
        Self {
            terminal_id: terminal_id.into(),
            signer: Arc::new(signer),
            api_key: None,
            merchant_access_token: None,
            fingerprint: None,
            content_language: DEFAULT_CONTENT_LANGUAGE.to_string(),
            environment: Environment::Production,
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    /// Read the config from `UZUM_*` environment variables.
    ///
    /// `UZUM_TERMINAL_ID` is required, as is one of `UZUM_SIGNING_KEY` (hex
    /// private key) or `UZUM_SIGNATURE` (precomputed header). `UZUM_API_KEY`,
    /// `UZUM_MERCHANT_ACCESS_TOKEN`, `UZUM_FINGERPRINT`, `UZUM_CONTENT_LANGUAGE`,
    /// `UZUM_BASE_URL` and `UZUM_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&|name: &str| env::var(name).ok())
    }

    fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        let terminal_id = required_var(lookup, "UZUM_TERMINAL_ID")?;

        let signing_key = optional_var(lookup, "UZUM_SIGNING_KEY");
        let signature = optional_var(lookup, "UZUM_SIGNATURE");
        let mut config = match (signing_key, signature) {
            (Some(key), _) => Self::new(terminal_id, EcdsaSigner::from_hex(&key)?),
            (None, Some(signature)) => Self::new(terminal_id, StaticSignature::new(signature)),
            (None, None) => {
                return Err(UzumError::config(
                    "Missing credentials: UZUM_SIGNING_KEY or UZUM_SIGNATURE must be set",
                ))
            }
        };

        config.api_key = optional_var(lookup, "UZUM_API_KEY");
        config.merchant_access_token = optional_var(lookup, "UZUM_MERCHANT_ACCESS_TOKEN");
        config.fingerprint = optional_var(lookup, "UZUM_FINGERPRINT");
        if let Some(language) = optional_var(lookup, "UZUM_CONTENT_LANGUAGE") {
            config.content_language = language;
        }
        if let Some(url) = optional_var(lookup, "UZUM_BASE_URL") {
            config.environment = Environment::Custom(url);
        }
        if let Some(timeout) = timeout_var(lookup, "UZUM_TIMEOUT_SECS")? {
            config.timeout = Some(timeout);
        }

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.terminal_id.trim().is_empty() {
            return Err(UzumError::config("Terminal id cannot be empty"));
        }
        if self.content_language.trim().is_empty() {
            return Err(UzumError::config("Content language cannot be empty"));
        }
        normalize_base_url(self.environment.base_url())?;
        Ok(())
    }

    /// Resolved base URL, always ending with `/`
    pub fn base_url(&self) -> Result<Url> {
        normalize_base_url(self.environment.base_url())
    }

    /// Set the `X-API-Key` header
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the `X-Merchant-Access-Token` header
    pub fn with_merchant_access_token(mut self, token: impl Into<String>) -> Self {
        self.merchant_access_token = Some(token.into());
        self
    }

    /// Set the `X-Fingerprint` header
    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    /// Set the `Content-Language` header
    pub fn with_content_language(mut self, language: impl Into<String>) -> Self {
        self.content_language = language.into();
        self
    }

    /// Select the deployment
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Point the client at a custom base URL
    pub fn with_base_url(self, url: impl Into<String>) -> Self {
        self.with_environment(Environment::Custom(url.into()))
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disable the per-request timeout
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }
}

/// Configuration for [`ReceiptClient`](crate::ReceiptClient)
#[derive(Clone)]
pub struct ReceiptConfig {
    /// Base URL of the receipt producer issued to the merchant
    pub base_url: String,
    /// mTLS fingerprint, sent as `ssl-client-fingerprint`
    pub ssl_client_fingerprint: String,
    /// Per-request timeout; `None` disables it
    pub timeout: Option<Duration>,
}

impl fmt::Debug for ReceiptConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiptConfig")
            .field("base_url", &self.base_url)
            .field("ssl_client_fingerprint", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ReceiptConfig {
    /// Create a new receipt producer config
    pub fn new(base_url: impl Into<String>, ssl_client_fingerprint: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ssl_client_fingerprint: ssl_client_fingerprint.into(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    /// Read the config from `UZUM_RECEIPT_BASE_URL`, `UZUM_SSL_CLIENT_FINGERPRINT`
    /// and the optional `UZUM_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&|name: &str| env::var(name).ok())
    }

    fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        let mut config = Self::new(
            required_var(lookup, "UZUM_RECEIPT_BASE_URL")?,
            required_var(lookup, "UZUM_SSL_CLIENT_FINGERPRINT")?,
        );
        if let Some(timeout) = timeout_var(lookup, "UZUM_TIMEOUT_SECS")? {
            config.timeout = Some(timeout);
        }
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.ssl_client_fingerprint.trim().is_empty() {
            return Err(UzumError::config("SSL client fingerprint cannot be empty"));
        }
        normalize_base_url(&self.base_url)?;
        Ok(())
    }

    /// Resolved base URL, always ending with `/`
    pub fn resolved_base_url(&self) -> Result<Url> {
        normalize_base_url(&self.base_url)
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disable the per-request timeout
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }
}

/// Resolves a variable name to its raw value
type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn optional_var(lookup: Lookup<'_>, name: &str) -> Option<String> {
    lookup(name).filter(|value| !value.trim().is_empty())
}

fn required_var(lookup: Lookup<'_>, name: &str) -> Result<String> {
    optional_var(lookup, name).ok_or_else(|| UzumError::config(format!("{} must be set", name)))
}

fn timeout_var(lookup: Lookup<'_>, name: &str) -> Result<Option<Duration>> {
    optional_var(lookup, name)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| UzumError::config(format!("{} must be a whole number of seconds", name)))
        })
        .transpose()
}
