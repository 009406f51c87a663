//! Request execution shared by every client
//!
//! An [`Endpoint`] describes one remote operation. [`HttpTransport`] turns it into
//! exactly one HTTP exchange: serialize, sign, send, classify, decode. The
//! blocking clients drive the same future to completion on their own runtime.

use crate::error::{error_code_of, RemoteError};
use crate::signer::RequestSigner;
use crate::{Result, UzumError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Header carrying the request body signature
pub const SIGNATURE_HEADER: &str = "x-signature";

/// One remote operation of a pinned API version
pub trait Endpoint: Serialize {
    /// Parsed success response
    type Response: DeserializeOwned;

    /// Path relative to the client's base URL, without a leading `/`
    fn path(&self) -> &'static str;

    /// HTTP method
    fn method(&self) -> Method {
        Method::POST
    }

    /// Local structural checks; the remote service validates values
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Serialized request body, or `None` for body-less requests
    fn body(&self) -> Result<Option<Vec<u8>>> {
        serde_json::to_vec(self).map(Some).map_err(|e| {
            UzumError::invalid_params(format!("Failed to serialize {}: {}", self.path(), e))
        })
    }

    /// Decode the JSON of a success response
    fn decode(value: Value) -> Result<Self::Response> {
        serde_json::from_value(value).map_err(UzumError::from)
    }
}

/// Reject empty identifiers before anything goes on the wire
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(UzumError::invalid_params(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// Build a header value, hiding it from debug output when it is a secret
pub(crate) fn header_value(name: &str, value: &str, sensitive: bool) -> Result<HeaderValue> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|_| UzumError::config(format!("Invalid value for header {}", name)))?;
    header.set_sensitive(sensitive);
    Ok(header)
}

/// Headers sent with every request, before client-specific credentials
pub(crate) fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Classify a response body and return its JSON on success.
///
/// Non-2xx statuses are remote errors whatever the body looks like. A 2xx body
/// must be JSON; a non-zero `errorCode` in it is a remote error as well.
pub(crate) fn classify_response(status: u16, body: &str) -> Result<Value> {
    if !(200..300).contains(&status) {
        return Err(RemoteError::new(status, body).into());
    }

    let value: Value = serde_json::from_str(body)?;
    if error_code_of(&value).is_some() {
        return Err(RemoteError::new(status, body).into());
    }

    Ok(value)
}

/// Owns the connection pool and the per-client request decoration
pub(crate) struct HttpTransport {
    base_url: Url,
    headers: HeaderMap,
    signer: Option<Arc<dyn RequestSigner>>,
    timeout: Option<Duration>,
    client: Option<Client>,
}

impl HttpTransport {
    pub(crate) fn new(
        base_url: Url,
        headers: HeaderMap,
        signer: Option<Arc<dyn RequestSigner>>,
        timeout: Option<Duration>,
        client: Option<Client>,
    ) -> Result<Self> {
        let client = match client {
            Some(client) => client,
            None => Client::builder()
                .build()
                .map_err(|e| UzumError::config(format!("Failed to create HTTP client: {}", e)))?,
        };

        Ok(Self {
            base_url,
            headers,
            signer,
            timeout,
            client: Some(client),
        })
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.client.is_none()
    }

    /// Release the connection pool. Returns `true` only for the call that
    /// actually released it.
    pub(crate) fn close(&mut self) -> bool {
        let released = self.client.take().is_some();
        if released {
            debug!(base_url = %self.base_url, "HTTP connection pool released");
        }
        released
    }

    /// Perform exactly one HTTP exchange for `endpoint`
    pub(crate) async fn execute<E: Endpoint>(&self, endpoint: &E) -> Result<E::Response> {
        endpoint.validate()?;

        let client = self.client.as_ref().ok_or(UzumError::Closed)?;
        let url = self
            .base_url
            .join(endpoint.path())
            .map_err(|e| UzumError::config(format!("Invalid endpoint path: {}", e)))?;
        let method = endpoint.method();
        let body = endpoint.body()?;

        let mut request = client
            .request(method.clone(), url.clone())
            .headers(self.headers.clone());

        if let Some(signer) = &self.signer {
            let signature = signer.sign(body.as_deref().unwrap_or_default())?;
            request = request.header(
                HeaderName::from_static(SIGNATURE_HEADER),
                header_value(SIGNATURE_HEADER, &signature, true)?,
            );
        }
        if let Some(body) = body {
            request = request.body(body);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        let outcome = classify_response(status, &text);
        match &outcome {
            Ok(_) => debug!(%method, %url, status, "Uzum API call succeeded"),
            Err(UzumError::Remote(remote)) => warn!(
                %method,
                %url,
                status,
                error_code = ?remote.error_code,
                kind = %remote.kind,
                "Uzum API call rejected"
            ),
            Err(e) => warn!(%method, %url, status, error = %e, "Uzum API response undecodable"),
        }

        E::decode(outcome?)
    }
}
