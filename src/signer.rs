//! `X-Signature` header producers
//!
//! Checkout requests carry a signature of the exact request body. The merchant
//! either registers a public key with Uzum and signs each body with the matching
//! private key ([`EcdsaSigner`]), or supplies a precomputed header value
//! ([`StaticSignature`]).

use crate::{Result, UzumError};
use base64::Engine;
use k256::ecdsa::{signature::Signer, Signature, SigningKey, VerifyingKey};
use std::fmt;

/// Produces the `X-Signature` header value for a serialized request body
pub trait RequestSigner: Send + Sync {
    /// Sign the body bytes exactly as they will be sent
    fn sign(&self, body: &[u8]) -> Result<String>;
}

/// A fixed header value, sent verbatim with every request
#[derive(Clone, PartialEq, Eq)]
pub struct StaticSignature(String);

impl StaticSignature {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Debug for StaticSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticSignature(<redacted>)")
    }
}

impl RequestSigner for StaticSignature {
    fn sign(&self, _body: &[u8]) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// ECDSA over SHA-256 with RFC 6979 nonces.
///
/// Signatures are the 64-byte `r || s` form, base64 encoded. Nonces are derived from
/// the key and the message, so the same key and body always yield the same
/// header.
#[derive(Clone)]
pub struct EcdsaSigner {
    key: SigningKey,
}

impl EcdsaSigner {
    /// Create a signer from a raw 32-byte private scalar
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let key = SigningKey::from_slice(bytes)
            .map_err(|e| UzumError::signing(format!("Invalid private key: {}", e)))?;
        Ok(Self { key })
    }

    /// Create a signer from a hex private key, with or without a `0x` prefix
    pub fn from_hex(private_key: &str) -> Result<Self> {
        let trimmed = private_key.trim();
        let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(trimmed)
            .map_err(|e| UzumError::signing(format!("Invalid private key hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Public key to register with Uzum, SEC1 compressed and hex encoded
    pub fn public_key_hex(&self) -> String {
        let verifying_key = VerifyingKey::from(&self.key);
        hex::encode(verifying_key.to_encoded_point(true).as_bytes())
    }

    /// Public half of the signing key
    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey::from(&self.key)
    }
}

impl fmt::Debug for EcdsaSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaSigner")
            .field("public_key", &self.public_key_hex())
            .finish()
    }
}

impl RequestSigner for EcdsaSigner {
    fn sign(&self, body: &[u8]) -> Result<String> {
        let signature: Signature = self.key.sign(body);
        Ok(base64::engine::general_purpose::STANDARD.encode(signature.to_bytes()))
    }
}

/// Decode a header produced by [`EcdsaSigner`] and check it against a body
pub fn verify_signature(verifying_key: &VerifyingKey, body: &[u8], header: &str) -> Result<()> {
    use k256::ecdsa::signature::Verifier;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(header)
        .map_err(|e| UzumError::signing(format!("Invalid signature encoding: {}", e)))?;
    let signature = Signature::from_slice(&bytes)
        .map_err(|e| UzumError::signing(format!("Invalid signature: {}", e)))?;

    verifying_key
        .verify(body, &signature)
        .map_err(|_| UzumError::signing("Signature does not match body"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn test_static_signature_ignores_body() {
        let signer = StaticSignature::new("precomputed");
        assert_eq!(signer.sign(b"{}").unwrap(), "precomputed");
        assert_eq!(signer.sign(b"{\"orderId\":\"1\"}").unwrap(), "precomputed");
    }

    #[test]
    fn test_static_signature_debug_is_redacted() {
        let signer = StaticSignature::new("super-secret");
        assert!(!format!("{:?}", signer).contains("super-secret"));
    }

    #[test]
    fn test_ecdsa_signature_is_deterministic() {
        let signer = EcdsaSigner::from_hex(TEST_KEY).unwrap();
        let body = br#"{"orderId":"5dfa907d-570c-477a-96c1-554638c3f661"}"#;

        let first = signer.sign(body).unwrap();
        let second = signer.sign(body).unwrap();
        assert_eq!(first, second);

        let other = EcdsaSigner::from_hex(TEST_KEY).unwrap();
        assert_eq!(other.sign(body).unwrap(), first);
    }

    #[test]
    fn test_ecdsa_signature_depends_on_body() {
        let signer = EcdsaSigner::from_hex(TEST_KEY).unwrap();
        let a = signer.sign(br#"{"orderId":"a"}"#).unwrap();
        let b = signer.sign(br#"{"orderId":"b"}"#).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_ecdsa_signature_verifies() {
        let signer = EcdsaSigner::from_hex(&format!("0x{}", TEST_KEY)).unwrap();
        let body = br#"{"clientId":"42"}"#;
        let header = signer.sign(body).unwrap();

        verify_signature(&signer.verifying_key(), body, &header).unwrap();
        assert!(verify_signature(&signer.verifying_key(), b"tampered", &header).is_err());
    }

    #[test]
    fn test_invalid_keys_are_rejected() {
        assert!(matches!(
            EcdsaSigner::from_hex("not-hex"),
            Err(UzumError::Signing { .. })
        ));
        assert!(matches!(
            EcdsaSigner::from_bytes(&[0u8; 32]),
            Err(UzumError::Signing { .. })
        ));
    }

    #[test]
    fn test_public_key_is_compressed_sec1() {
        let signer = EcdsaSigner::from_hex(TEST_KEY).unwrap();
        let public_key = signer.public_key_hex();
        assert_eq!(public_key.len(), 66);
        assert!(public_key.starts_with("02") || public_key.starts_with("03"));
        assert!(!format!("{:?}", signer).contains(TEST_KEY));
    }
}
