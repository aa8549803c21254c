//! HMAC-SHA256 signature validation for LINE webhooks.
//!
//! LINE signs every callback body with the channel secret and sends the
//! base64-encoded digest in the `X-Line-Signature` header. The comparison is
//! constant-time and the secret never appears in `Debug` output.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::error::{LineError, Result};

/// Name of the header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

type HmacSha256 = Hmac<Sha256>;

/// Verifies webhook bodies against the channel secret.
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: Vec<u8>,
}

impl fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl SignatureVerifier {
    /// Creates a verifier for the given channel secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into().into_bytes(),
        }
    }

    /// Verifies the base64 `signature` of `body`.
    ///
    /// # Errors
    ///
    /// Returns `LineError::InvalidSignature` if the signature is not valid
    /// base64 or does not match the computed digest.
    pub fn verify(&self, body: &[u8], signature: &str) -> Result<()> {
        let Ok(expected) = STANDARD.decode(signature.trim()) else {
            warn!("webhook signature is not valid base64");
            return Err(LineError::InvalidSignature);
        };

        let computed = self.digest(body)?;

        if computed.ct_eq(&expected).into() {
            Ok(())
        } else {
            warn!("webhook signature verification failed");
            Err(LineError::InvalidSignature)
        }
    }

    /// Computes the base64 signature LINE would send for `body`.
    ///
    /// # Errors
    ///
    /// Returns `LineError::Config` if the secret cannot key the MAC.
    pub fn sign(&self, body: &[u8]) -> Result<String> {
        Ok(STANDARD.encode(self.digest(body)?))
    }

    fn digest(&self, body: &[u8]) -> Result<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| LineError::Config(format!("channel secret: {e}")))?;
        mac.update(body);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = br#"{"destination":"U0","events":[]}"#;

    #[test]
    fn valid_signature_verifies() {
        let verifier = SignatureVerifier::new("secret");
        let signature = verifier.sign(BODY).unwrap();
        assert!(verifier.verify(BODY, &signature).is_ok());
    }

    #[test]
    fn known_vector() {
        // base64(HMAC-SHA256(key="key", "The quick brown fox jumps over the lazy dog"))
        let verifier = SignatureVerifier::new("key");
        let signature = verifier
            .sign(b"The quick brown fox jumps over the lazy dog")
            .unwrap();
        assert_eq!(signature, "97yD9DBThCSxMpjmqm+xQ+9NWaFJRhdZl0edvC0aPNg=");
    }

    #[test]
    fn wrong_secret_fails() {
        let signature = SignatureVerifier::new("other").sign(BODY).unwrap();
        let result = SignatureVerifier::new("secret").verify(BODY, &signature);
        assert!(matches!(result, Err(LineError::InvalidSignature)));
    }

    #[test]
    fn tampered_body_fails() {
        let verifier = SignatureVerifier::new("secret");
        let signature = verifier.sign(BODY).unwrap();
        let result = verifier.verify(br#"{"destination":"U1","events":[]}"#, &signature);
        assert!(matches!(result, Err(LineError::InvalidSignature)));
    }

    #[test]
    fn empty_signature_fails() {
        let verifier = SignatureVerifier::new("secret");
        assert!(matches!(
            verifier.verify(BODY, ""),
            Err(LineError::InvalidSignature)
        ));
    }

    #[test]
    fn non_base64_signature_fails() {
        let verifier = SignatureVerifier::new("secret");
        assert!(matches!(
            verifier.verify(BODY, "not base64!!"),
            Err(LineError::InvalidSignature)
        ));
    }

    #[test]
    fn debug_redacts_secret() {
        let verifier = SignatureVerifier::new("super-secret");
        let debug = format!("{verifier:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("redacted"));
    }
}
