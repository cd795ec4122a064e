//! Webhook Signature Verifier
//!
//! Authenticates inbound webhook deliveries against the shared secret.
//! The platform sends an HMAC-SHA256 of the raw request body in the
//! `X-Hub-Signature-256` header, hex-encoded with a `sha256=` prefix.
//!
//! Verification must run over the exact bytes received on the wire;
//! re-serializing a decoded payload before hashing would not round-trip.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_PREFIX: &str = "sha256=";

/// Verifies webhook payload signatures with a shared secret.
///
/// Fails closed: with no secret configured, every payload is rejected.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    secret: Option<String>,
}

impl SignatureVerifier {
    pub fn new(secret: Option<String>) -> Self {
        let secret = secret.filter(|s| !s.is_empty());
        Self { secret }
    }

    /// Verify `signature_header` against the HMAC-SHA256 of `payload`.
    ///
    /// Returns `false` for a missing secret, missing `sha256=` prefix,
    /// non-hex signature, length mismatch, or digest mismatch. Never
    /// panics and never errors. The digest comparison is constant-time
    /// (`Mac::verify_slice`).
    pub fn verify(&self, payload: &[u8], signature_header: &str) -> bool {
        let Some(secret) = &self.secret else {
            warn!("webhook secret not configured, rejecting delivery");
            return false;
        };

        let Some(hex_signature) = signature_header.strip_prefix(SIGNATURE_PREFIX) else {
            return false;
        };

        let Ok(signature) = hex::decode(hex_signature) else {
            return false;
        };

        let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
            Ok(mac) => mac,
            // HMAC accepts keys of any length; kept for totality
            Err(_) => return false,
        };
        mac.update(payload);
        mac.verify_slice(&signature).is_ok()
    }
}
