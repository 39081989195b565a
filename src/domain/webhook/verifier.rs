//! Stripe webhook signature verification.
//!
//! Implements secure verification of Stripe webhook signatures using HMAC-SHA256.
//! Includes timestamp validation to prevent replay attacks.
//!
//! The HMAC is computed over the exact request bytes, so callers must hand in
//! the raw body. Re-encoding parsed JSON changes the bytes and the signature
//! will no longer match.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::VerificationError;
use super::event::WebhookEvent;

type HmacSha256 = Hmac<Sha256>;

/// Default maximum age for webhook events (5 minutes).
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Default clock skew allowed for future events (1 minute).
pub const DEFAULT_CLOCK_SKEW_SECS: i64 = 60;

/// Signature scheme this verifier checks.
const EXPECTED_SCHEME: &str = "v1";

/// Parsed components from the Stripe-Signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// Decoded signatures for the expected scheme, in header order.
    pub signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    /// Parses a Stripe-Signature header string.
    ///
    /// Format: `t=<timestamp>,v1=<signature>[,v1=<signature>...][,v0=<legacy>]`
    ///
    /// Other schemes are ignored, as is any `v1` value that is not valid hex.
    ///
    /// # Errors
    ///
    /// - `MissingSignatureHeader` - the header is blank
    /// - `MalformedHeader` - a pair lacks `=`, or the timestamp is missing,
    ///   repeated or not an integer
    /// - `NoSignatures` - no usable `v1` signature is present
    pub fn parse(header: &str) -> Result<Self, VerificationError> {
        if header.trim().is_empty() {
            return Err(VerificationError::MissingSignatureHeader);
        }

        let mut timestamp: Option<i64> = None;
        let mut signatures = Vec::new();

        for part in header.split(',') {
            let (key, value) = part.trim().split_once('=').ok_or_else(|| {
                VerificationError::MalformedHeader(format!("invalid pair '{}'", part.trim()))
            })?;

            match key {
                "t" => {
                    if timestamp.is_some() {
                        return Err(VerificationError::MalformedHeader(
                            "duplicate timestamp".to_string(),
                        ));
                    }
                    timestamp = Some(value.parse().map_err(|_| {
                        VerificationError::MalformedHeader("invalid timestamp".to_string())
                    })?);
                }
                EXPECTED_SCHEME => {
                    if let Ok(signature) = hex::decode(value) {
                        signatures.push(signature);
                    }
                }
                _ => {
                    // Ignore unknown fields for forward compatibility
                }
            }
        }

        let timestamp = timestamp
            .ok_or_else(|| VerificationError::MalformedHeader("missing timestamp".to_string()))?;
        if signatures.is_empty() {
            return Err(VerificationError::NoSignatures);
        }

        Ok(SignatureHeader {
            timestamp,
            signatures,
        })
    }
}

/// Verifier for Stripe webhook signatures.
pub struct WebhookVerifier {
    /// The webhook signing secret from the Stripe dashboard.
    secret: SecretString,
    /// Maximum accepted event age in seconds.
    tolerance_secs: i64,
    /// Accepted clock skew for future timestamps in seconds.
    clock_skew_secs: i64,
}

impl WebhookVerifier {
    /// Creates a new verifier with the given webhook secret and default windows.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
            clock_skew_secs: DEFAULT_CLOCK_SKEW_SECS,
        }
    }

    /// Sets the replay tolerance window.
    pub fn with_tolerance(mut self, tolerance_secs: i64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// Sets the allowed clock skew for timestamps ahead of local time.
    pub fn with_clock_skew(mut self, clock_skew_secs: i64) -> Self {
        self.clock_skew_secs = clock_skew_secs;
        self
    }

    pub fn tolerance_secs(&self) -> i64 {
        self.tolerance_secs
    }

    /// Verifies the webhook signature against the current time and parses the event.
    pub fn verify(
        &self,
        raw_body: &[u8],
        signature_header: &str,
    ) -> Result<WebhookEvent, VerificationError> {
        self.verify_at(raw_body, signature_header, chrono::Utc::now().timestamp())
    }

    /// Verifies the webhook signature as of `now` (unix seconds) and parses the event.
    ///
    /// # Verification Steps
    ///
    /// 1. Require a configured secret
    /// 2. Parse the signature header
    /// 3. Compute the expected HMAC-SHA256 over `"{t}.{raw_body}"`
    /// 4. Accept if any provided signature matches (constant-time)
    /// 5. Validate the timestamp is within the tolerance window
    /// 6. Parse the JSON payload into a WebhookEvent
    ///
    /// # Errors
    ///
    /// Any failure yields a `VerificationError`; the event must not be processed.
    pub fn verify_at(
        &self,
        raw_body: &[u8],
        signature_header: &str,
        now: i64,
    ) -> Result<WebhookEvent, VerificationError> {
        if self.secret.expose_secret().is_empty() {
            return Err(VerificationError::MissingSecret);
        }

        let header = SignatureHeader::parse(signature_header)?;

        let expected = self.compute_signature(header.timestamp, raw_body)?;
        let matched = header
            .signatures
            .iter()
            .any(|candidate| constant_time_compare(&expected, candidate));
        if !matched {
            return Err(VerificationError::InvalidSignature);
        }

        self.validate_timestamp(header.timestamp, now)?;

        WebhookEvent::from_verified(raw_body, signature_header)
    }

    /// Validates that the timestamp is within acceptable bounds.
    fn validate_timestamp(&self, timestamp: i64, now: i64) -> Result<(), VerificationError> {
        let age = now.saturating_sub(timestamp);

        // Reject events that are too old
        if age > self.tolerance_secs {
            tracing::warn!(
                event_timestamp = timestamp,
                current_time = now,
                age_secs = age,
                "Webhook event too old - possible replay attack"
            );
            return Err(VerificationError::TimestampOutOfRange { age_secs: age });
        }

        // Reject events from the future (with clock skew tolerance)
        if age < -self.clock_skew_secs {
            tracing::warn!(
                event_timestamp = timestamp,
                current_time = now,
                "Webhook event from future - clock skew or manipulation"
            );
            return Err(VerificationError::TimestampInFuture { ahead_secs: -age });
        }

        Ok(())
    }

    /// Computes the HMAC-SHA256 signature for the given timestamp and payload.
    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Result<Vec<u8>, VerificationError> {
        hmac_sha256(self.secret.expose_secret(), timestamp, payload)
    }
}

/// Verifies a delivery with the default tolerance window.
///
/// Convenience form of [`WebhookVerifier::verify`] for one-off checks.
pub fn verify(
    raw_body: &[u8],
    signature_header: &str,
    secret: &str,
) -> Result<WebhookEvent, VerificationError> {
    WebhookVerifier::new(secret).verify(raw_body, signature_header)
}

/// Builds a valid Stripe-Signature header for `payload`, as Stripe would send it.
///
/// Intended for tests and local tooling that replay signed deliveries.
pub fn generate_test_header(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let signature = hmac_sha256(secret, timestamp, payload).unwrap_or_default();
    format!("t={},{}={}", timestamp, EXPECTED_SCHEME, hex::encode(signature))
}

fn hmac_sha256(secret: &str, timestamp: i64, payload: &[u8]) -> Result<Vec<u8>, VerificationError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| VerificationError::MissingSecret)?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Performs constant-time comparison of two byte slices.
///
/// This prevents timing attacks that could leak information about the expected signature.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
