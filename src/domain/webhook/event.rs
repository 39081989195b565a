//! Stripe webhook event types.
//!
//! A `WebhookEvent` can only be obtained from [`WebhookVerifier`], so holding
//! one means the delivery was authenticated. Only fields relevant to our
//! processing are captured; the rest of Stripe's event schema is ignored.
//!
//! [`WebhookVerifier`]: super::WebhookVerifier

use serde::Deserialize;

use super::errors::VerificationError;

/// Kinds of Stripe events this service distinguishes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A payment intent completed successfully.
    PaymentIntentSucceeded,
    /// A payment attempt on an intent failed.
    PaymentIntentPaymentFailed,
    /// Any other event type, kept verbatim.
    Unknown(String),
}

impl EventKind {
    /// Parse event kind from the Stripe `type` string.
    pub fn parse(s: &str) -> Self {
        match s {
            "payment_intent.succeeded" => Self::PaymentIntentSucceeded,
            "payment_intent.payment_failed" => Self::PaymentIntentPaymentFailed,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Convert to the Stripe event type string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::PaymentIntentSucceeded => "payment_intent.succeeded",
            Self::PaymentIntentPaymentFailed => "payment_intent.payment_failed",
            Self::Unknown(other) => other,
        }
    }

    /// Returns true for kinds with a dedicated variant.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire shape of a Stripe event body.
#[derive(Debug, Deserialize)]
struct RawStripeEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    created: i64,
    #[serde(default)]
    livemode: bool,
    #[serde(default)]
    api_version: Option<String>,
    #[serde(default)]
    data: RawEventData,
}

#[derive(Debug, Default, Deserialize)]
struct RawEventData {
    #[serde(default)]
    object: serde_json::Value,
}

/// An authenticated Stripe webhook event.
///
/// Consumed once by the dispatcher and then dropped; nothing is persisted.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    id: String,
    kind: EventKind,
    created: i64,
    livemode: bool,
    api_version: Option<String>,
    payload: serde_json::Value,
    signature_header: String,
    raw_body: Vec<u8>,
}

impl WebhookEvent {
    /// Builds an event from a body whose signature has already been checked.
    pub(crate) fn from_verified(
        raw_body: &[u8],
        signature_header: &str,
    ) -> Result<Self, VerificationError> {
        let raw: RawStripeEvent = serde_json::from_slice(raw_body)
            .map_err(|e| VerificationError::MalformedPayload(e.to_string()))?;

        Ok(Self {
            id: raw.id,
            kind: EventKind::parse(&raw.event_type),
            created: raw.created,
            livemode: raw.livemode,
            api_version: raw.api_version,
            payload: raw.data.object,
            signature_header: signature_header.to_string(),
            raw_body: raw_body.to_vec(),
        })
    }

    /// Stripe event ID (evt_...).
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// The event `type` string as sent by Stripe.
    pub fn event_type(&self) -> &str {
        self.kind.as_str()
    }

    /// Unix timestamp at which Stripe created the event.
    pub fn created(&self) -> i64 {
        self.created
    }

    pub fn is_live(&self) -> bool {
        self.livemode
    }

    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// The `data.object` the event is about.
    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    pub fn signature_header(&self) -> &str {
        &self.signature_header
    }

    pub fn raw_body(&self) -> &[u8] {
        &self.raw_body
    }

    /// Attempts to deserialize the data object as the specified type.
    pub fn deserialize_object<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Result<T, serde_json::Error> {
        T::deserialize(&self.payload)
    }
}

/// Builder for creating test WebhookEvent instances.
#[cfg(test)]
pub struct WebhookEventBuilder {
    id: String,
    event_type: String,
    object: serde_json::Value,
    livemode: bool,
}

#[cfg(test)]
impl Default for WebhookEventBuilder {
    fn default() -> Self {
        Self {
            id: "evt_test_123".to_string(),
            event_type: "payment_intent.succeeded".to_string(),
            object: serde_json::json!({}),
            livemode: false,
        }
    }
}

#[cfg(test)]
impl WebhookEventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn object(mut self, object: serde_json::Value) -> Self {
        self.object = object;
        self
    }

    pub fn livemode(mut self, livemode: bool) -> Self {
        self.livemode = livemode;
        self
    }

    pub fn build(self) -> WebhookEvent {
        let body = serde_json::json!({
            "id": self.id,
            "type": self.event_type,
            "created": 1704067200,
            "data": { "object": self.object },
            "livemode": self.livemode,
            "api_version": "2024-06-20"
        });
        let raw = serde_json::to_vec(&body).unwrap();
        WebhookEvent::from_verified(&raw, "t=1704067200,v1=00").unwrap()
    }
}
