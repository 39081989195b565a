//! Data Transfer Objects for the payment HTTP endpoints.
//!
//! Field names follow the checkout page's existing contract: responses are
//! camelCase, while the creation request uses snake_case keys.

use serde::{Deserialize, Serialize};

use crate::application::handlers::payment::CreatePaymentIntentCommand;
use crate::domain::payment::PublicConfig;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request body for `POST /create-payment-intent`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Amount in minor units (defaults to the configured amount).
    #[serde(default)]
    pub amount: Option<i64>,
    /// ISO 4217 code (defaults to the configured currency).
    #[serde(default)]
    pub currency: Option<String>,
    /// Receipt address.
    #[serde(default)]
    pub customer_email: Option<String>,
    /// Payment methods the page will show.
    #[serde(default)]
    pub payment_methods: Option<Vec<String>>,
}

impl From<CreatePaymentIntentRequest> for CreatePaymentIntentCommand {
    fn from(req: CreatePaymentIntentRequest) -> Self {
        Self {
            amount: req.amount,
            currency: req.currency,
            customer_email: req.customer_email,
            payment_methods: req.payment_methods.unwrap_or_default(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for `GET /config`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub publishable_key: String,
    pub default_currency: String,
}

impl From<PublicConfig> for ConfigResponse {
    fn from(config: PublicConfig) -> Self {
        Self {
            publishable_key: config.publishable_key,
            default_currency: config.default_currency.to_string(),
        }
    }
}

/// Response for a successful `POST /create-payment-intent`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientSecretResponse {
    pub client_secret: String,
}

/// Response for an accepted webhook delivery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookAckResponse {
    pub received: bool,
}

impl WebhookAckResponse {
    pub fn received() -> Self {
        Self { received: true }
    }
}

/// Error response body: `{"error": {"message": "..."}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                message: message.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::Currency;

    // ════════════════════════════════════════════════════════════════════════════
    // Request Deserialization Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn empty_object_deserializes_to_all_none() {
        let req: CreatePaymentIntentRequest = serde_json::from_str("{}").unwrap();
        assert!(req.amount.is_none());
        assert!(req.currency.is_none());
        assert!(req.customer_email.is_none());
        assert!(req.payment_methods.is_none());
    }

    #[test]
    fn full_request_deserializes() {
        let json = r#"{
            "amount": 500,
            "currency": "usd",
            "customer_email": "buyer@example.com",
            "payment_methods": ["card", "ideal"]
        }"#;

        let req: CreatePaymentIntentRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.amount, Some(500));
        assert_eq!(req.currency.as_deref(), Some("usd"));
        assert_eq!(req.customer_email.as_deref(), Some("buyer@example.com"));
        assert_eq!(
            req.payment_methods,
            Some(vec!["card".to_string(), "ideal".to_string()])
        );
    }

    #[test]
    fn null_fields_are_treated_as_absent() {
        let json = r#"{"amount": null, "payment_methods": null}"#;
        let req: CreatePaymentIntentRequest = serde_json::from_str(json).unwrap();
        let cmd = CreatePaymentIntentCommand::from(req);

        assert!(cmd.amount.is_none());
        assert!(cmd.payment_methods.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let req: CreatePaymentIntentRequest =
            serde_json::from_str(r#"{"amount": 100, "coupon": "X"}"#).unwrap();
        assert_eq!(req.amount, Some(100));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Response Serialization Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn config_response_is_camel_case() {
        let response = ConfigResponse::from(PublicConfig::new("pk_test_123", Currency::eur()));

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "publishableKey": "pk_test_123", "defaultCurrency": "eur" })
        );
    }

    #[test]
    fn client_secret_response_is_camel_case() {
        let response = ClientSecretResponse {
            client_secret: "pi_1_secret_2".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();

        assert_eq!(json, r#"{"clientSecret":"pi_1_secret_2"}"#);
    }

    #[test]
    fn error_response_is_nested() {
        let json = serde_json::to_string(&ErrorResponse::new("Invalid currency: xyz")).unwrap();
        assert_eq!(json, r#"{"error":{"message":"Invalid currency: xyz"}}"#);
    }

    #[test]
    fn webhook_ack_serializes() {
        let json = serde_json::to_string(&WebhookAckResponse::received()).unwrap();
        assert_eq!(json, r#"{"received":true}"#);
    }
}
