//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the Stripe REST API.
//! Requests are form-encoded, authenticated with the secret key via HTTP
//! basic auth, and pinned to a fixed API version.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::from_payment_config(&app_config.payment);
//! let adapter = StripePaymentAdapter::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};

use crate::config::PaymentConfig;
use crate::domain::payment::{PaymentIntentRequest, PaymentIntentResult};
use crate::ports::{PaymentError, PaymentErrorCode, PaymentProvider};

use super::api_types::{StripeErrorBody, StripePaymentIntent};

/// Stripe API version this integration is written against.
pub const DEFAULT_API_VERSION: &str = "2024-06-20";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    /// Value sent in the Stripe-Version header.
    api_version: String,

    /// Per-request timeout.
    timeout: Duration,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_base_url: "https://api.stripe.com".to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Create configuration from the loaded payment settings.
    pub fn from_payment_config(config: &PaymentConfig) -> Self {
        Self::new(config.stripe_secret_key.expose_secret().clone())
            .with_base_url(config.api_base_url.clone())
            .with_api_version(config.api_version.clone())
            .with_timeout(config.request_timeout())
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Pin a different Stripe API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Stripe payment provider adapter.
///
/// Implements `PaymentProvider` for Stripe API integration.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    /// Create a new Stripe adapter with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the HTTP client cannot be constructed.
    pub fn new(config: StripeConfig) -> Result<Self, PaymentError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                PaymentError::new(
                    PaymentErrorCode::ProviderError,
                    format!("Failed to build HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }
}

/// Form parameters for `POST /v1/payment_intents`.
///
/// Nested objects use Stripe's bracket notation.
pub fn payment_intent_form(request: &PaymentIntentRequest) -> Vec<(String, String)> {
    let mut params = vec![
        ("amount".to_string(), request.amount().to_string()),
        ("currency".to_string(), request.currency().as_str().to_string()),
    ];

    let methods = request.automatic_payment_methods();
    params.push((
        "automatic_payment_methods[enabled]".to_string(),
        methods.enabled.to_string(),
    ));
    if let Some(redirects) = methods.allow_redirects {
        params.push((
            "automatic_payment_methods[allow_redirects]".to_string(),
            redirects.as_str().to_string(),
        ));
    }

    for (key, value) in request.metadata() {
        params.push((format!("metadata[{}]", key), value));
    }

    if let Some(email) = request.customer_email() {
        params.push(("receipt_email".to_string(), email.to_string()));
    }

    params
}

/// Maps a non-2xx Stripe response to a `PaymentError`.
///
/// Stripe's own message is kept verbatim so it can be shown to the payer.
pub fn map_stripe_error(status: StatusCode, body: &str) -> PaymentError {
    let code = match status {
        StatusCode::BAD_REQUEST => PaymentErrorCode::InvalidRequest,
        StatusCode::UNAUTHORIZED => PaymentErrorCode::AuthenticationError,
        StatusCode::PAYMENT_REQUIRED => PaymentErrorCode::CardDeclined,
        StatusCode::NOT_FOUND => PaymentErrorCode::NotFound,
        StatusCode::TOO_MANY_REQUESTS => PaymentErrorCode::RateLimitExceeded,
        _ => PaymentErrorCode::ProviderError,
    };

    match serde_json::from_str::<StripeErrorBody>(body) {
        Ok(parsed) => {
            let message = parsed
                .error
                .message
                .unwrap_or_else(|| format!("Stripe API error ({})", status.as_u16()));
            let error = PaymentError::new(code, message);
            match parsed.error.code {
                Some(provider_code) => error.with_provider_code(provider_code),
                None => error,
            }
        }
        Err(_) => PaymentError::new(code, format!("Stripe API error ({})", status.as_u16())),
    }
}

fn map_transport_error(err: reqwest::Error) -> PaymentError {
    if err.is_timeout() {
        PaymentError::network("Request to Stripe timed out")
    } else {
        PaymentError::network(format!("Failed to reach Stripe: {}", err))
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntentResult, PaymentError> {
        let url = format!("{}/v1/payment_intents", self.config.api_base_url);
        let params = payment_intent_form(request);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .header("Stripe-Version", &self.config.api_version)
            .form(&params)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let error = map_stripe_error(status, &error_text);
            tracing::warn!(
                status = status.as_u16(),
                code = %error.code,
                provider_code = ?error.provider_code,
                "Stripe create_payment_intent failed"
            );
            return Err(error);
        }

        let intent: StripePaymentIntent = response.json().await.map_err(|e| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                format!("Failed to parse Stripe response: {}", e),
            )
        })?;

        let client_secret = intent.client_secret.ok_or_else(|| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                "Stripe response did not include a client secret",
            )
        })?;

        tracing::info!(
            payment_intent_id = %intent.id,
            amount = request.amount(),
            currency = %request.currency(),
            "Payment intent created"
        );

        Ok(PaymentIntentResult {
            id: intent.id,
            client_secret,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::IntentDefaults;

    fn request(hints: Vec<String>, email: Option<&str>) -> PaymentIntentRequest {
        PaymentIntentRequest::resolve(
            Some(1999),
            Some("usd"),
            email.map(str::to_string),
            hints,
            &IntentDefaults::default(),
        )
        .unwrap()
    }

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    // ══════════════════════════════════════════════════════════════
    // Configuration Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn stripe_config_builder_works() {
        let config = StripeConfig::new("sk_test_123")
            .with_base_url("http://localhost:12111/")
            .with_api_version("2023-10-16");

        assert_eq!(config.api_base_url(), "http://localhost:12111");
        assert_eq!(config.api_version(), "2023-10-16");
    }

    #[test]
    fn stripe_config_debug_redacts_key() {
        let config = StripeConfig::new("sk_test_supersecret");
        let debug = format!("{:?}", config);

        assert!(!debug.contains("supersecret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn stripe_config_from_payment_config() {
        let payment = PaymentConfig {
            stripe_secret_key: SecretString::new("sk_test_abc".to_string()),
            api_base_url: "http://127.0.0.1:9999".to_string(),
            request_timeout_secs: 3,
            ..Default::default()
        };

        let config = StripeConfig::from_payment_config(&payment);

        assert_eq!(config.api_base_url(), "http://127.0.0.1:9999");
        assert_eq!(config.api_version(), DEFAULT_API_VERSION);
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    // ══════════════════════════════════════════════════════════════
    // Form Encoding Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn form_carries_amount_currency_and_metadata() {
        let params = payment_intent_form(&request(vec![], None));

        assert_eq!(param(&params, "amount"), Some("1999"));
        assert_eq!(param(&params, "currency"), Some("usd"));
        assert_eq!(param(&params, "automatic_payment_methods[enabled]"), Some("true"));
        assert_eq!(
            param(&params, "metadata[integration_check]"),
            Some("elements_custom")
        );
    }

    #[test]
    fn form_without_hints_leaves_redirects_unset() {
        let params = payment_intent_form(&request(vec![], None));
        assert_eq!(param(&params, "automatic_payment_methods[allow_redirects]"), None);
    }

    #[test]
    fn form_with_hints_disables_redirects() {
        let params = payment_intent_form(&request(vec!["card".to_string()], None));
        assert_eq!(
            param(&params, "automatic_payment_methods[allow_redirects]"),
            Some("never")
        );
    }

    #[test]
    fn form_includes_receipt_email_when_present() {
        let with = payment_intent_form(&request(vec![], Some("buyer@example.com")));
        let without = payment_intent_form(&request(vec![], None));

        assert_eq!(param(&with, "receipt_email"), Some("buyer@example.com"));
        assert_eq!(param(&without, "receipt_email"), None);
    }

    // ══════════════════════════════════════════════════════════════
    // Error Mapping Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn maps_invalid_request_with_stripe_message() {
        let body = r#"{"error":{"message":"Invalid currency: xyz","type":"invalid_request_error","code":"parameter_invalid"}}"#;

        let err = map_stripe_error(StatusCode::BAD_REQUEST, body);

        assert_eq!(err.code, PaymentErrorCode::InvalidRequest);
        assert_eq!(err.message, "Invalid currency: xyz");
        assert_eq!(err.provider_code.as_deref(), Some("parameter_invalid"));
    }

    #[test]
    fn maps_status_codes() {
        let cases = [
            (StatusCode::UNAUTHORIZED, PaymentErrorCode::AuthenticationError),
            (StatusCode::PAYMENT_REQUIRED, PaymentErrorCode::CardDeclined),
            (StatusCode::NOT_FOUND, PaymentErrorCode::NotFound),
            (StatusCode::TOO_MANY_REQUESTS, PaymentErrorCode::RateLimitExceeded),
            (StatusCode::INTERNAL_SERVER_ERROR, PaymentErrorCode::ProviderError),
        ];
        for (status, code) in cases {
            assert_eq!(map_stripe_error(status, "{}").code, code, "{}", status);
        }
    }

    #[test]
    fn unparseable_error_body_gets_generic_message() {
        let err = map_stripe_error(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");

        assert_eq!(err.code, PaymentErrorCode::ProviderError);
        assert_eq!(err.message, "Stripe API error (502)");
    }

    #[test]
    fn rate_limit_is_marked_retryable() {
        let err = map_stripe_error(StatusCode::TOO_MANY_REQUESTS, "{}");
        assert!(err.retryable);
    }
}
