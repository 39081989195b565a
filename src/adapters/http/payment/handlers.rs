//! HTTP handlers for payment endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::adapters::events::InMemoryProcessedEventStore;
use crate::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use crate::application::handlers::payment::{
    default_dispatcher, CreatePaymentIntentCommand, CreatePaymentIntentHandler,
    GetPublicConfigHandler, HandleWebhookCommand, HandleWebhookError, HandleWebhookHandler,
};
use crate::config::AppConfig;
use crate::domain::payment::{IntentDefaults, PaymentIntentError, PublicConfig};
use crate::domain::webhook::{EventDispatcher, WebhookVerifier};
use crate::ports::{PaymentError, PaymentProvider, ProcessedEventStore};

use super::dto::{
    ClientSecretResponse, ConfigResponse, CreatePaymentIntentRequest, ErrorResponse,
    WebhookAckResponse,
};

/// Header carrying Stripe's webhook signature.
pub const STRIPE_SIGNATURE_HEADER: &str = "stripe-signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers. Everything in it is read-only after
/// startup, apart from the optional processed-event store.
#[derive(Clone)]
pub struct PaymentAppState {
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub public_config: PublicConfig,
    pub intent_defaults: IntentDefaults,
    pub verifier: Arc<WebhookVerifier>,
    pub dispatcher: Arc<EventDispatcher>,
    pub processed_events: Option<Arc<dyn ProcessedEventStore>>,
}

/// Errors building the application state from configuration.
#[derive(Debug, Error)]
pub enum AppStateError {
    #[error("Failed to initialise payment provider: {0}")]
    Provider(#[from] PaymentError),

    #[error("Invalid payment defaults: {0}")]
    Defaults(#[from] PaymentIntentError),
}

impl PaymentAppState {
    /// Create state with the built-in event handlers and no deduplication.
    pub fn new(
        payment_provider: Arc<dyn PaymentProvider>,
        public_config: PublicConfig,
        intent_defaults: IntentDefaults,
        verifier: WebhookVerifier,
    ) -> Self {
        Self {
            payment_provider,
            public_config,
            intent_defaults,
            verifier: Arc::new(verifier),
            dispatcher: Arc::new(default_dispatcher()),
            processed_events: None,
        }
    }

    /// Replace the event dispatcher.
    pub fn with_dispatcher(mut self, dispatcher: EventDispatcher) -> Self {
        self.dispatcher = Arc::new(dispatcher);
        self
    }

    /// Enable webhook deduplication backed by `store`.
    pub fn with_deduplication(mut self, store: Arc<dyn ProcessedEventStore>) -> Self {
        self.processed_events = Some(store);
        self
    }

    /// Build production state: the Stripe adapter plus settings from `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppStateError> {
        let payment = &config.payment;

        let provider = StripePaymentAdapter::new(StripeConfig::from_payment_config(payment))?;
        let defaults = IntentDefaults::new(payment.default_amount, &payment.default_currency)?;
        let public_config =
            PublicConfig::new(payment.stripe_publishable_key.clone(), defaults.currency.clone());
        let verifier = WebhookVerifier::new(payment.stripe_webhook_secret.expose_secret().clone())
            .with_tolerance(config.webhook.tolerance_secs)
            .with_clock_skew(config.webhook.clock_skew_secs);

        let state = Self::new(Arc::new(provider), public_config, defaults, verifier);

        if config.webhook.deduplicate {
            tracing::info!(
                capacity = config.webhook.dedup_capacity,
                "Webhook deduplication enabled"
            );
            let store = InMemoryProcessedEventStore::new(config.webhook.dedup_capacity);
            return Ok(state.with_deduplication(Arc::new(store)));
        }

        Ok(state)
    }

    /// Create handlers on demand from the shared state.
    pub fn public_config_handler(&self) -> GetPublicConfigHandler {
        GetPublicConfigHandler::new(self.public_config.clone())
    }

    pub fn create_payment_intent_handler(&self) -> CreatePaymentIntentHandler {
        CreatePaymentIntentHandler::new(
            self.payment_provider.clone(),
            self.intent_defaults.clone(),
        )
    }

    pub fn webhook_handler(&self) -> HandleWebhookHandler {
        let handler = HandleWebhookHandler::new(self.verifier.clone(), self.dispatcher.clone());
        match &self.processed_events {
            Some(store) => handler.with_deduplication(store.clone()),
            None => handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /config - Publishable key and default currency for the checkout page.
pub async fn get_config(State(state): State<PaymentAppState>) -> Json<ConfigResponse> {
    let config = state.public_config_handler().handle();
    Json(ConfigResponse::from(config))
}

/// POST /create-payment-intent - Create a payment intent and return its client secret.
///
/// The body is parsed here rather than by the `Json` extractor so that an
/// empty body means `{}` and malformed JSON gets the standard error shape.
pub async fn create_payment_intent(
    State(state): State<PaymentAppState>,
    body: Bytes,
) -> Result<impl IntoResponse, PaymentApiError> {
    let request = parse_create_request(&body)?;

    let handler = state.create_payment_intent_handler();
    let result = handler
        .handle(CreatePaymentIntentCommand::from(request))
        .await?;

    Ok(Json(ClientSecretResponse {
        client_secret: result.client_secret,
    }))
}

fn parse_create_request(body: &[u8]) -> Result<CreatePaymentIntentRequest, PaymentApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreatePaymentIntentRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected malformed create-payment-intent body");
        PaymentApiError::MalformedBody(e.to_string())
    })
}

/// POST /webhook - Handle Stripe webhook deliveries.
///
/// Takes the body as raw bytes; the signature covers the exact bytes sent.
pub async fn handle_webhook(
    State(state): State<PaymentAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let handler = state.webhook_handler();
    let cmd = HandleWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    let outcome = handler.handle(cmd).await?;
    tracing::debug!(outcome = ?outcome, "Webhook acknowledged");

    Ok(Json(WebhookAckResponse::received()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts payment errors to JSON HTTP responses.
#[derive(Debug)]
pub enum PaymentApiError {
    /// The request body was not valid JSON for the expected shape.
    MalformedBody(String),
    /// Validation or upstream failure.
    Payment(PaymentIntentError),
}

impl From<PaymentIntentError> for PaymentApiError {
    fn from(err: PaymentIntentError) -> Self {
        Self::Payment(err)
    }
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            Self::MalformedBody(reason) => {
                (StatusCode::BAD_REQUEST, format!("Invalid JSON body: {}", reason))
            }
            Self::Payment(err) => (err.status_code(), err.message()),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// API error type that converts webhook errors to plain-text HTTP responses.
#[derive(Debug)]
pub struct WebhookApiError(HandleWebhookError);

impl From<HandleWebhookError> for WebhookApiError {
    fn from(err: HandleWebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        (self.0.status_code(), format!("Webhook Error: {}", self.0)).into_response()
    }
}
