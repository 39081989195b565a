//! Integration tests for the payment HTTP surface.
//!
//! These tests drive the full application router (routes, middleware and
//! static fallback) with a mock payment provider:
//! 1. Public configuration
//! 2. Payment intent creation, defaults and error shapes
//! 3. Webhook verification, dispatch and deduplication

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use payment_backend::adapters::events::InMemoryProcessedEventStore;
use payment_backend::adapters::http::{app_router, PaymentAppState};
use payment_backend::adapters::stripe::MockPaymentProvider;
use payment_backend::config::ServerConfig;
use payment_backend::domain::payment::{AllowRedirects, Currency, IntentDefaults, PublicConfig};
use payment_backend::domain::webhook::{
    generate_test_header, DispatchError, EventDispatcher, EventKind, WebhookEvent,
    WebhookEventHandler, WebhookVerifier,
};
use payment_backend::ports::{PaymentError, PaymentErrorCode};

const WEBHOOK_SECRET: &str = "whsec_integration_secret";
const PUBLISHABLE_KEY: &str = "pk_test_integration";

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Handler that counts the events it receives.
struct RecordingHandler {
    calls: AtomicU32,
}

impl RecordingHandler {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicU32::new(0),
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WebhookEventHandler for RecordingHandler {
    fn handles(&self) -> Vec<EventKind> {
        vec![
            EventKind::PaymentIntentSucceeded,
            EventKind::PaymentIntentPaymentFailed,
        ]
    }

    async fn handle(&self, _event: &WebhookEvent) -> Result<(), DispatchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct TestApp {
    router: Router,
    provider: MockPaymentProvider,
    handler: Arc<RecordingHandler>,
    _static_dir: tempfile::TempDir,
}

fn base_state(provider: &MockPaymentProvider, handler: Arc<RecordingHandler>) -> PaymentAppState {
    PaymentAppState::new(
        Arc::new(provider.clone()),
        PublicConfig::new(PUBLISHABLE_KEY, Currency::eur()),
        IntentDefaults::default(),
        WebhookVerifier::new(WEBHOOK_SECRET),
    )
    .with_dispatcher(EventDispatcher::new().with_handler(handler))
}

fn build_app(dedup: bool) -> TestApp {
    let provider = MockPaymentProvider::new();
    let handler = RecordingHandler::new();
    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(static_dir.path().join("index.html"), "<html>checkout</html>").unwrap();

    let mut state = base_state(&provider, handler.clone());
    if dedup {
        state = state.with_deduplication(Arc::new(InMemoryProcessedEventStore::new(100)));
    }

    let server = ServerConfig {
        static_dir: static_dir.path().to_path_buf(),
        ..Default::default()
    };

    TestApp {
        router: app_router(state, &server),
        provider,
        handler,
        _static_dir: static_dir,
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

fn signed_webhook(payload: &str, timestamp: i64) -> Request<Body> {
    let header = generate_test_header(WEBHOOK_SECRET, timestamp, payload.as_bytes());
    Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .header("stripe-signature", header)
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn event_json(id: &str, event_type: &str) -> String {
    json!({
        "id": id,
        "object": "event",
        "type": event_type,
        "created": 1704067200,
        "livemode": false,
        "api_version": "2024-06-20",
        "data": { "object": { "id": "pi_123", "amount": 500, "currency": "usd" } }
    })
    .to_string()
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

// =============================================================================
// GET /config
// =============================================================================

#[tokio::test]
async fn config_returns_publishable_key_and_currency() {
    let app = build_app(false);

    let (status, body) = send(
        &app.router,
        Request::builder().uri("/config").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        json,
        json!({ "publishableKey": PUBLISHABLE_KEY, "defaultCurrency": "eur" })
    );
}

// =============================================================================
// POST /create-payment-intent
// =============================================================================

#[tokio::test]
async fn create_with_amount_and_currency_returns_client_secret() {
    let app = build_app(false);

    let (status, body) = send(
        &app.router,
        post_json(
            "/create-payment-intent",
            json!({ "amount": 500, "currency": "usd" }).to_string(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    let secret = json["clientSecret"].as_str().unwrap();
    assert!(!secret.is_empty());

    let sent = &app.provider.requests()[0];
    assert_eq!(sent.amount(), 500);
    assert_eq!(sent.currency().as_str(), "usd");
}

#[tokio::test]
async fn create_with_empty_body_uses_defaults() {
    let app = build_app(false);

    let (status, _) = send(&app.router, post_json("/create-payment-intent", Body::empty())).await;

    assert_eq!(status, StatusCode::OK);
    let sent = &app.provider.requests()[0];
    assert_eq!(sent.amount(), 100);
    assert_eq!(sent.currency().as_str(), "eur");
    assert_eq!(sent.automatic_payment_methods().allow_redirects, None);
}

#[tokio::test]
async fn create_with_payment_methods_disables_redirects() {
    let app = build_app(false);

    let (status, _) = send(
        &app.router,
        post_json(
            "/create-payment-intent",
            json!({ "payment_methods": ["card"], "customer_email": "buyer@example.com" })
                .to_string(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let sent = &app.provider.requests()[0];
    assert_eq!(
        sent.automatic_payment_methods().allow_redirects,
        Some(AllowRedirects::Never)
    );
    assert_eq!(sent.customer_email(), Some("buyer@example.com"));
}

#[tokio::test]
async fn create_with_invalid_currency_returns_error_message() {
    let app = build_app(false);

    let (status, body) = send(
        &app.router,
        post_json(
            "/create-payment-intent",
            json!({ "amount": 500, "currency": "dollars" }).to_string(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_str(&body).unwrap();
    let message = json["error"]["message"].as_str().unwrap();
    assert!(message.contains("currency"), "{}", message);
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn create_surfaces_upstream_message() {
    let app = build_app(false);
    app.provider.set_error(PaymentError::new(
        PaymentErrorCode::InvalidRequest,
        "Invalid currency: xyz",
    ));

    let (status, body) = send(
        &app.router,
        post_json("/create-payment-intent", json!({ "currency": "xyz" }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":{"message":"Invalid currency: xyz"}}"#);
}

#[tokio::test]
async fn create_with_malformed_json_is_bad_request() {
    let app = build_app(false);

    let (status, body) =
        send(&app.router, post_json("/create-payment-intent", "{\"amount\": ")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"]["message"].as_str().unwrap().len() > 0);
}

#[tokio::test]
async fn create_with_get_is_method_not_allowed() {
    let app = build_app(false);

    let (status, _) = send(
        &app.router,
        Request::builder()
            .uri("/create-payment-intent")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// POST /webhook
// =============================================================================

#[tokio::test]
async fn webhook_with_valid_signature_is_dispatched() {
    let app = build_app(false);

    let (status, body) = send(
        &app.router,
        signed_webhook(&event_json("evt_ok", "payment_intent.succeeded"), now()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"received":true}"#);
    assert_eq!(app.handler.calls(), 1);
}

#[tokio::test]
async fn webhook_with_unknown_kind_is_acknowledged() {
    let app = build_app(false);

    let (status, body) = send(
        &app.router,
        signed_webhook(&event_json("evt_unknown", "invoice.finalized"), now()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"received":true}"#);
    assert_eq!(app.handler.calls(), 0);
}

#[tokio::test]
async fn webhook_with_unexpected_payload_shape_is_acknowledged_by_default_handlers() {
    let static_dir = tempfile::tempdir().unwrap();
    let state = PaymentAppState::new(
        Arc::new(MockPaymentProvider::new()),
        PublicConfig::new(PUBLISHABLE_KEY, Currency::eur()),
        IntentDefaults::default(),
        WebhookVerifier::new(WEBHOOK_SECRET),
    );
    let server = ServerConfig {
        static_dir: static_dir.path().to_path_buf(),
        ..Default::default()
    };
    let router = app_router(state, &server);

    for payload in [
        json!({ "id": "evt_bare", "type": "payment_intent.succeeded" }),
        json!({
            "id": "evt_no_intent_id",
            "type": "payment_intent.payment_failed",
            "data": { "object": { "amount": 500 } }
        }),
    ] {
        let (status, body) = send(&router, signed_webhook(&payload.to_string(), now())).await;

        assert_eq!(status, StatusCode::OK, "body: {}", body);
        assert_eq!(body, r#"{"received":true}"#);
    }
}

#[tokio::test]
async fn webhook_without_signature_is_rejected() {
    let app = build_app(false);

    let (status, body) = send(
        &app.router,
        post_json("/webhook", event_json("evt_nosig", "payment_intent.succeeded")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("Webhook Error: "), "{}", body);
    assert_eq!(app.handler.calls(), 0);
}

#[tokio::test]
async fn webhook_with_tampered_body_is_rejected() {
    let app = build_app(false);
    let original = event_json("evt_t", "payment_intent.succeeded");
    let header = generate_test_header(WEBHOOK_SECRET, now(), original.as_bytes());
    let tampered = original.replace("500", "501");

    let (status, body) = send(
        &app.router,
        Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("stripe-signature", header)
            .body(Body::from(tampered))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        "Webhook Error: No signatures found matching the expected signature for payload"
    );
    assert_eq!(app.handler.calls(), 0);
}

#[tokio::test]
async fn webhook_replayed_outside_tolerance_is_rejected() {
    let app = build_app(false);

    let (status, body) = send(
        &app.router,
        signed_webhook(&event_json("evt_old", "payment_intent.succeeded"), now() - 3600),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("tolerance"), "{}", body);
    assert_eq!(app.handler.calls(), 0);
}

#[tokio::test]
async fn webhook_redelivery_dispatches_twice_without_dedup() {
    let app = build_app(false);
    let payload = event_json("evt_twice", "payment_intent.payment_failed");

    send(&app.router, signed_webhook(&payload, now())).await;
    send(&app.router, signed_webhook(&payload, now())).await;

    assert_eq!(app.handler.calls(), 2);
}

#[tokio::test]
async fn webhook_redelivery_is_acknowledged_once_with_dedup() {
    let app = build_app(true);
    let payload = event_json("evt_once", "payment_intent.succeeded");

    let (first, _) = send(&app.router, signed_webhook(&payload, now())).await;
    let (second, body) = send(&app.router, signed_webhook(&payload, now())).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(body, r#"{"received":true}"#);
    assert_eq!(app.handler.calls(), 1);
}

// =============================================================================
// Static frontend
// =============================================================================

#[tokio::test]
async fn root_serves_index_html() {
    let app = build_app(false);

    let (status, body) = send(
        &app.router,
        Request::builder().uri("/").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<html>checkout</html>");
}
