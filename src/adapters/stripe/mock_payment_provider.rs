//! Mock payment provider for testing.
//!
//! Provides a configurable mock implementation of `PaymentProvider` for unit
//! and integration tests. Supports:
//! - Pre-configured responses
//! - Error injection
//! - Call tracking

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::payment::{PaymentIntentRequest, PaymentIntentResult};
use crate::ports::{PaymentError, PaymentProvider};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
///
/// // Configure responses
/// mock.set_result(PaymentIntentResult { id: "pi_1".into(), client_secret: "pi_1_secret".into() });
///
/// // Inject errors
/// mock.set_error(PaymentError::card_declined("Test decline"));
///
/// // Assert on what was sent
/// assert_eq!(mock.requests()[0].amount(), 100);
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentProvider {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
}

/// Internal mutable state.
#[derive(Default)]
struct MockState {
    /// Result to return on the next call.
    next_result: Option<PaymentIntentResult>,

    /// Error to return on the next call.
    next_error: Option<PaymentError>,

    /// Error returned on every call until cleared.
    sticky_error: Option<PaymentError>,

    /// Requests received, in order.
    requests: Vec<PaymentIntentRequest>,
}

impl MockPaymentProvider {
    /// Create a new mock provider with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails every call with `error`.
    pub fn failing(error: PaymentError) -> Self {
        let mock = Self::new();
        mock.state().sticky_error = Some(error);
        mock
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Set the result to return on the next call.
    pub fn set_result(&self, result: PaymentIntentResult) {
        self.state().next_result = Some(result);
    }

    /// Set an error to return on the next call.
    pub fn set_error(&self, error: PaymentError) {
        self.state().next_error = Some(error);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        let mut state = self.state();
        state.next_error = None;
        state.sticky_error = None;
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Get all recorded requests.
    pub fn requests(&self) -> Vec<PaymentIntentRequest> {
        self.state().requests.clone()
    }

    /// Number of calls received.
    pub fn call_count(&self) -> usize {
        self.state().requests.len()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.state().requests.clear();
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntentResult, PaymentError> {
        let mut state = self.state();
        state.requests.push(request.clone());
        let call = state.requests.len();

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }
        if let Some(error) = &state.sticky_error {
            return Err(error.clone());
        }

        Ok(state.next_result.take().unwrap_or_else(|| {
            let id = format!("pi_mock_{}", call);
            PaymentIntentResult {
                client_secret: format!("{}_secret_mock", id),
                id,
            }
        }))
    }
}
