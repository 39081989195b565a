//! CreatePaymentIntentHandler - Command handler for issuing payment intents.

use std::sync::Arc;

use crate::domain::payment::{
    IntentDefaults, PaymentIntentError, PaymentIntentRequest, PaymentIntentResult,
};
use crate::ports::PaymentProvider;

/// Command to create a payment intent.
///
/// Every field is optional; omitted amount and currency fall back to the
/// configured defaults.
#[derive(Debug, Clone, Default)]
pub struct CreatePaymentIntentCommand {
    /// Amount in minor units.
    pub amount: Option<i64>,
    /// ISO 4217 currency code.
    pub currency: Option<String>,
    /// Address Stripe sends the receipt to.
    pub customer_email: Option<String>,
    /// Payment methods the page intends to offer.
    pub payment_methods: Vec<String>,
}

/// Result of a successful creation.
pub type CreatePaymentIntentResult = PaymentIntentResult;

/// Handler for creating payment intents.
///
/// Makes exactly one provider call per command; failures are returned to the
/// caller and never retried, so a payment is never created twice.
pub struct CreatePaymentIntentHandler {
    provider: Arc<dyn PaymentProvider>,
    defaults: IntentDefaults,
}

impl CreatePaymentIntentHandler {
    pub fn new(provider: Arc<dyn PaymentProvider>, defaults: IntentDefaults) -> Self {
        Self { provider, defaults }
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentIntentCommand,
    ) -> Result<CreatePaymentIntentResult, PaymentIntentError> {
        // 1. Apply defaults and validate
        let request = PaymentIntentRequest::resolve(
            cmd.amount,
            cmd.currency.as_deref(),
            cmd.customer_email,
            cmd.payment_methods,
            &self.defaults,
        )?;

        // 2. Single upstream attempt
        let result = self
            .provider
            .create_payment_intent(&request)
            .await
            .map_err(|err| {
                tracing::warn!(
                    code = %err.code,
                    amount = request.amount(),
                    currency = %request.currency(),
                    "Payment intent creation failed"
                );
                PaymentIntentError::from(err)
            })?;

        tracing::debug!(
            payment_intent_id = %result.id,
            allow_redirects = ?request.automatic_payment_methods().allow_redirects,
            "Issued client secret"
        );

        Ok(result)
    }
}
