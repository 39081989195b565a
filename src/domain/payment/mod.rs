//! Payment domain module.
//!
//! Payment intent creation inputs and outputs, the payment-method policy,
//! and the public configuration handed to the checkout page.
//!
//! # Module Structure
//!
//! - `currency` - ISO 4217 currency value object
//! - `intent` - PaymentIntentRequest / PaymentIntentResult and defaults
//! - `public_config` - Publishable key and default currency
//! - `errors` - PaymentIntentError with HTTP status mapping

mod currency;
mod errors;
mod intent;
mod public_config;

pub use currency::Currency;
pub use errors::PaymentIntentError;
pub use intent::{
    AllowRedirects, AutomaticPaymentMethods, IntentDefaults, PaymentIntentRequest,
    PaymentIntentResult, INTEGRATION_CHECK,
};
pub use public_config::PublicConfig;
