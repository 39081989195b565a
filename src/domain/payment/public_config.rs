//! Client-safe configuration exposed to the checkout page.

use super::currency::Currency;

/// Non-secret settings a browser needs to initialise the payment form.
///
/// Built once from process configuration; holds nothing that could be used
/// to act on the Stripe account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicConfig {
    /// Stripe publishable key (pk_...).
    pub publishable_key: String,
    /// Currency applied when a creation request omits one.
    pub default_currency: Currency,
}

impl PublicConfig {
    pub fn new(publishable_key: impl Into<String>, default_currency: Currency) -> Self {
        Self {
            publishable_key: publishable_key.into(),
            default_currency,
        }
    }
}
