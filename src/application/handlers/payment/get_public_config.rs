//! GetPublicConfigHandler - Query handler for the checkout page bootstrap values.

use crate::domain::payment::PublicConfig;

/// Handler returning the publishable key and default currency.
///
/// Both values are fixed at startup, so this never fails.
pub struct GetPublicConfigHandler {
    config: PublicConfig,
}

impl GetPublicConfigHandler {
    pub fn new(config: PublicConfig) -> Self {
        Self { config }
    }

    pub fn handle(&self) -> PublicConfig {
        self.config.clone()
    }
}
