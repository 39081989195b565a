//! Webhook verification and delivery-handling configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Webhook configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Maximum accepted age of a signed delivery, in seconds
    #[serde(default = "default_tolerance")]
    pub tolerance_secs: i64,

    /// Accepted clock skew for timestamps ahead of local time, in seconds
    #[serde(default = "default_clock_skew")]
    pub clock_skew_secs: i64,

    /// Acknowledge redelivered event ids without dispatching them again
    #[serde(default)]
    pub deduplicate: bool,

    /// Number of event ids remembered when deduplication is on
    #[serde(default = "default_dedup_capacity")]
    pub dedup_capacity: usize,
}

impl WebhookConfig {
    /// Validate webhook configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.tolerance_secs <= 0 || self.tolerance_secs > 3600 {
            return Err(ValidationError::InvalidTolerance);
        }
        if self.clock_skew_secs < 0 || self.clock_skew_secs > self.tolerance_secs {
            return Err(ValidationError::InvalidTolerance);
        }
        if self.deduplicate && self.dedup_capacity == 0 {
            return Err(ValidationError::InvalidDedupCapacity);
        }
        Ok(())
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            tolerance_secs: default_tolerance(),
            clock_skew_secs: default_clock_skew(),
            deduplicate: false,
            dedup_capacity: default_dedup_capacity(),
        }
    }
}

fn default_tolerance() -> i64 {
    300
}

fn default_clock_skew() -> i64 {
    60
}

fn default_dedup_capacity() -> usize {
    10_000
}
