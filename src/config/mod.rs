//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. The conventional Stripe variables
//! (`STRIPE_SECRET_KEY`, `STRIPE_PUBLISHABLE_KEY`, `STRIPE_WEBHOOK_SECRET`) and
//! `PORT` are read directly; every other setting can be overridden with the
//! `PAYMENT_BACKEND__` prefix, nested values separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use payment_backend::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod error;
mod payment;
mod server;
mod webhook;

pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};
pub use webhook::WebhookConfig;

use serde::Deserialize;

/// Conventional environment variables and the configuration keys they populate.
const CONVENTIONAL_VARS: [(&str, &str); 4] = [
    ("STRIPE_SECRET_KEY", "payment.stripe_secret_key"),
    ("STRIPE_PUBLISHABLE_KEY", "payment.stripe_publishable_key"),
    ("STRIPE_WEBHOOK_SECRET", "payment.stripe_webhook_secret"),
    ("PORT", "server.port"),
];

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// The struct is built once at startup and handed to each component; nothing
/// reads the environment after that.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, static assets)
    #[serde(default)]
    pub server: ServerConfig,

    /// Payment configuration (Stripe credentials and intent defaults)
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Webhook verification configuration
    #[serde(default)]
    pub webhook: WebhookConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PAYMENT_BACKEND` prefix
    /// 3. Applies the conventional `STRIPE_*` and `PORT` variables on top
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    /// Missing credentials are reported by [`AppConfig::validate()`].
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Build configuration from the current process environment only.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder().add_source(
            config::Environment::with_prefix("PAYMENT_BACKEND").separator("__"),
        );

        for (var, key) in CONVENTIONAL_VARS {
            builder = builder.set_override_option(key, std::env::var(var).ok())?;
        }

        let config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.payment.validate()?;
        self.webhook.validate()?;
        Ok(())
    }

    /// Load and validate in one step; any failure is fatal at startup.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
