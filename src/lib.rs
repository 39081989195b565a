//! Payment Backend - payment intents, public config and verified webhooks
//!
//! This crate issues payment intents through Stripe, exposes the publishable
//! configuration a checkout page needs, and authenticates Stripe webhook
//! deliveries before dispatching them by event kind.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
