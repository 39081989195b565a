//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `payment` - Payment intent requests, defaults and public configuration
//! - `webhook` - Webhook verification, event kinds and dispatch
pub mod payment;
pub mod webhook;
