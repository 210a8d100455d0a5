//! # Storefront payment server
//!
//! This crate hosts the HTTP surface of the storefront order-and-payment workflow. It is responsible for:
//! * Accepting checkout requests (cash-on-delivery and gateway-routed orders) from the storefront.
//! * Rendering the signed, self-submitting payment form for the hosted-payment-page gateway.
//! * Receiving the gateway's success/failure callbacks, verifying their integrity hash, and handing them to
//!   the reconciliation engine.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! * `GET  /health`: health check.
//! * `POST /orders/cod`: place a cash-on-delivery order.
//! * `POST /orders/payu/initiate`: create a gateway transaction and return the payment form.
//! * `POST /orders/payu/success`, `POST /orders/payu/failure`: gateway callbacks.
pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
