//! # Storage interface contracts
//!
//! This module defines the interfaces a storage backend must expose to support the storefront payment engine.
//! Each entity gets its own repository trait so that the reconciliation state machine in
//! [`crate::OrderFlowApi`] can be exercised against mocks, without a live store:
//!
//! * [`OrderManagement`] — order snapshots and the conditional settlement transition.
//! * [`PaymentManagement`] — payment attempts and gateway correlation updates.
//! * [`CartManagement`] — the per-shopper cart and idempotent pruning.
//!
//! [`StorefrontDatabase`] is the union of the three; concrete backends (currently SQLite) implement all of
//! them and get the union for free.
mod cart_management;
mod data_objects;
mod order_management;
mod payment_management;

use thiserror::Error;

pub use cart_management::CartManagement;
pub use data_objects::{GatewayUpdate, Settlement, SettlementOutcome};
pub use order_management::OrderManagement;
pub use payment_management::PaymentManagement;

use crate::db_types::OrderId;

#[derive(Debug, Clone, Error)]
pub enum StorefrontApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Order {0} could not be found")]
    OrderNotFound(OrderId),
}

impl From<sqlx::Error> for StorefrontApiError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

/// The full set of behaviour a backend must provide to drive the order/payment flows.
pub trait StorefrontDatabase: OrderManagement + PaymentManagement + CartManagement {}

impl<T> StorefrontDatabase for T where T: OrderManagement + PaymentManagement + CartManagement {}
