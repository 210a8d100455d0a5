//! # Storefront Payment Engine
//!
//! The core order-and-payment workflow for the storefront: creating orders (cash-on-delivery or
//! gateway-routed) and reconciling asynchronous payment-gateway callbacks against stored order and payment
//! state. The library is provider-agnostic at the storage level:
//!
//! 1. Storage contracts live in [`mod@traits`]; the bundled SQLite backend ([`SqliteDatabase`]) implements
//!    them. You should never need to touch the database directly — use the public API instead. The data
//!    types stored in the database are public and live in [`mod@db_types`].
//! 2. The public API is [`OrderFlowApi`], which owns the reconciliation state machine and the cart-pruning
//!    side effects.
//!
//! The gateway's request/response integrity hashes are pure functions in [`helpers::gateway_hash`].
pub mod db_types;
pub mod helpers;
mod sfe_api;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;

pub use sfe_api::{CallbackResolution, GatewayCallback, OrderFlowApi};
pub use traits::StorefrontApiError;
