use crate::{
    db_types::{NewPayment, OrderId, Payment},
    traits::{data_objects::GatewayUpdate, StorefrontApiError},
};

/// Repository interface for gateway payment attempts.
///
/// Retries mean an order can accumulate several payment attempts, so every lookup pairs the order id with
/// the per-attempt `txnid` rather than assuming one payment per order.
#[allow(async_fn_in_trait)]
pub trait PaymentManagement {
    /// Persists a new payment attempt with status `initiated`.
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, StorefrontApiError>;

    async fn fetch_payment(&self, order_id: &OrderId, txnid: &str) -> Result<Option<Payment>, StorefrontApiError>;

    /// Records the gateway's verdict on a payment attempt, conditional on the stored status: only an
    /// `initiated` payment (or a replay of the same outcome) is updated. Returns the updated record, or
    /// `None` when no payment matched the `(order_id, txnid)` pair or the update was stale.
    async fn apply_gateway_update(
        &self,
        order_id: &OrderId,
        txnid: &str,
        update: GatewayUpdate,
    ) -> Result<Option<Payment>, StorefrontApiError>;
}
