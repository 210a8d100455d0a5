use crate::{
    db_types::{NewOrder, Order, OrderId, OrderItem},
    traits::{data_objects::{Settlement, SettlementOutcome}, StorefrontApiError},
};

/// Repository interface for order snapshots.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Persists a new order and its item snapshot atomically.
    ///
    /// The initial statuses are derived from the payment method: COD orders start `initiated`/`pending`,
    /// gateway orders start `initiated`/`initiated`.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StorefrontApiError>;

    async fn fetch_order_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, StorefrontApiError>;

    async fn fetch_order_items(&self, order_id: &OrderId) -> Result<Vec<OrderItem>, StorefrontApiError>;

    /// Applies a settlement to the order, conditional on the currently stored payment status.
    ///
    /// Only orders in `initiated` transition; a replay of the already-recorded outcome re-applies the same
    /// values; anything else is reported as [`SettlementOutcome::Superseded`] and left untouched. The check
    /// and the update run in one transaction, so a racing duplicate callback cannot interleave between them.
    async fn settle_order(
        &self,
        order_id: &OrderId,
        settlement: Settlement,
    ) -> Result<SettlementOutcome, StorefrontApiError>;
}
