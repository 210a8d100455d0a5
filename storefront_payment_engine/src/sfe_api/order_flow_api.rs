use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewOrder, NewPayment, Order, Payment, PaymentMethod},
    helpers::new_txn_id,
    sfe_api::objects::{CallbackResolution, GatewayCallback},
    traits::{GatewayUpdate, Settlement, SettlementOutcome, StorefrontApiError, StorefrontDatabase},
};

/// `OrderFlowApi` is the primary API for creating orders and reconciling gateway payment outcomes against
/// stored order and payment state.
pub struct OrderFlowApi<B> {
    db: B,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> OrderFlowApi<B>
where B: StorefrontDatabase
{
    /// Places a cash-on-delivery order.
    ///
    /// The order snapshot is persisted first; only then are the purchased items pruned from the shopper's
    /// cart. Order durability takes precedence over cart cleanup: if the pruning fails, the order stands
    /// and the error is logged and swallowed.
    pub async fn place_cod_order(&self, order: NewOrder) -> Result<Order, StorefrontApiError> {
        let products = order.product_ids();
        let order = self.db.insert_order(order).await?;
        debug!("🛒️ COD order [{}] placed for customer {}", order.order_id, order.customer_id);
        if let Err(e) = self.db.remove_cart_items(&order.customer_id, &products).await {
            warn!("🛒️ Could not prune the cart for customer {} after order [{}]. {e}", order.customer_id, order.order_id);
        }
        Ok(order)
    }

    /// Creates the order and payment records backing a new gateway transaction.
    ///
    /// Both records exist, with status `initiated`, before any payment form is rendered, so every outbound
    /// attempt is auditable even if the shopper abandons it. The generated `txnid` is returned on the
    /// payment record for the caller to embed in the form.
    pub async fn initiate_gateway_payment(
        &self,
        order: NewOrder,
        productinfo: &str,
    ) -> Result<(Order, Payment), StorefrontApiError> {
        let order = self.db.insert_order(order).await?;
        let txnid = new_txn_id();
        let payment = NewPayment::new(
            order.order_id.clone(),
            order.customer_id.clone(),
            order.total,
            txnid,
            productinfo.to_string(),
        );
        let payment = self.db.insert_payment(payment).await?;
        debug!("💳️ Gateway payment [{}] initiated for order [{}]", payment.txnid, order.order_id);
        Ok((order, payment))
    }

    /// Reconciles a success callback.
    ///
    /// | current payment status | new payment status | new order status | resolution |
    /// |------------------------|--------------------|------------------|------------|
    /// | initiated              | paid               | processing       | Applied    |
    /// | paid                   | paid (re-applied)  | processing       | Replayed   |
    /// | failed                 | unchanged          | unchanged        | Superseded |
    ///
    /// COD orders are immune. A missing order is an error here — a success notification we cannot attribute
    /// must surface. On an applied or replayed success the payment record is updated with the gateway
    /// correlation fields and the verbatim body, and the purchased items are pruned from the cart, giving a
    /// gateway purchase the same cart-cleanup effect as a COD purchase.
    pub async fn record_gateway_success(
        &self,
        callback: &GatewayCallback,
    ) -> Result<CallbackResolution, StorefrontApiError> {
        let order = self
            .db
            .fetch_order_by_order_id(&callback.order_id)
            .await?
            .ok_or_else(|| StorefrontApiError::OrderNotFound(callback.order_id.clone()))?;
        if order.payment_method == PaymentMethod::Cod {
            warn!("🔄️ Success callback [{}] matched COD order [{}]. Ignoring.", callback.txnid, order.order_id);
            return Ok(CallbackResolution::IgnoredCod(order));
        }
        let outcome = self.db.settle_order(&order.order_id, Settlement::Success).await?;
        match outcome {
            SettlementOutcome::Applied | SettlementOutcome::Replayed => {
                self.update_payment_record(callback, Settlement::Success).await;
                self.prune_cart_for_order(&order).await;
            },
            SettlementOutcome::Superseded => {
                warn!(
                    "🔄️ Stale success callback [{}] for order [{}] (already settled as failed). Ignoring.",
                    callback.txnid, order.order_id
                );
            },
        }
        debug!("🔄️✅️ Success callback [{}] for order [{}] resolved as {outcome:?}", callback.txnid, order.order_id);
        Ok(resolution(outcome, order))
    }

    /// Reconciles a failure callback.
    ///
    /// | current payment status | new payment status  | new order status  | resolution |
    /// |------------------------|---------------------|-------------------|------------|
    /// | initiated              | failed              | initiated (reset) | Applied    |
    /// | failed                 | failed (re-applied) | initiated         | Replayed   |
    /// | paid                   | unchanged           | unchanged         | Superseded |
    ///
    /// A failure notification for an unknown order is not actionable, but it is also not worth surfacing to
    /// the paying shopper, so a missing order resolves to [`CallbackResolution::UnknownOrder`] rather than
    /// an error. No cart pruning happens on failure.
    pub async fn record_gateway_failure(
        &self,
        callback: &GatewayCallback,
    ) -> Result<CallbackResolution, StorefrontApiError> {
        let Some(order) = self.db.fetch_order_by_order_id(&callback.order_id).await? else {
            warn!("🔄️ Failure callback [{}] for unknown order {}. Nothing to do.", callback.txnid, callback.order_id);
            return Ok(CallbackResolution::UnknownOrder(callback.order_id.clone()));
        };
        if order.payment_method == PaymentMethod::Cod {
            warn!("🔄️ Failure callback [{}] matched COD order [{}]. Ignoring.", callback.txnid, order.order_id);
            return Ok(CallbackResolution::IgnoredCod(order));
        }
        let outcome = match self.db.settle_order(&order.order_id, Settlement::Failure).await {
            Ok(outcome) => outcome,
            Err(StorefrontApiError::OrderNotFound(id)) => return Ok(CallbackResolution::UnknownOrder(id)),
            Err(e) => return Err(e),
        };
        if matches!(outcome, SettlementOutcome::Applied | SettlementOutcome::Replayed) {
            self.update_payment_record(callback, Settlement::Failure).await;
        } else {
            warn!(
                "🔄️ Stale failure callback [{}] for order [{}] (already settled as paid). Ignoring.",
                callback.txnid, order.order_id
            );
        }
        debug!("🔄️❌️ Failure callback [{}] for order [{}] resolved as {outcome:?}", callback.txnid, order.order_id);
        Ok(resolution(outcome, order))
    }

    /// Removes the given products from the shopper's cart. Safe to call repeatedly: re-running on an
    /// already-pruned cart is a no-op.
    pub async fn remove_purchased_items(
        &self,
        customer_id: &str,
        product_ids: &[String],
    ) -> Result<u64, StorefrontApiError> {
        let removed = self.db.remove_cart_items(customer_id, product_ids).await?;
        trace!("🛒️ Pruned {removed} cart line(s) for customer {customer_id}");
        Ok(removed)
    }

    /// Best-effort update of the payment record matching the callback's `(order_id, txnid)` pair. A missing
    /// or stale payment is logged, never surfaced: by the time we get here the order transition has already
    /// been decided, and the redirect must not be blocked on audit bookkeeping.
    async fn update_payment_record(&self, callback: &GatewayCallback, settlement: Settlement) {
        let update = GatewayUpdate {
            status: settlement.payment_status(),
            gateway_txn_id: callback.gateway_txn_id.clone(),
            payment_mode: callback.payment_mode.clone(),
            bank_reference: callback.bank_reference.clone(),
            productinfo: callback.productinfo.clone(),
            raw_response: callback.raw_body.clone(),
        };
        match self.db.apply_gateway_update(&callback.order_id, &callback.txnid, update).await {
            Ok(Some(payment)) => {
                trace!("💳️ Payment [{}] updated to {}", payment.txnid, payment.status);
            },
            Ok(None) => {
                warn!(
                    "💳️ No updatable payment matched order {} / txnid [{}]. The callback was recorded against the \
                     order only.",
                    callback.order_id, callback.txnid
                );
            },
            Err(e) => {
                warn!("💳️ Could not update payment [{}] for order {}. {e}", callback.txnid, callback.order_id);
            },
        }
    }

    async fn prune_cart_for_order(&self, order: &Order) {
        let products = match self.db.fetch_order_items(&order.order_id).await {
            Ok(items) => items.into_iter().map(|i| i.product_id).collect::<Vec<_>>(),
            Err(e) => {
                warn!("🛒️ Could not fetch items for order [{}] to prune the cart. {e}", order.order_id);
                return;
            },
        };
        if let Err(e) = self.db.remove_cart_items(&order.customer_id, &products).await {
            warn!("🛒️ Could not prune the cart for customer {} after order [{}]. {e}", order.customer_id, order.order_id);
        }
    }
}

fn resolution(outcome: SettlementOutcome, order: Order) -> CallbackResolution {
    match outcome {
        SettlementOutcome::Applied => CallbackResolution::Applied(order),
        SettlementOutcome::Replayed => CallbackResolution::Replayed(order),
        SettlementOutcome::Superseded => CallbackResolution::Superseded(order),
    }
}
