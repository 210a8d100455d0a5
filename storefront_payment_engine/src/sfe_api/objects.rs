use serde::{Deserialize, Serialize};

use crate::db_types::{Order, OrderId};

/// A gateway callback, reduced to the fields the reconciliation flow consumes.
///
/// The order is correlated via `order_id` (recovered from the `udf1` extension field); `txnid` identifies
/// the payment attempt. `raw_body` is the untouched wire payload and is stored verbatim on the payment
/// record — the gateway sends many more fields than we model, and disputes may hinge on any of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayCallback {
    pub order_id: OrderId,
    pub txnid: String,
    pub gateway_txn_id: Option<String>,
    pub payment_mode: Option<String>,
    pub bank_reference: Option<String>,
    pub productinfo: Option<String>,
    pub raw_body: String,
}

/// What a callback ended up doing, so the caller can log it and redirect the shopper appropriately.
#[derive(Debug, Clone)]
pub enum CallbackResolution {
    /// The order transitioned.
    Applied(Order),
    /// A duplicate of an already-recorded outcome. The same values were re-applied.
    Replayed(Order),
    /// A stale transition (e.g. a failure arriving after a recorded success). Ignored.
    Superseded(Order),
    /// The correlation token pointed at a COD order. The reconciliation path never touches those.
    IgnoredCod(Order),
    /// No order matched the correlation token. Only the failure path tolerates this.
    UnknownOrder(OrderId),
}

impl CallbackResolution {
    /// The order id to send the shopper to, whatever happened.
    pub fn order_id(&self) -> &OrderId {
        match self {
            CallbackResolution::Applied(order)
            | CallbackResolution::Replayed(order)
            | CallbackResolution::Superseded(order)
            | CallbackResolution::IgnoredCod(order) => &order.order_id,
            CallbackResolution::UnknownOrder(order_id) => order_id,
        }
    }
}
