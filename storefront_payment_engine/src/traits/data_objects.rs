use serde::{Deserialize, Serialize};

use crate::db_types::{OrderStatusType, PaymentStatusType};

/// The outcome a gateway callback is asking us to record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Settlement {
    Success,
    Failure,
}

impl Settlement {
    /// The payment status this settlement drives the order to.
    pub fn payment_status(self) -> PaymentStatusType {
        match self {
            Settlement::Success => PaymentStatusType::Paid,
            Settlement::Failure => PaymentStatusType::Failed,
        }
    }

    /// The order status this settlement drives the order to. A failed payment resets the order to
    /// `initiated` so the shopper can retry.
    pub fn order_status(self) -> OrderStatusType {
        match self {
            Settlement::Success => OrderStatusType::Processing,
            Settlement::Failure => OrderStatusType::Initiated,
        }
    }
}

/// The result of a conditional settlement transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// The order was in `initiated` and has transitioned.
    Applied,
    /// The order was already in the target state; the same values were re-applied. Harmless.
    Replayed,
    /// The order had already settled with the *opposite* outcome. The transition was ignored.
    Superseded,
}

/// The correlation fields a callback contributes to a payment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayUpdate {
    pub status: PaymentStatusType,
    pub gateway_txn_id: Option<String>,
    pub payment_mode: Option<String>,
    pub bank_reference: Option<String>,
    /// Overwrites the stored descriptor only when the gateway echoes one back.
    pub productinfo: Option<String>,
    /// The verbatim callback body. Unrecognized fields are deliberately retained here.
    pub raw_response: String,
}
