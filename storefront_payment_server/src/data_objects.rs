//! Request and response payloads for the checkout and callback endpoints.
use serde::{Deserialize, Serialize};
use sps_common::Rupees;
use storefront_payment_engine::{
    db_types::{NewOrderItem, OrderId, OrderStatusType, PaymentStatusType},
    helpers::gateway_hash::HashFields,
    GatewayCallback,
};

//--------------------------------------   Checkout requests   -------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CodOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub total_amount: Rupees,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct InitiatePaymentRequest {
    pub items: Vec<OrderItemRequest>,
    pub total_amount: Rupees,
    pub productinfo: String,
    pub firstname: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderItemRequest {
    pub product: String,
    pub title: String,
    #[serde(default)]
    pub image: String,
    pub price: Rupees,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

impl From<OrderItemRequest> for NewOrderItem {
    fn from(item: OrderItemRequest) -> Self {
        NewOrderItem {
            product_id: item.product,
            title: item.title,
            image: item.image,
            price: item.price,
            // A zero or negative quantity on the wire is treated as one, the same as an absent field.
            quantity: item.quantity.max(1),
        }
    }
}

//--------------------------------------   Checkout responses  -------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodOrderResponse {
    pub message: String,
    pub order_id: OrderId,
    pub order_status: OrderStatusType,
    pub payment_status: PaymentStatusType,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentResponse {
    /// A complete, self-submitting HTML form targeting the gateway's hosted payment page.
    pub payu_form: String,
}

//--------------------------------------   Gateway callbacks   -------------------------------------------------------

/// The urlencoded body PayU posts to the success and failure callback endpoints.
///
/// Deliberately lenient: every field defaults to an empty string, because the gateway's field set varies by
/// payment mode and we must never 400 a callback we could have verified. Integrity comes from the `hash`
/// check, not from schema strictness.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayuCallback {
    /// PayU's own transaction id.
    #[serde(default)]
    pub mihpayid: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub txnid: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub productinfo: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub email: String,
    /// The order id, echoed back from the initiation form.
    #[serde(default)]
    pub udf1: String,
    #[serde(default)]
    pub udf2: String,
    #[serde(default)]
    pub udf3: String,
    #[serde(default)]
    pub udf4: String,
    #[serde(default)]
    pub udf5: String,
    #[serde(default)]
    pub bank_ref_num: String,
    #[serde(default)]
    pub hash: String,
}

impl PayuCallback {
    /// The subset of fields that participate in the response-hash formula, in borrowed form.
    pub fn hash_fields(&self) -> HashFields<'_> {
        HashFields {
            txnid: &self.txnid,
            amount: &self.amount,
            productinfo: &self.productinfo,
            firstname: &self.firstname,
            email: &self.email,
            udf: [&self.udf1, &self.udf2, &self.udf3, &self.udf4, &self.udf5],
        }
    }

    /// Converts the parsed body into the engine's gateway-agnostic callback record. `raw_body` is the
    /// verbatim urlencoded payload, retained for audit.
    pub fn into_gateway_callback(self, raw_body: String) -> GatewayCallback {
        fn opt(s: String) -> Option<String> {
            if s.is_empty() {
                None
            } else {
                Some(s)
            }
        }
        GatewayCallback {
            order_id: OrderId(self.udf1),
            txnid: self.txnid,
            gateway_txn_id: opt(self.mihpayid),
            payment_mode: opt(self.mode),
            bank_reference: opt(self.bank_ref_num),
            productinfo: opt(self.productinfo),
            raw_body,
        }
    }
}
