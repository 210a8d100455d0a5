use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use log::error;
use serde::{Deserialize, Serialize};
use sps_common::Rupees;
use sqlx::{FromRow, Type};
use thiserror::Error;

use crate::helpers::new_order_id;

#[derive(Debug, Clone, Error)]
#[error("Invalid value: {0}")]
pub struct ConversionError(String);

//--------------------------------------        OrderId        -------------------------------------------------------

/// The opaque, externally visible order identifier. Generated at order creation and carried through the gateway
/// round trip in the `udf1` extension field.
#[derive(Debug, Clone, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------    PaymentMethod      -------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Cash on delivery. Settled out-of-band; the reconciliation path never touches these orders.
    #[serde(rename = "COD")]
    Cod,
    /// The hosted-payment-page gateway.
    PayU,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cod => write!(f, "COD"),
            PaymentMethod::PayU => write!(f, "PayU"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cod" => Ok(Self::Cod),
            "payu" => Ok(Self::PayU),
            s => Err(ConversionError(format!("Invalid payment method: {s}"))),
        }
    }
}

//--------------------------------------   OrderStatusType     -------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatusType {
    /// Newly placed. Also the state a gateway order is reset to when payment fails.
    Initiated,
    /// Payment confirmed; the order has entered fulfilment.
    Processing,
    /// Downstream fulfilment states. Not driven by this subsystem.
    Shipped,
    Delivered,
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Initiated => write!(f, "initiated"),
            OrderStatusType::Processing => write!(f, "processing"),
            OrderStatusType::Shipped => write!(f, "shipped"),
            OrderStatusType::Delivered => write!(f, "delivered"),
        }
    }
}

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "initiated" => Ok(Self::Initiated),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

impl From<String> for OrderStatusType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid order status: {value}. But this conversion cannot fail. Defaulting to Initiated");
            OrderStatusType::Initiated
        })
    }
}

//--------------------------------------  PaymentStatusType    -------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatusType {
    /// COD orders only. Settlement happens on delivery, outside this system.
    Pending,
    /// A gateway transaction has been created, and no callback has arrived yet.
    Initiated,
    Paid,
    Failed,
}

impl Display for PaymentStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatusType::Pending => write!(f, "pending"),
            PaymentStatusType::Initiated => write!(f, "initiated"),
            PaymentStatusType::Paid => write!(f, "paid"),
            PaymentStatusType::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for PaymentStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "initiated" => Ok(Self::Initiated),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            s => Err(ConversionError(format!("Invalid payment status: {s}"))),
        }
    }
}

impl From<String> for PaymentStatusType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid payment status: {value}. But this conversion cannot fail. Defaulting to Pending");
            PaymentStatusType::Pending
        })
    }
}

//--------------------------------------       NewOrder        -------------------------------------------------------

/// An order as submitted at checkout, before it has been persisted.
///
/// The item list is an immutable snapshot taken at creation time; it does not track the live cart or catalog.
/// The total is the client-asserted amount and is stored as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub order_id: OrderId,
    pub customer_id: String,
    pub total: Rupees,
    pub payment_method: PaymentMethod,
    pub items: Vec<NewOrderItem>,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    fn new(customer_id: String, items: Vec<NewOrderItem>, total: Rupees, payment_method: PaymentMethod) -> Self {
        Self { order_id: new_order_id(), customer_id, total, payment_method, items, created_at: Utc::now() }
    }

    pub fn cod(customer_id: String, items: Vec<NewOrderItem>, total: Rupees) -> Self {
        Self::new(customer_id, items, total, PaymentMethod::Cod)
    }

    pub fn gateway(customer_id: String, items: Vec<NewOrderItem>, total: Rupees) -> Self {
        Self::new(customer_id, items, total, PaymentMethod::PayU)
    }

    pub fn product_ids(&self) -> Vec<String> {
        self.items.iter().map(|i| i.product_id.clone()).collect()
    }
}

impl Display for NewOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Order {} [{}]: {} item(s) totalling {} for customer {}",
            self.order_id,
            self.payment_method,
            self.items.len(),
            self.total,
            self.customer_id
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub product_id: String,
    pub title: String,
    pub image: String,
    pub price: Rupees,
    pub quantity: i64,
}

//--------------------------------------        Order          -------------------------------------------------------

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_id: OrderId,
    pub customer_id: String,
    pub total: Rupees,
    pub payment_method: PaymentMethod,
    pub order_status: OrderStatusType,
    pub payment_status: PaymentStatusType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: OrderId,
    pub product_id: String,
    pub title: String,
    pub image: String,
    pub price: Rupees,
    pub quantity: i64,
}

//--------------------------------------      NewPayment       -------------------------------------------------------

/// A gateway payment attempt, created at initiation time, before the shopper ever sees the payment form.
/// This guarantees that every outbound attempt is auditable even if the shopper abandons it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
    pub order_id: OrderId,
    pub customer_id: String,
    pub method: PaymentMethod,
    pub amount: Rupees,
    pub txnid: String,
    pub productinfo: String,
}

impl NewPayment {
    pub fn new(order_id: OrderId, customer_id: String, amount: Rupees, txnid: String, productinfo: String) -> Self {
        Self { order_id, customer_id, method: PaymentMethod::PayU, amount, txnid, productinfo }
    }
}

//--------------------------------------       Payment         -------------------------------------------------------

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub order_id: OrderId,
    pub customer_id: String,
    pub method: PaymentMethod,
    pub status: PaymentStatusType,
    pub amount: Rupees,
    /// Our per-attempt transaction id. Unique across all attempts; lookups always pair it with the order id.
    pub txnid: String,
    pub productinfo: String,
    /// The gateway's own transaction id (`mihpayid`). Populated only once a callback is received.
    pub gateway_txn_id: Option<String>,
    pub payment_mode: Option<String>,
    pub bank_reference: Option<String>,
    /// The verbatim callback payload, retained for audit and dispute resolution.
    pub raw_response: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------       CartItem        -------------------------------------------------------

/// One line of a shopper's cart. The cart is owned by the shopper session; orders only prune it after a
/// confirmed purchase.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub quantity: i64,
}
