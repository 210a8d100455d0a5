use mockall::mock;
use storefront_payment_engine::{
    db_types::{CartItem, NewOrder, NewPayment, Order, OrderId, OrderItem, Payment},
    traits::{
        CartManagement,
        GatewayUpdate,
        OrderManagement,
        PaymentManagement,
        Settlement,
        SettlementOutcome,
        StorefrontApiError,
    },
};

mock! {
    pub Db {}
    impl OrderManagement for Db {
        async fn insert_order(&self, order: NewOrder) -> Result<Order, StorefrontApiError>;
        async fn fetch_order_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, StorefrontApiError>;
        async fn fetch_order_items(&self, order_id: &OrderId) -> Result<Vec<OrderItem>, StorefrontApiError>;
        async fn settle_order(&self, order_id: &OrderId, settlement: Settlement) -> Result<SettlementOutcome, StorefrontApiError>;
    }
    impl PaymentManagement for Db {
        async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, StorefrontApiError>;
        async fn fetch_payment(&self, order_id: &OrderId, txnid: &str) -> Result<Option<Payment>, StorefrontApiError>;
        async fn apply_gateway_update(&self, order_id: &OrderId, txnid: &str, update: GatewayUpdate) -> Result<Option<Payment>, StorefrontApiError>;
    }
    impl CartManagement for Db {
        async fn upsert_cart_item(&self, customer_id: &str, item: CartItem) -> Result<(), StorefrontApiError>;
        async fn fetch_cart_items(&self, customer_id: &str) -> Result<Vec<CartItem>, StorefrontApiError>;
        async fn remove_cart_items(&self, customer_id: &str, product_ids: &[String]) -> Result<u64, StorefrontApiError>;
    }
}
