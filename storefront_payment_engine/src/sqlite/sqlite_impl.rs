//! `SqliteDatabase` is the concrete storage backend for the storefront payment engine.
//!
//! It implements the repository traits from the [`crate::traits`] module on top of a SQLite connection
//! pool, delegating the SQL to the stateless functions in [`super::db`] and adding transaction boundaries
//! where several statements must be atomic.
use std::fmt::Debug;

use log::trace;
use sqlx::SqlitePool;

use super::db::{carts, create_schema, db_url, new_pool, orders, payments};
use crate::{
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

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object using the URL from the environment (or the default).
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        create_schema(&pool).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl OrderManagement for SqliteDatabase {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StorefrontApiError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::insert_order(order, &mut *tx).await?;
        tx.commit().await?;
        Ok(order)
    }

    async fn fetch_order_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order_by_order_id(order_id, &mut conn).await
    }

    async fn fetch_order_items(&self, order_id: &OrderId) -> Result<Vec<OrderItem>, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order_items(order_id, &mut conn).await
    }

    async fn settle_order(
        &self,
        order_id: &OrderId,
        settlement: Settlement,
    ) -> Result<SettlementOutcome, StorefrontApiError> {
        let mut tx = self.pool.begin().await?;
        let outcome = orders::settle_order(order_id, settlement, &mut *tx).await?;
        tx.commit().await?;
        Ok(outcome)
    }
}

impl PaymentManagement for SqliteDatabase {
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        payments::insert_payment(payment, &mut conn).await
    }

    async fn fetch_payment(&self, order_id: &OrderId, txnid: &str) -> Result<Option<Payment>, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        payments::fetch_payment(order_id, txnid, &mut conn).await
    }

    async fn apply_gateway_update(
        &self,
        order_id: &OrderId,
        txnid: &str,
        update: GatewayUpdate,
    ) -> Result<Option<Payment>, StorefrontApiError> {
        let mut tx = self.pool.begin().await?;
        let payment = payments::apply_gateway_update(order_id, txnid, update, &mut *tx).await?;
        tx.commit().await?;
        Ok(payment)
    }
}

impl CartManagement for SqliteDatabase {
    async fn upsert_cart_item(&self, customer_id: &str, item: CartItem) -> Result<(), StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        carts::upsert_item(customer_id, item, &mut conn).await
    }

    async fn fetch_cart_items(&self, customer_id: &str) -> Result<Vec<CartItem>, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        carts::fetch_items(customer_id, &mut conn).await
    }

    async fn remove_cart_items(&self, customer_id: &str, product_ids: &[String]) -> Result<u64, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        carts::remove_items(customer_id, product_ids, &mut conn).await
    }
}
