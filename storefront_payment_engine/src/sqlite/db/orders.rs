use chrono::Utc;
use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewOrder, Order, OrderId, OrderItem, OrderStatusType, PaymentMethod, PaymentStatusType},
    traits::{Settlement, SettlementOutcome, StorefrontApiError},
};

/// Inserts a new order row and its item snapshot. Not atomic on its own; run it inside a transaction and
/// pass `&mut *tx` when atomicity is required.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, StorefrontApiError> {
    // COD settles on delivery; gateway orders have a live transaction from the start.
    let payment_status = match order.payment_method {
        PaymentMethod::Cod => PaymentStatusType::Pending,
        PaymentMethod::PayU => PaymentStatusType::Initiated,
    };
    let inserted: Order = sqlx::query_as(
        r#"
            INSERT INTO orders (
                order_id,
                customer_id,
                total,
                payment_method,
                order_status,
                payment_status,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING *;
        "#,
    )
    .bind(order.order_id.clone())
    .bind(order.customer_id.clone())
    .bind(order.total)
    .bind(order.payment_method)
    .bind(OrderStatusType::Initiated)
    .bind(payment_status)
    .bind(order.created_at)
    .fetch_one(&mut *conn)
    .await?;
    for item in &order.items {
        sqlx::query(
            r#"
                INSERT INTO order_items (order_id, product_id, title, image, price, quantity)
                VALUES ($1, $2, $3, $4, $5, $6);
            "#,
        )
        .bind(inserted.order_id.clone())
        .bind(item.product_id.clone())
        .bind(item.title.clone())
        .bind(item.image.clone())
        .bind(item.price)
        .bind(item.quantity)
        .execute(&mut *conn)
        .await?;
    }
    debug!("📝️ Order [{}] inserted with id {}", inserted.order_id, inserted.id);
    Ok(inserted)
}

pub async fn fetch_order_by_order_id(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, StorefrontApiError> {
    let order = sqlx::query_as(r#"SELECT * FROM orders WHERE order_id = $1;"#)
        .bind(order_id.clone())
        .fetch_optional(&mut *conn)
        .await?;
    Ok(order)
}

pub async fn fetch_order_items(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderItem>, StorefrontApiError> {
    let items = sqlx::query_as(r#"SELECT * FROM order_items WHERE order_id = $1 ORDER BY id;"#)
        .bind(order_id.clone())
        .fetch_all(&mut *conn)
        .await?;
    Ok(items)
}

/// Applies a settlement, conditional on the stored payment status. The caller is expected to wrap this in a
/// transaction so the read and the guarded update cannot interleave with a racing duplicate callback.
pub async fn settle_order(
    order_id: &OrderId,
    settlement: Settlement,
    conn: &mut SqliteConnection,
) -> Result<SettlementOutcome, StorefrontApiError> {
    let order = fetch_order_by_order_id(order_id, &mut *conn)
        .await?
        .ok_or_else(|| StorefrontApiError::OrderNotFound(order_id.clone()))?;
    let target = settlement.payment_status();
    let outcome = if order.payment_status == PaymentStatusType::Initiated {
        SettlementOutcome::Applied
    } else if order.payment_status == target {
        SettlementOutcome::Replayed
    } else {
        SettlementOutcome::Superseded
    };
    if matches!(outcome, SettlementOutcome::Applied | SettlementOutcome::Replayed) {
        // The IN guard keeps the update conditional even if another writer slipped in since the read.
        sqlx::query(
            r#"
                UPDATE orders SET payment_status = $1, order_status = $2, updated_at = $3
                WHERE order_id = $4 AND payment_status IN ($5, $1);
            "#,
        )
        .bind(target)
        .bind(settlement.order_status())
        .bind(Utc::now())
        .bind(order_id.clone())
        .bind(PaymentStatusType::Initiated)
        .execute(&mut *conn)
        .await?;
    }
    Ok(outcome)
}
