use chrono::Utc;
use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewPayment, OrderId, Payment, PaymentStatusType},
    traits::{GatewayUpdate, StorefrontApiError},
};

pub async fn insert_payment(payment: NewPayment, conn: &mut SqliteConnection) -> Result<Payment, StorefrontApiError> {
    let inserted: Payment = sqlx::query_as(
        r#"
            INSERT INTO payments (
                order_id,
                customer_id,
                method,
                status,
                amount,
                txnid,
                productinfo,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING *;
        "#,
    )
    .bind(payment.order_id.clone())
    .bind(payment.customer_id.clone())
    .bind(payment.method)
    .bind(PaymentStatusType::Initiated)
    .bind(payment.amount)
    .bind(payment.txnid.clone())
    .bind(payment.productinfo.clone())
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await?;
    debug!("📝️ Payment [{}] inserted for order [{}]", inserted.txnid, inserted.order_id);
    Ok(inserted)
}

pub async fn fetch_payment(
    order_id: &OrderId,
    txnid: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Payment>, StorefrontApiError> {
    let payment = sqlx::query_as(r#"SELECT * FROM payments WHERE order_id = $1 AND txnid = $2;"#)
        .bind(order_id.clone())
        .bind(txnid.to_string())
        .fetch_optional(&mut *conn)
        .await?;
    Ok(payment)
}

/// Records the gateway's verdict against the `(order_id, txnid)` pair. The status guard mirrors the order
/// transition: only an `initiated` payment, or a replay of the same outcome, is touched. Returns `None`
/// when nothing matched (missing payment or stale update).
pub async fn apply_gateway_update(
    order_id: &OrderId,
    txnid: &str,
    update: GatewayUpdate,
    conn: &mut SqliteConnection,
) -> Result<Option<Payment>, StorefrontApiError> {
    let payment = sqlx::query_as(
        r#"
            UPDATE payments SET
                status = $1,
                gateway_txn_id = $2,
                payment_mode = $3,
                bank_reference = $4,
                productinfo = COALESCE($5, productinfo),
                raw_response = $6,
                updated_at = $7
            WHERE order_id = $8 AND txnid = $9 AND status IN ($10, $1)
            RETURNING *;
        "#,
    )
    .bind(update.status)
    .bind(update.gateway_txn_id)
    .bind(update.payment_mode)
    .bind(update.bank_reference)
    .bind(update.productinfo)
    .bind(update.raw_response)
    .bind(Utc::now())
    .bind(order_id.clone())
    .bind(txnid.to_string())
    .bind(PaymentStatusType::Initiated)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(payment)
}
