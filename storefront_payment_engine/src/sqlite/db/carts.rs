use log::trace;
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{db_types::CartItem, traits::StorefrontApiError};

pub async fn upsert_item(
    customer_id: &str,
    item: CartItem,
    conn: &mut SqliteConnection,
) -> Result<(), StorefrontApiError> {
    sqlx::query(
        r#"
            INSERT INTO cart_items (customer_id, product_id, quantity) VALUES ($1, $2, $3)
            ON CONFLICT (customer_id, product_id) DO UPDATE SET quantity = excluded.quantity;
        "#,
    )
    .bind(customer_id.to_string())
    .bind(item.product_id)
    .bind(item.quantity)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn fetch_items(customer_id: &str, conn: &mut SqliteConnection) -> Result<Vec<CartItem>, StorefrontApiError> {
    let items = sqlx::query_as(r#"SELECT product_id, quantity FROM cart_items WHERE customer_id = $1 ORDER BY id;"#)
        .bind(customer_id.to_string())
        .fetch_all(&mut *conn)
        .await?;
    Ok(items)
}

/// Deletes every cart line matching one of the purchased product ids. Quantities are ignored; a
/// partial-quantity purchase removes the whole line. Naturally idempotent.
pub async fn remove_items(
    customer_id: &str,
    product_ids: &[String],
    conn: &mut SqliteConnection,
) -> Result<u64, StorefrontApiError> {
    if product_ids.is_empty() {
        return Ok(0);
    }
    let mut query = QueryBuilder::new("DELETE FROM cart_items WHERE customer_id = ");
    query.push_bind(customer_id.to_string());
    query.push(" AND product_id IN (");
    let mut separated = query.separated(", ");
    for product_id in product_ids {
        separated.push_bind(product_id.clone());
    }
    separated.push_unseparated(")");
    let removed = query.build().execute(&mut *conn).await?.rows_affected();
    trace!("🗑️ Removed {removed} cart line(s) for customer {customer_id}");
    Ok(removed)
}
