//! # SQLite database methods
//!
//! "Low-level" SQLite interactions, kept as simple stateless functions that accept a
//! `&mut SqliteConnection`. Callers can hand in a pooled connection, or open a transaction and pass
//! `&mut *tx` when several calls must be atomic.
use std::{env, str::FromStr};

use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Error as SqlxError,
    SqlitePool,
};

pub mod carts;
pub mod orders;
pub mod payments;

const SQLITE_DB_URL: &str = "sqlite://data/storefront.db";

pub fn db_url() -> String {
    let result = env::var("SPS_DATABASE_URL").unwrap_or_else(|_| {
        info!("SPS_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
    Ok(pool)
}

/// Creates the schema if it does not exist yet. Idempotent, and cheap enough to run at every startup.
pub async fn create_schema(pool: &SqlitePool) -> Result<(), SqlxError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            order_id       TEXT NOT NULL UNIQUE,
            customer_id    TEXT NOT NULL,
            total          INTEGER NOT NULL,
            payment_method TEXT NOT NULL,
            order_status   TEXT NOT NULL,
            payment_status TEXT NOT NULL,
            created_at     DATETIME NOT NULL,
            updated_at     DATETIME NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS order_items (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            order_id   TEXT NOT NULL REFERENCES orders (order_id),
            product_id TEXT NOT NULL,
            title      TEXT NOT NULL,
            image      TEXT NOT NULL DEFAULT '',
            price      INTEGER NOT NULL,
            quantity   INTEGER NOT NULL DEFAULT 1
        );
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS payments (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            order_id       TEXT NOT NULL,
            customer_id    TEXT NOT NULL,
            method         TEXT NOT NULL,
            status         TEXT NOT NULL,
            amount         INTEGER NOT NULL,
            txnid          TEXT NOT NULL UNIQUE,
            productinfo    TEXT NOT NULL DEFAULT '',
            gateway_txn_id TEXT,
            payment_mode   TEXT,
            bank_reference TEXT,
            raw_response   TEXT,
            created_at     DATETIME NOT NULL,
            updated_at     DATETIME NOT NULL,
            UNIQUE (order_id, txnid)
        );
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cart_items (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_id TEXT NOT NULL,
            product_id  TEXT NOT NULL,
            quantity    INTEGER NOT NULL DEFAULT 1,
            UNIQUE (customer_id, product_id)
        );
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}
