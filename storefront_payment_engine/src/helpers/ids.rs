use chrono::Utc;
use rand::{thread_rng, Rng};

use crate::db_types::OrderId;

/// Generates a fresh order id: 12 random bytes, hex-encoded.
pub fn new_order_id() -> OrderId {
    let mut bytes = [0u8; 12];
    thread_rng().fill(&mut bytes);
    OrderId(hex::encode(bytes))
}

/// Generates a per-attempt gateway transaction id.
///
/// The gateway deduplicates on this value, so it must not collide across attempts. A millisecond timestamp on
/// its own can collide under concurrent checkouts; the random suffix covers that window.
pub fn new_txn_id() -> String {
    let suffix: u16 = thread_rng().gen_range(0..10_000);
    format!("txn{}{suffix:04}", Utc::now().timestamp_millis())
}
