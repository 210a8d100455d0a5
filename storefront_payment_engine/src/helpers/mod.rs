pub mod gateway_hash;
mod ids;

pub use gateway_hash::{request_hash, response_hash, verify_response_hash, HashFields};
pub use ids::{new_order_id, new_txn_id};
