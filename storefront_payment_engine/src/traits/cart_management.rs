use crate::{
    db_types::CartItem,
    traits::StorefrontApiError,
};

/// Repository interface for the per-shopper cart.
#[allow(async_fn_in_trait)]
pub trait CartManagement {
    /// Adds a line to the cart, replacing the quantity if the product is already present.
    async fn upsert_cart_item(&self, customer_id: &str, item: CartItem) -> Result<(), StorefrontApiError>;

    async fn fetch_cart_items(&self, customer_id: &str) -> Result<Vec<CartItem>, StorefrontApiError>;

    /// Removes every cart line whose product id appears in `product_ids`, ignoring quantities (a
    /// partial-quantity purchase removes the whole line). Removing products that are not in the cart is a
    /// no-op, which makes the call idempotent. Returns the number of lines removed.
    async fn remove_cart_items(&self, customer_id: &str, product_ids: &[String]) -> Result<u64, StorefrontApiError>;
}
