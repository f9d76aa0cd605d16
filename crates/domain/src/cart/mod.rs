//! Shopping cart: one mutable cart per shopper.

mod items;
mod service;
mod store;

pub use items::{Cart, CartItem};
pub use service::CartService;
pub use store::{CartStore, InMemoryCartStore};

use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Quantity below the minimum for the operation.
    #[error("Invalid quantity: {quantity} (must be at least 1)")]
    InvalidQuantity { quantity: u32 },

    /// The catalog could not resolve the product being added.
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// The shopper has no cart.
    #[error("Cart not found")]
    CartNotFound,

    /// The product is not in the cart.
    #[error("Item not found in cart: {product_id}")]
    ItemNotFound { product_id: String },
}
