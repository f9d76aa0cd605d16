//! Cart storage abstraction and the in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{ProductId, ShopperId};

use super::{Cart, CartError, CartItem};

/// Holds exactly one mutable cart per shopper.
///
/// Every mutation returns the full resulting cart so callers can render it
/// without a follow-up read. Reading a missing cart observes an empty cart
/// without materializing one; two consecutive reads with no intervening
/// write return equal contents.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Returns the shopper's cart, empty if none exists yet.
    async fn get(&self, shopper: ShopperId) -> Cart;

    /// Adds a line to the shopper's cart, merging by product.
    async fn add_item(&self, shopper: ShopperId, item: CartItem) -> Result<Cart, CartError>;

    /// Replaces the quantity of an existing line; zero removes it.
    ///
    /// Fails with [`CartError::CartNotFound`] if the shopper has no cart and
    /// [`CartError::ItemNotFound`] if the product is not in it.
    async fn update_item(
        &self,
        shopper: ShopperId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Cart, CartError>;

    /// Removes the line for a product; same not-found failures as
    /// [`CartStore::update_item`].
    async fn remove_item(
        &self,
        shopper: ShopperId,
        product_id: &ProductId,
    ) -> Result<Cart, CartError>;

    /// Resets the shopper's cart to empty. Idempotent, never fails.
    async fn clear(&self, shopper: ShopperId) -> Cart;
}

/// In-memory cart store.
///
/// Clones share the same underlying map, so one instance can back several
/// services.
#[derive(Clone, Default)]
pub struct InMemoryCartStore {
    carts: Arc<RwLock<HashMap<ShopperId, Cart>>>,
}

impl InMemoryCartStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn get(&self, shopper: ShopperId) -> Cart {
        self.carts
            .read()
            .await
            .get(&shopper)
            .cloned()
            .unwrap_or_default()
    }

    async fn add_item(&self, shopper: ShopperId, item: CartItem) -> Result<Cart, CartError> {
        let mut carts = self.carts.write().await;
        let cart = carts.entry(shopper).or_default();
        cart.merge_item(item);
        Ok(cart.clone())
    }

    async fn update_item(
        &self,
        shopper: ShopperId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        let mut carts = self.carts.write().await;
        let cart = carts.get_mut(&shopper).ok_or(CartError::CartNotFound)?;
        cart.set_quantity(product_id, quantity)?;
        Ok(cart.clone())
    }

    async fn remove_item(
        &self,
        shopper: ShopperId,
        product_id: &ProductId,
    ) -> Result<Cart, CartError> {
        let mut carts = self.carts.write().await;
        let cart = carts.get_mut(&shopper).ok_or(CartError::CartNotFound)?;
        cart.remove(product_id)?;
        Ok(cart.clone())
    }

    async fn clear(&self, shopper: ShopperId) -> Cart {
        let mut carts = self.carts.write().await;
        carts.insert(shopper, Cart::default());
        Cart::default()
    }
}
