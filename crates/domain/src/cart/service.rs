//! Cart service: validation and catalog price snapshotting in front of the
//! cart store.

use catalog::CatalogLookup;
use common::{ProductId, ShopperId};

use super::{Cart, CartError, CartItem, CartStore};

/// Entry point for cart operations.
///
/// Validates quantities, resolves products through the catalog, and
/// snapshots the unit price into the cart line at add time. Everything else
/// delegates to the underlying [`CartStore`].
pub struct CartService<S: CartStore, C: CatalogLookup> {
    store: S,
    catalog: C,
}

impl<S: CartStore, C: CatalogLookup> CartService<S, C> {
    /// Creates a cart service over the given store and catalog.
    pub fn new(store: S, catalog: C) -> Self {
        Self { store, catalog }
    }

    /// Returns the shopper's current cart.
    #[tracing::instrument(skip(self))]
    pub async fn get_cart(&self, shopper: ShopperId) -> Cart {
        self.store.get(shopper).await
    }

    /// Adds `quantity` units of a product to the shopper's cart.
    ///
    /// The product's name, price, and image are snapshotted from the catalog
    /// at this moment. An already-present product has its quantity
    /// incremented instead.
    #[tracing::instrument(skip(self))]
    pub async fn add_item(
        &self,
        shopper: ShopperId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity { quantity });
        }

        let product =
            self.catalog
                .resolve(&product_id)
                .await
                .map_err(|_| CartError::ProductNotFound {
                    product_id: product_id.to_string(),
                })?;

        let item = CartItem::new(
            product_id,
            product.name,
            product.price,
            quantity,
            product.image,
        );

        metrics::counter!("cart_items_added_total").increment(1);
        self.store.add_item(shopper, item).await
    }

    /// Replaces the quantity of a cart line; zero removes it.
    #[tracing::instrument(skip(self))]
    pub async fn update_item(
        &self,
        shopper: ShopperId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        self.store.update_item(shopper, product_id, quantity).await
    }

    /// Removes a line from the shopper's cart.
    #[tracing::instrument(skip(self))]
    pub async fn remove_item(
        &self,
        shopper: ShopperId,
        product_id: &ProductId,
    ) -> Result<Cart, CartError> {
        self.store.remove_item(shopper, product_id).await
    }

    /// Resets the shopper's cart to empty.
    #[tracing::instrument(skip(self))]
    pub async fn clear(&self, shopper: ShopperId) -> Cart {
        self.store.clear(shopper).await
    }
}
