//! Cart contents and mutation semantics.

use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

use super::CartError;

/// A line in a shopping cart.
///
/// `unit_price`, `name`, and `image` are snapshotted from the catalog when
/// the item is first added; later catalog changes do not affect the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product this line refers to.
    pub product_id: ProductId,

    /// Product name at add time.
    pub name: String,

    /// Price per unit at add time.
    pub unit_price: Money,

    /// Units in the cart, always at least 1.
    pub quantity: u32,

    /// Product image URL at add time.
    pub image: String,
}

impl CartItem {
    /// Creates a new cart line.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money,
        quantity: u32,
        image: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            quantity,
            image: image.into(),
        }
    }

    /// Returns unit price times quantity for this line.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// A shopper's cart: an ordered sequence of lines, unique by product.
///
/// The total is always derived from the current lines; it is never stored as
/// an independent source of truth. A quantity of zero cannot exist in a
/// cart, the line is removed instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Returns the lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of distinct products in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the line for a product, if present.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.product_id == product_id)
    }

    /// Sum of line totals over the current lines.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Adds a line, merging by product.
    ///
    /// If the product is already in the cart its quantity is incremented by
    /// the new line's quantity; the originally snapshotted price is kept.
    /// Otherwise the line is appended.
    pub fn merge_item(&mut self, item: CartItem) {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.product_id == item.product_id)
        {
            Some(existing) => existing.quantity += item.quantity,
            None => self.items.push(item),
        }
    }

    /// Replaces the quantity of an existing line.
    ///
    /// A quantity of zero removes the line entirely.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), CartError> {
        let index = self
            .items
            .iter()
            .position(|item| &item.product_id == product_id)
            .ok_or_else(|| CartError::ItemNotFound {
                product_id: product_id.to_string(),
            })?;

        if quantity == 0 {
            self.items.remove(index);
        } else {
            self.items[index].quantity = quantity;
        }
        Ok(())
    }

    /// Removes the line for a product.
    pub fn remove(&mut self, product_id: &ProductId) -> Result<(), CartError> {
        let index = self
            .items
            .iter()
            .position(|item| &item.product_id == product_id)
            .ok_or_else(|| CartError::ItemNotFound {
                product_id: product_id.to_string(),
            })?;
        self.items.remove(index);
        Ok(())
    }
}
