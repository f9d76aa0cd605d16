//! Catalog lookup interface consumed by the cart core.

use async_trait::async_trait;
use thiserror::Error;

use common::ProductId;

use crate::product::Product;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product exists with the given ID.
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// Unrecognized category name.
    #[error("Invalid category: {value}")]
    InvalidCategory { value: String },

    /// Unrecognized sort field.
    #[error("Invalid sort field: {value}")]
    InvalidSortField { value: String },

    /// Unrecognized sort order.
    #[error("Invalid sort order: {value} (expected \"asc\" or \"desc\")")]
    InvalidSortOrder { value: String },
}

/// Resolves product identifiers to current product details.
///
/// This is the only catalog interface the cart core depends on.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Resolves a product by ID, or fails with
    /// [`CatalogError::ProductNotFound`].
    async fn resolve(&self, product_id: &ProductId) -> Result<Product, CatalogError>;
}
