//! Read-side product queries: filtering, sorting, pagination.

use async_trait::async_trait;

use common::{Money, Pagination};

use crate::lookup::{CatalogError, CatalogLookup};
use crate::product::{Category, Product};

/// Filter criteria for a product listing. Empty criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub brand: Option<String>,
    pub featured: Option<bool>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
}

impl ProductFilter {
    /// Returns true if the product satisfies every set criterion.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category
            && product.category != category
        {
            return false;
        }
        if let Some(ref brand) = self.brand
            && &product.brand != brand
        {
            return false;
        }
        if let Some(featured) = self.featured
            && product.featured != featured
        {
            return false;
        }
        if let Some(min) = self.min_price
            && product.price < min
        {
            return false;
        }
        if let Some(max) = self.max_price
            && product.price > max
        {
            return false;
        }
        true
    }
}

/// Field a product listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortBy {
    Name,
    Price,
    Rating,
    CreatedAt,
}

impl ProductSortBy {
    /// Parses a wire sort-field name.
    pub fn parse(value: &str) -> Result<Self, CatalogError> {
        match value {
            "name" => Ok(ProductSortBy::Name),
            "price" => Ok(ProductSortBy::Price),
            "rating" => Ok(ProductSortBy::Rating),
            "created_at" => Ok(ProductSortBy::CreatedAt),
            other => Err(CatalogError::InvalidSortField {
                value: other.to_string(),
            }),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parses a wire sort-order name.
    pub fn parse(value: &str) -> Result<Self, CatalogError> {
        match value {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(CatalogError::InvalidSortOrder {
                value: other.to_string(),
            }),
        }
    }
}

/// Sort specification for a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductSort {
    pub by: ProductSortBy,
    pub order: SortOrder,
}

impl Default for ProductSort {
    /// Name ascending, the listing default.
    fn default() -> Self {
        Self {
            by: ProductSortBy::Name,
            order: SortOrder::Asc,
        }
    }
}

impl ProductSort {
    /// Orders two products according to this specification.
    ///
    /// Name comparison is case-insensitive.
    pub fn compare(&self, a: &Product, b: &Product) -> std::cmp::Ordering {
        let ordering = match self.by {
            ProductSortBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            ProductSortBy::Price => a.price.cmp(&b.price),
            ProductSortBy::Rating => a.rating.cmp(&b.rating),
            ProductSortBy::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// A page of products plus pagination metadata.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

/// Full catalog read surface, as exposed to the HTTP layer.
///
/// Catalog writes stay with the external owner; only reads are modeled here.
#[async_trait]
pub trait ProductCatalog: CatalogLookup {
    /// Lists products matching `filter`, sorted, one page at a time.
    ///
    /// Pages past the end of the result set are empty, not an error.
    async fn list(
        &self,
        filter: &ProductFilter,
        sort: ProductSort,
        page: u32,
        page_size: u32,
    ) -> ProductPage;

    /// Lists featured products.
    async fn featured(&self) -> Vec<Product>;

    /// Distinct categories currently present in the catalog.
    async fn categories(&self) -> Vec<Category>;

    /// Distinct brands currently present in the catalog.
    async fn brands(&self) -> Vec<String>;
}
