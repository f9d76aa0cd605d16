//! Product model.

use chrono::{DateTime, Utc};
use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Men,
    Women,
    Unisex,
}

impl Category {
    /// Returns the wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Men => "men",
            Category::Women => "women",
            Category::Unisex => "unisex",
        }
    }

    /// Parses a wire category name.
    pub fn parse(value: &str) -> Result<Self, crate::CatalogError> {
        match value {
            "men" => Ok(Category::Men),
            "women" => Ok(Category::Women),
            "unisex" => Ok(Category::Unisex),
            other => Err(crate::CatalogError::InvalidCategory {
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A product in the catalog.
///
/// The cart core snapshots `name`, `price`, and `image` at add-to-cart time;
/// later catalog edits never affect existing carts or orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub brand: String,
    pub category: Category,
    pub image: String,
    /// Average rating, 0 to 5.
    pub rating: u8,
    /// Units currently available.
    pub stock: u32,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a product with a zero rating and no featured flag.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        brand: impl Into<String>,
        category: Category,
        image: impl Into<String>,
        stock: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            brand: brand.into(),
            category,
            image: image.into(),
            rating: 0,
            stock,
            featured: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the rating, for seeding.
    pub fn rated(mut self, rating: u8) -> Self {
        self.rating = rating;
        self
    }

    /// Marks the product as featured, for seeding.
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }
}
