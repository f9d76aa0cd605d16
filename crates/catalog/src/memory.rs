use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{Money, Pagination, ProductId};

use crate::lookup::{CatalogError, CatalogLookup};
use crate::product::{Category, Product};
use crate::query::{ProductCatalog, ProductFilter, ProductPage, ProductSort};

/// In-memory catalog implementation.
///
/// Holds products in insertion order behind a read/write lock. Clones share
/// the same underlying catalog.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog seeded with the sample storefront products.
    pub fn with_sample_products() -> Self {
        Self {
            products: Arc::new(RwLock::new(sample_products())),
        }
    }

    /// Adds a product. Seeding/test support; catalog writes are otherwise
    /// owned externally.
    pub async fn insert(&self, product: Product) {
        self.products.write().await.push(product);
    }

    /// Reprices a product in place.
    pub async fn set_price(
        &self,
        product_id: &ProductId,
        price: Money,
    ) -> Result<(), CatalogError> {
        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| &p.id == product_id)
            .ok_or_else(|| CatalogError::ProductNotFound {
                product_id: product_id.to_string(),
            })?;
        product.price = price;
        product.updated_at = chrono::Utc::now();
        Ok(())
    }
}

#[async_trait]
impl CatalogLookup for InMemoryCatalog {
    async fn resolve(&self, product_id: &ProductId) -> Result<Product, CatalogError> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| &p.id == product_id)
            .cloned()
            .ok_or_else(|| CatalogError::ProductNotFound {
                product_id: product_id.to_string(),
            })
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn list(
        &self,
        filter: &ProductFilter,
        sort: ProductSort,
        page: u32,
        page_size: u32,
    ) -> ProductPage {
        let page = page.max(1);
        let page_size = page_size.max(1);

        let mut matching: Vec<Product> = self
            .products
            .read()
            .await
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| sort.compare(a, b));

        let pagination = Pagination::new(page, page_size, matching.len());
        let products = matching
            .into_iter()
            .skip(pagination.offset())
            .take(page_size as usize)
            .collect();

        ProductPage {
            products,
            pagination,
        }
    }

    async fn featured(&self) -> Vec<Product> {
        self.products
            .read()
            .await
            .iter()
            .filter(|p| p.featured)
            .cloned()
            .collect()
    }

    async fn categories(&self) -> Vec<Category> {
        let products = self.products.read().await;
        let mut categories = Vec::new();
        for product in products.iter() {
            if !categories.contains(&product.category) {
                categories.push(product.category);
            }
        }
        categories
    }

    async fn brands(&self) -> Vec<String> {
        let products = self.products.read().await;
        let mut brands: Vec<String> = Vec::new();
        for product in products.iter() {
            if !brands.contains(&product.brand) {
                brands.push(product.brand.clone());
            }
        }
        brands
    }
}

fn sample_products() -> Vec<Product> {
    vec![
        Product::new(
            "PRF-001",
            "Chanel N°5",
            "The iconic fragrance that defines luxury and elegance",
            Money::from_cents(29900),
            "Chanel",
            Category::Women,
            "https://images.example.com/prf-001.jpg",
            50,
        )
        .rated(5)
        .featured(),
        Product::new(
            "PRF-002",
            "Dior Sauvage",
            "Fresh and powerful masculine fragrance",
            Money::from_cents(18900),
            "Dior",
            Category::Men,
            "https://images.example.com/prf-002.jpg",
            75,
        )
        .rated(4)
        .featured(),
        Product::new(
            "PRF-003",
            "Black Opium",
            "Addictive gourmand fragrance with coffee notes",
            Money::from_cents(24500),
            "Yves Saint Laurent",
            Category::Women,
            "https://images.example.com/prf-003.jpg",
            30,
        )
        .rated(5)
        .featured(),
        Product::new(
            "PRF-004",
            "Tobacco Vanille",
            "Warm and sophisticated oriental fragrance",
            Money::from_cents(38500),
            "Tom Ford",
            Category::Unisex,
            "https://images.example.com/prf-004.jpg",
            25,
        )
        .rated(5)
        .featured(),
        Product::new(
            "PRF-005",
            "Wood Sage & Sea Salt",
            "Fresh mineral fragrance inspired by the British coast",
            Money::from_cents(16500),
            "Jo Malone",
            Category::Unisex,
            "https://images.example.com/prf-005.jpg",
            60,
        )
        .rated(4),
        Product::new(
            "PRF-006",
            "Gypsy Water",
            "Bohemian spirit with bergamot and vanilla",
            Money::from_cents(27500),
            "Byredo",
            Category::Unisex,
            "https://images.example.com/prf-006.jpg",
            40,
        )
        .rated(4),
        Product::new(
            "PRF-007",
            "Replica Jazz Club",
            "Smooth and sophisticated jazz-inspired scent",
            Money::from_cents(13500),
            "Maison Margiela",
            Category::Men,
            "https://images.example.com/prf-007.jpg",
            55,
        )
        .rated(4),
        Product::new(
            "PRF-008",
            "Santal 33",
            "Iconic sandalwood fragrance with leather notes",
            Money::from_cents(29500),
            "Le Labo",
            Category::Unisex,
            "https://images.example.com/prf-008.jpg",
            35,
        )
        .rated(5),
    ]
}
