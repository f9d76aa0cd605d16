//! Catalog read endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use catalog::{Category, Product, ProductCatalog, ProductFilter, ProductSort, ProductSortBy, SortOrder};
use common::{Money, Pagination, ProductId};
use domain::{CartStore, OrderLedger};

use crate::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
pub struct ProductListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub featured: Option<bool>,
    pub min_price_cents: Option<i64>,
    pub max_price_cents: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

// -- Response types --

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub brand: String,
    pub category: String,
    pub image: String,
    pub rating: u8,
    pub stock: u32,
    pub featured: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub pagination: Pagination,
}

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

#[derive(Serialize)]
pub struct BrandsResponse {
    pub brands: Vec<String>,
}

fn product_response(product: &Product) -> ProductResponse {
    ProductResponse {
        id: product.id.to_string(),
        name: product.name.clone(),
        description: product.description.clone(),
        price_cents: product.price.cents(),
        brand: product.brand.clone(),
        category: product.category.to_string(),
        image: product.image.clone(),
        rating: product.rating,
        stock: product.stock,
        featured: product.featured,
        created_at: product.created_at.to_rfc3339(),
        updated_at: product.updated_at.to_rfc3339(),
    }
}

// -- Handlers --

/// GET /products — filtered, sorted, paginated product listing.
#[tracing::instrument(skip(state, query))]
pub async fn list<C, S, L>(
    State(state): State<Arc<AppState<C, S, L>>>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductListResponse>, ApiError>
where
    C: ProductCatalog + 'static,
    S: CartStore + 'static,
    L: OrderLedger + 'static,
{
    let filter = ProductFilter {
        category: query
            .category
            .as_deref()
            .map(Category::parse)
            .transpose()?,
        brand: query.brand,
        featured: query.featured,
        min_price: query.min_price_cents.map(Money::from_cents),
        max_price: query.max_price_cents.map(Money::from_cents),
    };
    let sort = ProductSort {
        by: query
            .sort_by
            .as_deref()
            .map(ProductSortBy::parse)
            .transpose()?
            .unwrap_or(ProductSortBy::Name),
        order: query
            .sort_order
            .as_deref()
            .map(SortOrder::parse)
            .transpose()?
            .unwrap_or(SortOrder::Asc),
    };
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    let result = state.catalog.list(&filter, sort, page, limit).await;

    Ok(Json(ProductListResponse {
        products: result.products.iter().map(product_response).collect(),
        pagination: result.pagination,
    }))
}

/// GET /products/featured — the featured subset.
#[tracing::instrument(skip(state))]
pub async fn featured<C, S, L>(
    State(state): State<Arc<AppState<C, S, L>>>,
) -> Result<Json<Vec<ProductResponse>>, ApiError>
where
    C: ProductCatalog + 'static,
    S: CartStore + 'static,
    L: OrderLedger + 'static,
{
    let products = state.catalog.featured().await;
    Ok(Json(products.iter().map(product_response).collect()))
}

/// GET /products/{id} — a single product.
#[tracing::instrument(skip(state))]
pub async fn get<C, S, L>(
    State(state): State<Arc<AppState<C, S, L>>>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError>
where
    C: ProductCatalog + 'static,
    S: CartStore + 'static,
    L: OrderLedger + 'static,
{
    let product = state.catalog.resolve(&ProductId::new(id)).await?;
    Ok(Json(product_response(&product)))
}

/// GET /products/categories/list — distinct categories in the catalog.
#[tracing::instrument(skip(state))]
pub async fn categories<C, S, L>(
    State(state): State<Arc<AppState<C, S, L>>>,
) -> Result<Json<CategoriesResponse>, ApiError>
where
    C: ProductCatalog + 'static,
    S: CartStore + 'static,
    L: OrderLedger + 'static,
{
    let categories = state
        .catalog
        .categories()
        .await
        .into_iter()
        .map(|c| c.to_string())
        .collect();
    Ok(Json(CategoriesResponse { categories }))
}

/// GET /products/brands/list — distinct brands in the catalog.
#[tracing::instrument(skip(state))]
pub async fn brands<C, S, L>(
    State(state): State<Arc<AppState<C, S, L>>>,
) -> Result<Json<BrandsResponse>, ApiError>
where
    C: ProductCatalog + 'static,
    S: CartStore + 'static,
    L: OrderLedger + 'static,
{
    let brands = state.catalog.brands().await;
    Ok(Json(BrandsResponse { brands }))
}
