//! Cart endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use catalog::ProductCatalog;
use domain::{Cart, CartStore, OrderLedger};
use common::ProductId;

use crate::AppState;
use crate::error::ApiError;

use super::shopper_id;

// -- Request types --

#[derive(Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct UpdateItemRequest {
    pub product_id: String,
    pub quantity: u32,
}

// -- Response types --

#[derive(Serialize)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
    pub total_cents: i64,
}

#[derive(Serialize)]
pub struct CartItemResponse {
    pub product_id: String,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: u32,
    pub image: String,
}

pub(crate) fn cart_response(cart: &Cart) -> CartResponse {
    CartResponse {
        items: cart
            .items()
            .iter()
            .map(|item| CartItemResponse {
                product_id: item.product_id.to_string(),
                name: item.name.clone(),
                unit_price_cents: item.unit_price.cents(),
                quantity: item.quantity,
                image: item.image.clone(),
            })
            .collect(),
        total_cents: cart.total().cents(),
    }
}

// -- Handlers --

/// GET /cart — the caller's current cart.
#[tracing::instrument(skip(state, headers))]
pub async fn get_cart<C, S, L>(
    State(state): State<Arc<AppState<C, S, L>>>,
    headers: HeaderMap,
) -> Result<Json<CartResponse>, ApiError>
where
    C: ProductCatalog + 'static,
    S: CartStore + 'static,
    L: OrderLedger + 'static,
{
    let shopper = shopper_id(&headers)?;
    let cart = state.cart_service.get_cart(shopper).await;
    Ok(Json(cart_response(&cart)))
}

/// POST /cart/add — add units of a product to the caller's cart.
#[tracing::instrument(skip(state, headers, req))]
pub async fn add_item<C, S, L>(
    State(state): State<Arc<AppState<C, S, L>>>,
    headers: HeaderMap,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<CartResponse>, ApiError>
where
    C: ProductCatalog + 'static,
    S: CartStore + 'static,
    L: OrderLedger + 'static,
{
    let shopper = shopper_id(&headers)?;
    let cart = state
        .cart_service
        .add_item(shopper, ProductId::new(req.product_id), req.quantity)
        .await?;
    Ok(Json(cart_response(&cart)))
}

/// PUT /cart/update — replace the quantity of a cart line; zero removes it.
#[tracing::instrument(skip(state, headers, req))]
pub async fn update_item<C, S, L>(
    State(state): State<Arc<AppState<C, S, L>>>,
    headers: HeaderMap,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<CartResponse>, ApiError>
where
    C: ProductCatalog + 'static,
    S: CartStore + 'static,
    L: OrderLedger + 'static,
{
    let shopper = shopper_id(&headers)?;
    let cart = state
        .cart_service
        .update_item(shopper, &ProductId::new(req.product_id), req.quantity)
        .await?;
    Ok(Json(cart_response(&cart)))
}

/// DELETE /cart/remove/{product_id} — remove a line from the caller's cart.
#[tracing::instrument(skip(state, headers))]
pub async fn remove_item<C, S, L>(
    State(state): State<Arc<AppState<C, S, L>>>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
) -> Result<Json<CartResponse>, ApiError>
where
    C: ProductCatalog + 'static,
    S: CartStore + 'static,
    L: OrderLedger + 'static,
{
    let shopper = shopper_id(&headers)?;
    let cart = state
        .cart_service
        .remove_item(shopper, &ProductId::new(product_id))
        .await?;
    Ok(Json(cart_response(&cart)))
}

/// DELETE /cart/clear — reset the caller's cart to empty.
#[tracing::instrument(skip(state, headers))]
pub async fn clear<C, S, L>(
    State(state): State<Arc<AppState<C, S, L>>>,
    headers: HeaderMap,
) -> Result<Json<CartResponse>, ApiError>
where
    C: ProductCatalog + 'static,
    S: CartStore + 'static,
    L: OrderLedger + 'static,
{
    let shopper = shopper_id(&headers)?;
    let cart = state.cart_service.clear(shopper).await;
    Ok(Json(cart_response(&cart)))
}
