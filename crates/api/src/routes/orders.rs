//! Checkout, order lookup, status updates, listing, and statistics.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};

use catalog::ProductCatalog;
use common::{OrderId, Pagination};
use domain::{CartStore, Order, OrderLedger, OrderStatus, PaymentMethod, ShippingAddress};
use reporting::OrderFilter;

use crate::AppState;
use crate::error::ApiError;

use super::{caller_customer, shopper_id};

// -- Request types --

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct OrderListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<String>,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: u64,
    pub customer_id: Option<String>,
    pub items: Vec<OrderItemResponse>,
    pub total_cents: i64,
    pub status: String,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub product_id: String,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: u32,
    pub line_total_cents: i64,
    pub image: String,
}

#[derive(Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderResponse>,
    pub pagination: Pagination,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub total_orders: u64,
    pub total_revenue_cents: i64,
    pub pending_orders: u64,
    pub delivered_orders: u64,
    pub average_order_value_cents: i64,
}

fn order_response(order: &Order) -> OrderResponse {
    OrderResponse {
        id: order.id().as_u64(),
        customer_id: order.customer().map(|c| c.to_string()),
        items: order
            .items()
            .iter()
            .map(|item| OrderItemResponse {
                product_id: item.product_id.to_string(),
                name: item.name.clone(),
                unit_price_cents: item.unit_price.cents(),
                quantity: item.quantity,
                line_total_cents: item.line_total().cents(),
                image: item.image.clone(),
            })
            .collect(),
        total_cents: order.total().cents(),
        status: order.status().to_string(),
        shipping_address: order.shipping_address().clone(),
        payment_method: order.payment_method().to_string(),
        created_at: order.created_at().to_rfc3339(),
        updated_at: order.updated_at().to_rfc3339(),
    }
}

// -- Handlers --

/// POST /orders — convert the caller's cart into an order.
#[tracing::instrument(skip(state, headers, req))]
pub async fn create<C, S, L>(
    State(state): State<Arc<AppState<C, S, L>>>,
    headers: HeaderMap,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError>
where
    C: ProductCatalog + 'static,
    S: CartStore + 'static,
    L: OrderLedger + 'static,
{
    let shopper = shopper_id(&headers)?;
    let payment_method = PaymentMethod::parse(&req.payment_method)?;

    let order = state
        .checkout_service
        .checkout(shopper, req.shipping_address, payment_method)
        .await?;

    Ok((StatusCode::CREATED, Json(order_response(&order))))
}

/// GET /orders/{id} — look up a single order.
#[tracing::instrument(skip(state))]
pub async fn get<C, S, L>(
    State(state): State<Arc<AppState<C, S, L>>>,
    Path(id): Path<u64>,
) -> Result<Json<OrderResponse>, ApiError>
where
    C: ProductCatalog + 'static,
    S: CartStore + 'static,
    L: OrderLedger + 'static,
{
    let order = state.ledger.find(OrderId::new(id)).await?;
    Ok(Json(order_response(&order)))
}

/// GET /orders — list orders, newest first.
///
/// A caller identified by the `user-id` header sees only their own orders;
/// an unidentified caller sees everything.
#[tracing::instrument(skip(state, headers, query))]
pub async fn list<C, S, L>(
    State(state): State<Arc<AppState<C, S, L>>>,
    headers: HeaderMap,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<OrderListResponse>, ApiError>
where
    C: ProductCatalog + 'static,
    S: CartStore + 'static,
    L: OrderLedger + 'static,
{
    let filter = OrderFilter {
        customer: caller_customer(&headers)?,
        status: query
            .status
            .as_deref()
            .map(OrderStatus::parse)
            .transpose()?,
    };
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    let result = state.reporting.list(&filter, page, limit).await?;

    Ok(Json(OrderListResponse {
        orders: result.orders.iter().map(order_response).collect(),
        pagination: result.pagination,
    }))
}

/// PATCH /orders/{id}/status — overwrite an order's status.
#[tracing::instrument(skip(state, req))]
pub async fn update_status<C, S, L>(
    State(state): State<Arc<AppState<C, S, L>>>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<OrderResponse>, ApiError>
where
    C: ProductCatalog + 'static,
    S: CartStore + 'static,
    L: OrderLedger + 'static,
{
    let status = OrderStatus::parse(&req.status)?;
    let order = state.ledger.update_status(OrderId::new(id), status).await?;

    metrics::counter!("order_status_updates_total").increment(1);

    Ok(Json(order_response(&order)))
}

/// GET /orders/stats/overview — aggregate order statistics.
#[tracing::instrument(skip(state))]
pub async fn stats<C, S, L>(
    State(state): State<Arc<AppState<C, S, L>>>,
) -> Result<Json<StatsResponse>, ApiError>
where
    C: ProductCatalog + 'static,
    S: CartStore + 'static,
    L: OrderLedger + 'static,
{
    let stats = state.reporting.stats_overview().await;
    Ok(Json(StatsResponse {
        total_orders: stats.total_orders,
        total_revenue_cents: stats.total_revenue.cents(),
        pending_orders: stats.pending_orders,
        delivered_orders: stats.delivered_orders,
        average_order_value_cents: stats.average_order_value.cents(),
    }))
}
