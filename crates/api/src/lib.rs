//! HTTP API server for the storefront.
//!
//! Exposes the cart, checkout, order, and product surfaces over axum, with
//! structured logging (tracing) and Prometheus metrics. Identity arrives
//! pre-resolved in the `user-id` header; requests without one share the
//! anonymous cart bucket.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, patch, post, put};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use catalog::{InMemoryCatalog, ProductCatalog};
use domain::{
    CartService, CartStore, CheckoutService, InMemoryCartStore, InMemoryOrderLedger, OrderLedger,
};
use reporting::ReportingService;

/// Shared application state accessible from all handlers.
///
/// Generic over the three storage traits so a durable backend can be swapped
/// in without touching any handler.
pub struct AppState<C, S, L>
where
    C: ProductCatalog,
    S: CartStore,
    L: OrderLedger,
{
    pub cart_service: CartService<S, C>,
    pub checkout_service: CheckoutService<S, L>,
    pub reporting: ReportingService<L>,
    pub ledger: L,
    pub catalog: C,
}

/// Creates the axum application router with all routes and shared state.
pub fn create_app<C, S, L>(state: Arc<AppState<C, S, L>>, metrics_handle: PrometheusHandle) -> Router
where
    C: ProductCatalog + 'static,
    S: CartStore + 'static,
    L: OrderLedger + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/cart", get(routes::cart::get_cart::<C, S, L>))
        .route("/cart/add", post(routes::cart::add_item::<C, S, L>))
        .route("/cart/update", put(routes::cart::update_item::<C, S, L>))
        .route(
            "/cart/remove/{product_id}",
            delete(routes::cart::remove_item::<C, S, L>),
        )
        .route("/cart/clear", delete(routes::cart::clear::<C, S, L>))
        .route("/orders", post(routes::orders::create::<C, S, L>))
        .route("/orders", get(routes::orders::list::<C, S, L>))
        .route(
            "/orders/stats/overview",
            get(routes::orders::stats::<C, S, L>),
        )
        .route("/orders/{id}", get(routes::orders::get::<C, S, L>))
        .route(
            "/orders/{id}/status",
            patch(routes::orders::update_status::<C, S, L>),
        )
        .route("/products", get(routes::products::list::<C, S, L>))
        .route(
            "/products/featured",
            get(routes::products::featured::<C, S, L>),
        )
        .route(
            "/products/categories/list",
            get(routes::products::categories::<C, S, L>),
        )
        .route(
            "/products/brands/list",
            get(routes::products::brands::<C, S, L>),
        )
        .route("/products/{id}", get(routes::products::get::<C, S, L>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state over the in-memory stores, with the sample
/// product catalog seeded.
pub fn create_default_state()
-> Arc<AppState<InMemoryCatalog, InMemoryCartStore, InMemoryOrderLedger>> {
    let catalog = InMemoryCatalog::with_sample_products();
    let carts = InMemoryCartStore::new();
    let ledger = InMemoryOrderLedger::new();

    Arc::new(AppState {
        cart_service: CartService::new(carts.clone(), catalog.clone()),
        checkout_service: CheckoutService::new(carts, ledger.clone()),
        reporting: ReportingService::new(ledger.clone()),
        ledger,
        catalog,
    })
}
