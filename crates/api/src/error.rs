//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use catalog::CatalogError;
use domain::{CartError, CheckoutError, OrderError};
use reporting::ReportError;

/// API-level error type that maps to HTTP responses.
///
/// Validation failures map to 400, missing resources to 404, the checkout
/// state conflict to 409; anything else is a 500.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Cart operation error.
    Cart(CartError),
    /// Checkout error.
    Checkout(CheckoutError),
    /// Order ledger error.
    Order(OrderError),
    /// Reporting query error.
    Report(ReportError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Cart(err) => cart_error_to_response(err),
            ApiError::Checkout(err) => checkout_error_to_response(err),
            ApiError::Order(err) => order_error_to_response(err),
            ApiError::Report(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn cart_error_to_response(err: CartError) -> (StatusCode, String) {
    match &err {
        CartError::InvalidQuantity { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        CartError::ProductNotFound { .. }
        | CartError::CartNotFound
        | CartError::ItemNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
    }
}

fn checkout_error_to_response(err: CheckoutError) -> (StatusCode, String) {
    match err {
        CheckoutError::InvalidShippingAddress { .. }
        | CheckoutError::InvalidPaymentMethod { .. }
        | CheckoutError::EmptyCart => (StatusCode::BAD_REQUEST, err.to_string()),
        CheckoutError::CheckoutInProgress => (StatusCode::CONFLICT, err.to_string()),
        CheckoutError::Ledger(inner) => order_error_to_response(inner),
    }
}

fn order_error_to_response(err: OrderError) -> (StatusCode, String) {
    match &err {
        OrderError::OrderNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        OrderError::InvalidStatus { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        ApiError::Cart(err)
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        ApiError::Checkout(err)
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        ApiError::Order(err)
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        ApiError::Report(err)
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match &err {
            CatalogError::ProductNotFound { .. } => ApiError::NotFound(err.to_string()),
            CatalogError::InvalidCategory { .. }
            | CatalogError::InvalidSortField { .. }
            | CatalogError::InvalidSortOrder { .. } => ApiError::BadRequest(err.to_string()),
        }
    }
}
