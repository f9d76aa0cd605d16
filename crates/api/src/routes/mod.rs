//! Route handlers.

pub mod cart;
pub mod health;
pub mod metrics;
pub mod orders;
pub mod products;

use axum::http::HeaderMap;
use uuid::Uuid;

use common::{CustomerId, ShopperId};

use crate::error::ApiError;

/// Resolves the caller's customer ID from the `user-id` header.
///
/// Absent header means an unidentified caller; a present but malformed
/// value is a client error.
pub(crate) fn caller_customer(headers: &HeaderMap) -> Result<Option<CustomerId>, ApiError> {
    let Some(value) = headers.get("user-id") else {
        return Ok(None);
    };
    let raw = value
        .to_str()
        .map_err(|_| ApiError::BadRequest("Invalid user-id header".to_string()))?;
    let uuid = Uuid::parse_str(raw)
        .map_err(|e| ApiError::BadRequest(format!("Invalid user-id header: {e}")))?;
    Ok(Some(CustomerId::from_uuid(uuid)))
}

/// Resolves the cart bucket for the caller: their customer ID, or the
/// shared anonymous bucket when no identity was supplied.
pub(crate) fn shopper_id(headers: &HeaderMap) -> Result<ShopperId, ApiError> {
    Ok(match caller_customer(headers)? {
        Some(customer) => ShopperId::Customer(customer),
        None => ShopperId::Anonymous,
    })
}
