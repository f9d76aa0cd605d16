//! Order ledger, status lifecycle, and the checkout coordinator.

mod checkout;
mod ledger;
mod status;
mod value_objects;

pub use checkout::CheckoutService;
pub use ledger::{InMemoryOrderLedger, NewOrder, Order, OrderLedger};
pub use status::OrderStatus;
pub use value_objects::{OrderItem, PaymentMethod, ShippingAddress};

use common::OrderId;
use thiserror::Error;

/// Errors that can occur during order ledger operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// No order exists with the given ID.
    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: OrderId },

    /// Unrecognized status name.
    #[error("Invalid status: {value}")]
    InvalidStatus { value: String },
}

/// Errors that can occur while converting a cart into an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A required shipping address field is missing or blank.
    #[error("Invalid shipping address: {field} is required")]
    InvalidShippingAddress { field: &'static str },

    /// Unrecognized payment method name.
    #[error("Invalid payment method: {value}")]
    InvalidPaymentMethod { value: String },

    /// The shopper's cart has no items; an order must never be empty.
    #[error("Cart is empty")]
    EmptyCart,

    /// Another checkout for the same shopper is already in flight.
    #[error("Checkout already in progress for this shopper")]
    CheckoutInProgress,

    /// The ledger rejected the append.
    #[error(transparent)]
    Ledger(#[from] OrderError),
}
