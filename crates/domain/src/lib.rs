//! Cart and order core for the storefront.
//!
//! This crate owns the state the rest of the system mutates:
//! - One mutable cart per shopper with merge/update/remove semantics and a
//!   derived total ([`cart`])
//! - The append-only order ledger of immutable checkout snapshots with a
//!   five-state status lifecycle ([`order`])
//! - The checkout coordinator that turns a cart into an order and resets the
//!   cart ([`order::checkout`])
//!
//! Storage is abstracted behind the [`CartStore`] and [`OrderLedger`] traits;
//! the in-memory implementations here are the only ones in scope, but a
//! durable backend can be substituted without touching the core logic.

pub mod cart;
pub mod order;

pub use cart::{Cart, CartError, CartItem, CartService, CartStore, InMemoryCartStore};
pub use order::{
    CheckoutError, CheckoutService, InMemoryOrderLedger, NewOrder, Order, OrderError, OrderItem,
    OrderLedger, OrderStatus, PaymentMethod, ShippingAddress,
};
