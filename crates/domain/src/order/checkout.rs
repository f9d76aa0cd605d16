//! Checkout coordinator: converts a cart into an order and resets the cart.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use common::ShopperId;

use crate::cart::CartStore;

use super::{CheckoutError, NewOrder, Order, OrderItem, OrderLedger, PaymentMethod, ShippingAddress};

/// The only component that reads the cart store and writes the order ledger.
///
/// The read-cart → append-order → clear-cart sequence is guarded by a
/// per-shopper critical section: a second checkout for the same shopper
/// while one is in flight fails fast with
/// [`CheckoutError::CheckoutInProgress`] rather than queueing, so no call
/// blocks indefinitely and a given cart state can produce at most one order.
/// Checkouts for different shoppers never contend.
pub struct CheckoutService<S: CartStore, L: OrderLedger> {
    carts: S,
    ledger: L,
    checkout_locks: Arc<Mutex<HashMap<ShopperId, Arc<Mutex<()>>>>>,
}

impl<S: CartStore, L: OrderLedger> CheckoutService<S, L> {
    /// Creates a coordinator over the given cart store and order ledger.
    pub fn new(carts: S, ledger: L) -> Self {
        Self {
            carts,
            ledger,
            checkout_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Converts the shopper's cart into an order.
    ///
    /// The cart lines are deep-copied into the order, so later cart
    /// mutations cannot affect it; the order's prices come from the cart
    /// snapshot, not from re-reading the catalog. The cart is cleared only
    /// after the ledger append returns, so a failed checkout leaves the
    /// cart intact and performs no observable mutation.
    #[tracing::instrument(skip(self, shipping_address))]
    pub async fn checkout(
        &self,
        shopper: ShopperId,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Result<Order, CheckoutError> {
        shipping_address.validate()?;

        let lock = {
            let mut locks = self.checkout_locks.lock().await;
            Arc::clone(locks.entry(shopper).or_default())
        };
        let _guard = lock
            .try_lock()
            .map_err(|_| CheckoutError::CheckoutInProgress)?;

        let cart = self.carts.get(shopper).await;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let items: Vec<OrderItem> = cart.items().iter().map(OrderItem::from_cart_item).collect();
        let order = self
            .ledger
            .append(NewOrder {
                customer: shopper.customer(),
                items,
                shipping_address,
                payment_method,
            })
            .await?;

        self.carts.clear(shopper).await;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(order_id = %order.id(), total = %order.total(), "order created");

        Ok(order)
    }
}
