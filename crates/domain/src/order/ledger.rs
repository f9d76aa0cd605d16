//! Append-only order ledger and the in-memory implementation.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use common::{CustomerId, Money, OrderId};

use super::{OrderError, OrderItem, OrderStatus, PaymentMethod, ShippingAddress};

/// An immutable order snapshot.
///
/// Everything except `status` and `updated_at` is fixed at creation. The
/// total is the sum of line totals at checkout time and is never recomputed
/// from live catalog prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer: Option<CustomerId>,
    items: Vec<OrderItem>,
    total: Money,
    status: OrderStatus,
    shipping_address: ShippingAddress,
    payment_method: PaymentMethod,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    fn create(id: OrderId, draft: NewOrder, now: DateTime<Utc>) -> Self {
        let total = draft.items.iter().map(OrderItem::line_total).sum();
        Self {
            id,
            customer: draft.customer,
            items: draft.items,
            total,
            status: OrderStatus::Pending,
            shipping_address: draft.shipping_address,
            payment_method: draft.payment_method,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the order number.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the owning customer, `None` for anonymous checkout.
    pub fn customer(&self) -> Option<CustomerId> {
        self.customer
    }

    /// Returns the order lines.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the total as snapshotted at creation.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the shipping address.
    pub fn shipping_address(&self) -> &ShippingAddress {
        &self.shipping_address
    }

    /// Returns the chosen payment method.
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Returns when the order was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the status last changed.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub(crate) fn set_status(&mut self, status: OrderStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }
}

/// The parts of an order the checkout coordinator supplies.
///
/// The ledger fills in the order number, status, and timestamps.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer: Option<CustomerId>,
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
}

/// Append-only collection of order snapshots.
///
/// Orders are never deleted; only the status (and with it `updated_at`) of
/// an existing order may change. Order numbers are assigned inside
/// [`OrderLedger::append`] so that number assignment and the append are one
/// atomic step, globally serialized across all shoppers.
#[async_trait]
pub trait OrderLedger: Send + Sync {
    /// Appends a new order, assigning the next order number and stamping
    /// status `pending` with `created_at = updated_at = now`.
    async fn append(&self, draft: NewOrder) -> Result<Order, OrderError>;

    /// Looks up an order by number.
    async fn find(&self, order_id: OrderId) -> Result<Order, OrderError>;

    /// Overwrites the status of an order and refreshes `updated_at`.
    ///
    /// Any of the five statuses is accepted regardless of the current one.
    async fn update_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrderError>;

    /// Returns a snapshot of every order, in append order.
    async fn all(&self) -> Vec<Order>;
}

/// In-memory order ledger.
///
/// Clones share the same underlying ledger and number counter.
#[derive(Clone)]
pub struct InMemoryOrderLedger {
    orders: Arc<RwLock<Vec<Order>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryOrderLedger {
    /// Creates an empty ledger; the first order gets number 1.
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for InMemoryOrderLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderLedger for InMemoryOrderLedger {
    async fn append(&self, draft: NewOrder) -> Result<Order, OrderError> {
        let id = OrderId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let order = Order::create(id, draft, Utc::now());
        self.orders.write().await.push(order.clone());
        Ok(order)
    }

    async fn find(&self, order_id: OrderId) -> Result<Order, OrderError> {
        self.orders
            .read()
            .await
            .iter()
            .find(|order| order.id == order_id)
            .cloned()
            .ok_or(OrderError::OrderNotFound { order_id })
    }

    async fn update_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|order| order.id == order_id)
            .ok_or(OrderError::OrderNotFound { order_id })?;
        order.set_status(status, Utc::now());
        Ok(order.clone())
    }

    async fn all(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(cents_each: i64, quantity: u32) -> NewOrder {
        NewOrder {
            customer: Some(CustomerId::new()),
            items: vec![OrderItem {
                product_id: "PRF-001".into(),
                name: "Widget".to_string(),
                unit_price: Money::from_cents(cents_each),
                quantity,
                image: "https://example.com/widget.jpg".to_string(),
            }],
            shipping_address: ShippingAddress {
                street: "123 Main St".to_string(),
                city: "New York".to_string(),
                state: "NY".to_string(),
                zip_code: "10001".to_string(),
                country: "USA".to_string(),
            },
            payment_method: PaymentMethod::CreditCard,
        }
    }

    #[tokio::test]
    async fn append_assigns_increasing_numbers_starting_at_one() {
        let ledger = InMemoryOrderLedger::new();

        let first = ledger.append(draft(1000, 1)).await.unwrap();
        let second = ledger.append(draft(1000, 1)).await.unwrap();

        assert_eq!(first.id(), OrderId::new(1));
        assert_eq!(second.id(), OrderId::new(2));
    }

    #[tokio::test]
    async fn append_stamps_pending_and_totals() {
        let ledger = InMemoryOrderLedger::new();
        let order = ledger.append(draft(1000, 3)).await.unwrap();

        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.total().cents(), 3000);
        assert_eq!(order.created_at(), order.updated_at());
    }

    #[tokio::test]
    async fn find_returns_appended_order() {
        let ledger = InMemoryOrderLedger::new();
        let order = ledger.append(draft(1000, 1)).await.unwrap();

        let found = ledger.find(order.id()).await.unwrap();
        assert_eq!(found, order);
    }

    #[tokio::test]
    async fn find_unknown_order_fails() {
        let ledger = InMemoryOrderLedger::new();
        let result = ledger.find(OrderId::new(99)).await;
        assert!(matches!(result, Err(OrderError::OrderNotFound { .. })));
    }

    #[tokio::test]
    async fn update_status_overwrites_and_refreshes_updated_at() {
        let ledger = InMemoryOrderLedger::new();
        let order = ledger.append(draft(1000, 1)).await.unwrap();

        let updated = ledger
            .update_status(order.id(), OrderStatus::Shipped)
            .await
            .unwrap();

        assert_eq!(updated.status(), OrderStatus::Shipped);
        assert!(updated.updated_at() >= updated.created_at());
        assert_eq!(updated.created_at(), order.created_at());
        assert_eq!(updated.total(), order.total());
    }

    #[tokio::test]
    async fn update_status_accepts_any_of_the_five_from_any_state() {
        let ledger = InMemoryOrderLedger::new();
        let order = ledger.append(draft(1000, 1)).await.unwrap();

        // Permissive by design: even a terminal status can be overwritten.
        ledger
            .update_status(order.id(), OrderStatus::Delivered)
            .await
            .unwrap();
        let reverted = ledger
            .update_status(order.id(), OrderStatus::Processing)
            .await
            .unwrap();

        assert_eq!(reverted.status(), OrderStatus::Processing);
    }

    #[tokio::test]
    async fn update_status_unknown_order_fails() {
        let ledger = InMemoryOrderLedger::new();
        let result = ledger
            .update_status(OrderId::new(1), OrderStatus::Shipped)
            .await;
        assert!(matches!(result, Err(OrderError::OrderNotFound { .. })));
    }

    #[tokio::test]
    async fn all_preserves_append_order() {
        let ledger = InMemoryOrderLedger::new();
        ledger.append(draft(1000, 1)).await.unwrap();
        ledger.append(draft(500, 2)).await.unwrap();

        let all = ledger.all().await;
        assert_eq!(all.len(), 2);
        assert!(all[0].id() < all[1].id());
    }

    #[tokio::test]
    async fn concurrent_appends_never_reuse_a_number() {
        let ledger = InMemoryOrderLedger::new();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let ledger = ledger.clone();
                tokio::spawn(async move { ledger.append(draft(1000, 1)).await.unwrap().id() })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }

    #[tokio::test]
    async fn order_serialization_roundtrip() {
        let ledger = InMemoryOrderLedger::new();
        let order = ledger.append(draft(1000, 2)).await.unwrap();

        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }
}
