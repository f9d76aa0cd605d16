//! Reporting service over the order ledger.

use common::{Money, Pagination};
use domain::{OrderLedger, OrderStatus};

use crate::query::{OrderFilter, OrderPage, ReportError, StatsOverview};

/// Read-only queries over an [`OrderLedger`].
pub struct ReportingService<L: OrderLedger> {
    ledger: L,
}

impl<L: OrderLedger> ReportingService<L> {
    /// Creates a reporting service over the given ledger.
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    /// Lists orders matching `filter`, newest first, one page at a time.
    ///
    /// Both `page` and `page_size` must be at least 1. Pages past the end of
    /// the result set return an empty slice with intact metadata, not an
    /// error.
    #[tracing::instrument(skip(self, filter))]
    pub async fn list(
        &self,
        filter: &OrderFilter,
        page: u32,
        page_size: u32,
    ) -> Result<OrderPage, ReportError> {
        if page < 1 || page_size < 1 {
            return Err(ReportError::InvalidPagination { page, page_size });
        }

        let mut matching: Vec<_> = self
            .ledger
            .all()
            .await
            .into_iter()
            .filter(|order| filter.matches(order))
            .collect();
        // Newest first; order numbers break ties between equal timestamps.
        matching.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then(b.id().cmp(&a.id()))
        });

        let pagination = Pagination::new(page, page_size, matching.len());
        let orders = matching
            .into_iter()
            .skip(pagination.offset())
            .take(page_size as usize)
            .collect();

        Ok(OrderPage { orders, pagination })
    }

    /// Aggregate statistics over every order in the ledger.
    ///
    /// Revenue sums totals regardless of status; the average is zero, not a
    /// division fault, when the ledger is empty.
    #[tracing::instrument(skip(self))]
    pub async fn stats_overview(&self) -> StatsOverview {
        let orders = self.ledger.all().await;

        let total_orders = orders.len() as u64;
        let total_revenue: Money = orders.iter().map(|order| order.total()).sum();
        let pending_orders = orders
            .iter()
            .filter(|order| order.status() == OrderStatus::Pending)
            .count() as u64;
        let delivered_orders = orders
            .iter()
            .filter(|order| order.status() == OrderStatus::Delivered)
            .count() as u64;
        let average_order_value = if total_orders > 0 {
            Money::from_cents(total_revenue.cents() / total_orders as i64)
        } else {
            Money::zero()
        };

        StatsOverview {
            total_orders,
            total_revenue,
            pending_orders,
            delivered_orders,
            average_order_value,
        }
    }
}
