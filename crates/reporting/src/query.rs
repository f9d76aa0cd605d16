//! Query and result types for order reporting.

use serde::Serialize;
use thiserror::Error;

use common::{CustomerId, Money, Pagination};
use domain::{Order, OrderStatus};

/// Errors that can occur during reporting queries.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Page or page size below 1.
    #[error("Invalid pagination: page {page}, page size {page_size} (both must be at least 1)")]
    InvalidPagination { page: u32, page_size: u32 },
}

/// Filter criteria for an order listing. Empty criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Only orders owned by this customer.
    pub customer: Option<CustomerId>,

    /// Only orders currently in this status.
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    /// Returns true if the order satisfies every set criterion.
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(customer) = self.customer
            && order.customer() != Some(customer)
        {
            return false;
        }
        if let Some(status) = self.status
            && order.status() != status
        {
            return false;
        }
        true
    }
}

/// A page of orders plus pagination metadata.
#[derive(Debug, Clone)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub pagination: Pagination,
}

/// Aggregate statistics over the whole ledger.
///
/// Revenue counts orders in every status, cancelled included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsOverview {
    pub total_orders: u64,
    pub total_revenue: Money,
    pub pending_orders: u64,
    pub delivered_orders: u64,
    pub average_order_value: Money,
}
