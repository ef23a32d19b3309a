use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::pagination::Pagination;

pub type OrderId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub item_id: Uuid,
    pub quantity: u64,
    pub price: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub order_id: OrderId,
    pub customer_id: Uuid,
    pub line_items: Vec<LineItem>,
    pub created_at: Option<DateTime<Utc>>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn new(
        order_id: OrderId,
        customer_id: Uuid,
        line_items: Vec<LineItem>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            order_id,
            customer_id,
            line_items,
            created_at: Some(created_at),
            shipped_at: None,
            completed_at: None,
            cancelled_at: None,
        }
    }

    /// Apply a lifecycle transition, stamping the matching timestamp with `now`.
    ///
    /// Completion requires a prior shipment; neither a completed nor a
    /// cancelled order can move again.
    pub fn set_status(&mut self, status: OrderStatus, now: DateTime<Utc>) -> Result<(), DomainError> {
        match status {
            OrderStatus::Shipped => {
                if self.shipped_at.is_some() {
                    return Err(DomainError::InvalidTransition(
                        "order is already shipped".to_string(),
                    ));
                }
                if self.cancelled_at.is_some() {
                    return Err(DomainError::InvalidTransition(
                        "order is cancelled and cannot be shipped".to_string(),
                    ));
                }
                self.shipped_at = Some(now);
            }
            OrderStatus::Completed => {
                if self.shipped_at.is_none() {
                    return Err(DomainError::InvalidTransition(
                        "order must be shipped before it can be completed".to_string(),
                    ));
                }
                if self.completed_at.is_some() {
                    return Err(DomainError::InvalidTransition(
                        "order is already completed".to_string(),
                    ));
                }
                if self.cancelled_at.is_some() {
                    return Err(DomainError::InvalidTransition(
                        "order is cancelled and cannot be completed".to_string(),
                    ));
                }
                self.completed_at = Some(now);
            }
            OrderStatus::Cancelled => {
                if self.completed_at.is_some() {
                    return Err(DomainError::InvalidTransition(
                        "order is already completed and cannot be cancelled".to_string(),
                    ));
                }
                if self.cancelled_at.is_some() {
                    return Err(DomainError::InvalidTransition(
                        "order is already cancelled".to_string(),
                    ));
                }
                self.cancelled_at = Some(now);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Shipped,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Shipped,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Shipped => "shipped",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidInput(format!("invalid status: {s:?}")))
    }
}

/// One page of orders plus the metadata describing where it sits.
#[derive(Debug, Clone)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub pagination: Pagination,
}
