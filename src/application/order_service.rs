use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{LineItem, Order, OrderId, OrderPage, OrderStatus};
use crate::domain::pagination::PageRequest;
use crate::domain::ports::OrderRepository;

pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an order under a fresh random id. An id collision surfaces as
    /// `AlreadyExists`; it is not retried.
    pub fn create_order(
        &self,
        customer_id: Uuid,
        line_items: Vec<LineItem>,
    ) -> Result<Order, DomainError> {
        let order = Order::new(rand::random(), customer_id, line_items, Utc::now());
        self.repo.insert(&order)?;
        Ok(order)
    }

    pub fn get_order(&self, id: OrderId) -> Result<Order, DomainError> {
        Ok(self.repo.find_by_id(id)?)
    }

    pub fn list_orders(&self, page: PageRequest) -> Result<OrderPage, DomainError> {
        Ok(self.repo.find_all(page)?)
    }

    pub fn update_line_items(
        &self,
        id: OrderId,
        line_items: Vec<LineItem>,
    ) -> Result<Order, DomainError> {
        let mut order = self.repo.find_by_id(id)?;
        order.line_items = line_items;
        self.repo.update(id, &order)?;
        Ok(order)
    }

    pub fn change_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, DomainError> {
        let mut order = self.repo.find_by_id(id)?;
        order.set_status(status, Utc::now())?;
        self.repo.update(id, &order)?;
        Ok(order)
    }

    pub fn delete_order(&self, id: OrderId) -> Result<(), DomainError> {
        Ok(self.repo.delete(id)?)
    }
}
