use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::domain::errors::RepositoryError;
use crate::domain::order::{Order, OrderId, OrderPage};
use crate::domain::pagination::{PageRequest, Pagination};
use crate::domain::ports::OrderRepository;

use super::models::{decode_order, encode_order};

/// Process-local repository for handler and service tests. Documents go
/// through the same codec as the Redis adapter.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    documents: Mutex<BTreeMap<OrderId, String>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn documents(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<OrderId, String>>, RepositoryError> {
        self.documents
            .lock()
            .map_err(|e| RepositoryError::StoreUnavailable(e.to_string()))
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn insert(&self, order: &Order) -> Result<(), RepositoryError> {
        let payload = encode_order(order)?;
        let mut docs = self.documents()?;
        if docs.contains_key(&order.order_id) {
            return Err(RepositoryError::AlreadyExists(order.order_id));
        }
        docs.insert(order.order_id, payload);
        Ok(())
    }

    fn find_by_id(&self, id: OrderId) -> Result<Order, RepositoryError> {
        let docs = self.documents()?;
        let raw = docs.get(&id).ok_or(RepositoryError::NotFound(id))?;
        decode_order(raw)
    }

    fn find_all(&self, page: PageRequest) -> Result<OrderPage, RepositoryError> {
        let docs = self.documents()?;
        let total = docs.len() as u64;
        let pagination = Pagination::new(total, page);

        let orders = match page.rank_range(total) {
            Some((start, end)) => docs
                .values()
                .skip(start as usize)
                .take((end - start + 1) as usize)
                .map(|raw| decode_order(raw))
                .collect::<Result<Vec<_>, _>>()?,
            None => vec![],
        };

        Ok(OrderPage { orders, pagination })
    }

    fn update(&self, id: OrderId, order: &Order) -> Result<(), RepositoryError> {
        let payload = encode_order(order)?;
        let mut docs = self.documents()?;
        match docs.get_mut(&id) {
            Some(slot) => {
                *slot = payload;
                Ok(())
            }
            None => Err(RepositoryError::NotFound(id)),
        }
    }

    fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        let mut docs = self.documents()?;
        docs.remove(&id).map(|_| ()).ok_or(RepositoryError::NotFound(id))
    }
}
