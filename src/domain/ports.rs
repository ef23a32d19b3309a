use super::errors::RepositoryError;
use super::order::{Order, OrderId, OrderPage};
use super::pagination::PageRequest;

/// Storage port for orders. Implementations keep the primary records and the
/// id-ordered index in agreement after every call returns.
pub trait OrderRepository: Send + Sync + 'static {
    /// Store a new order; fails with `AlreadyExists` if its id is taken.
    fn insert(&self, order: &Order) -> Result<(), RepositoryError>;
    fn find_by_id(&self, id: OrderId) -> Result<Order, RepositoryError>;
    /// List orders in ascending id order.
    fn find_all(&self, page: PageRequest) -> Result<OrderPage, RepositoryError>;
    /// Overwrite an existing order; fails with `NotFound` if absent.
    fn update(&self, id: OrderId, order: &Order) -> Result<(), RepositoryError>;
    fn delete(&self, id: OrderId) -> Result<(), RepositoryError>;
}
