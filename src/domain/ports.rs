use uuid::Uuid;

use super::errors::DomainError;
use super::order::Order;

/// Persistence gateway for the order aggregate.
///
/// `save` is an upsert of the whole aggregate: the header and every item are
/// written in one transaction, or nothing is.
pub trait OrderRepository: Send + Sync + 'static {
    fn save(&self, order: &Order) -> Result<(), DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;
}

impl<R: OrderRepository + ?Sized> OrderRepository for Box<R> {
    fn save(&self, order: &Order) -> Result<(), DomainError> {
        (**self).save(order)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        (**self).find_by_id(id)
    }
}
