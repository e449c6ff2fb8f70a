//! `HashMap`-backed repository with the same upsert and minimum-item rules
//! as the Postgres one. Used to exercise the service and HTTP layers without a
//! database.

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::limits;
use crate::domain::order::{Order, OrderProps};
use crate::domain::ports::OrderRepository;

#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<HashMap<Uuid, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, DomainError> {
        self.orders
            .lock()
            .map(|orders| orders.len())
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    pub fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len()? == 0)
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn save(&self, order: &Order) -> Result<(), DomainError> {
        if order.order_items().is_empty() {
            return Err(DomainError::InvalidInput(
                "an order must contain at least one item".to_string(),
            ));
        }
        limits::check_order(order)?;
        let mut orders = self
            .orders
            .lock()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        // Items already stored but absent from this save are kept, as with
        // the write tables.
        let merged = match orders.get(&order.id()) {
            Some(existing) => {
                let mut items = order.order_items().to_vec();
                for stored in existing.order_items() {
                    if !items.iter().any(|i| i.id() == stored.id()) {
                        items.push(stored.clone());
                    }
                }
                Order::restore(
                    order.id(),
                    OrderProps {
                        customer_id: order.customer_id().to_string(),
                        order_date: order.order_date(),
                        order_items: items,
                    },
                )
            }
            None => order.clone(),
        };
        orders.insert(order.id(), merged);
        Ok(())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let orders = self
            .orders
            .lock()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(orders.get(&id).cloned())
    }
}
