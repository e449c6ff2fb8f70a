use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::limits;
use crate::domain::order::{Order, OrderItem, OrderItemProps};
use crate::domain::ports::OrderRepository;

#[derive(Debug, Clone)]
pub struct CreateOrderItemCommand {
    pub item_id: String,
    pub quantity: u32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub customer_id: String,
    pub order_items: Vec<CreateOrderItemCommand>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemReadDto {
    pub id: Uuid,
    pub item_id: String,
    pub quantity: u32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderReadDto {
    pub id: Uuid,
    pub customer_id: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub order_date: String,
    pub order_items: Vec<OrderItemReadDto>,
}

impl From<&Order> for OrderReadDto {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id(),
            customer_id: order.customer_id().to_string(),
            order_date: order.order_date().date_naive().format("%Y-%m-%d").to_string(),
            order_items: order
                .order_items()
                .iter()
                .map(|i| OrderItemReadDto {
                    id: i.id(),
                    item_id: i.item_id().to_string(),
                    quantity: i.quantity(),
                    unit_price: i.unit_price().clone(),
                })
                .collect(),
        }
    }
}

pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Builds a new order from the command and saves it. Returns the new
    /// order's identifier.
    pub fn create_order(&self, command: CreateOrderCommand) -> Result<Uuid, DomainError> {
        validate(&command)?;

        let order_items = command
            .order_items
            .into_iter()
            .map(|i| {
                OrderItem::create(OrderItemProps {
                    item_id: i.item_id,
                    quantity: i.quantity,
                    unit_price: i.unit_price,
                })
            })
            .collect();
        let order = Order::create(command.customer_id, order_items);

        self.repo.save(&order)?;
        log::info!(
            "order {} created with {} item(s)",
            order.id(),
            order.order_items().len()
        );
        Ok(order.id())
    }

    pub fn get_order(&self, id: Uuid) -> Result<OrderReadDto, DomainError> {
        self.repo
            .find_by_id(id)?
            .as_ref()
            .map(OrderReadDto::from)
            .ok_or(DomainError::NotFound)
    }
}

fn validate(command: &CreateOrderCommand) -> Result<(), DomainError> {
    limits::check_identifier("customer_id", &command.customer_id)?;
    if command.order_items.is_empty() {
        return Err(DomainError::InvalidInput(
            "at least one order item is required".to_string(),
        ));
    }
    for item in &command.order_items {
        limits::check_identifier("item_id", &item.item_id)?;
        limits::check_unit_price(&item.item_id, &item.unit_price)?;
    }
    Ok(())
}
