use bigdecimal::BigDecimal;
use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemProps {
    pub item_id: String,
    pub quantity: u32,
    pub unit_price: BigDecimal,
}

/// A line of an order. Only ever created, persisted and restored together
/// with its parent [`Order`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    id: Uuid,
    props: OrderItemProps,
}

impl OrderItem {
    pub fn create(props: OrderItemProps) -> Self {
        Self {
            id: Uuid::now_v7(),
            props,
        }
    }

    pub fn restore(id: Uuid, props: OrderItemProps) -> Self {
        Self { id, props }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn item_id(&self) -> &str {
        &self.props.item_id
    }

    pub fn quantity(&self) -> u32 {
        self.props.quantity
    }

    pub fn unit_price(&self) -> &BigDecimal {
        &self.props.unit_price
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderProps {
    pub customer_id: String,
    pub order_date: DateTime<Utc>,
    pub order_items: Vec<OrderItem>,
}

/// Order aggregate: a header plus the items it owns.
///
/// Instances are immutable. A new order gets its identifier and order date in
/// [`Order::create`]; everything read back from storage goes through
/// [`Order::restore`], which keeps both as persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: Uuid,
    props: OrderProps,
}

impl Order {
    pub fn create(customer_id: impl Into<String>, order_items: Vec<OrderItem>) -> Self {
        // Postgres stores microseconds; truncate so a restored order compares equal.
        let order_date = Utc::now().trunc_subsecs(6);
        Self {
            id: Uuid::now_v7(),
            props: OrderProps {
                customer_id: customer_id.into(),
                order_date,
                order_items,
            },
        }
    }

    pub fn restore(id: Uuid, props: OrderProps) -> Self {
        Self { id, props }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn customer_id(&self) -> &str {
        &self.props.customer_id
    }

    pub fn order_date(&self) -> DateTime<Utc> {
        self.props.order_date
    }

    pub fn order_items(&self) -> &[OrderItem] {
        &self.props.order_items
    }
}
