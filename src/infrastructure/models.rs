use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderItem, OrderItemProps, OrderProps};
use crate::schema::{order_items, order_view, orders};

// ── Write side ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Insertable, AsChangeset)]
#[diesel(table_name = orders)]
pub struct OrderRecord {
    pub id: Uuid,
    pub customer_id: String,
    pub order_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable, AsChangeset)]
#[diesel(table_name = order_items)]
pub struct OrderItemRecord {
    pub id: Uuid,
    pub order_id: Uuid,
    pub item_id: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

// ── Read side ────────────────────────────────────────────────────────────────

/// One row of `order_view`: order header columns repeated for each item.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = order_view)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderViewRow {
    #[diesel(column_name = h_id)]
    pub order_id: Uuid,
    #[diesel(column_name = h_customer_id)]
    pub customer_id: String,
    #[diesel(column_name = h_order_date)]
    pub order_date: DateTime<Utc>,
    #[diesel(column_name = d_id)]
    pub order_item_id: Uuid,
    #[diesel(column_name = d_item_id)]
    pub item_id: String,
    #[diesel(column_name = d_quantity)]
    pub quantity: i32,
    #[diesel(column_name = d_unit_price)]
    pub unit_price: BigDecimal,
}

// ── Mappings ─────────────────────────────────────────────────────────────────

/// Splits the aggregate into the header row and one row per item, each item
/// row pointing at the order.
pub fn to_write_rows(order: &Order) -> Result<(OrderRecord, Vec<OrderItemRecord>), DomainError> {
    let header = OrderRecord {
        id: order.id(),
        customer_id: order.customer_id().to_string(),
        order_date: order.order_date(),
    };

    let items = order
        .order_items()
        .iter()
        .map(|item| {
            let quantity = i32::try_from(item.quantity()).map_err(|_| {
                DomainError::InvalidInput(format!(
                    "quantity {} of item '{}' is out of range",
                    item.quantity(),
                    item.item_id()
                ))
            })?;
            Ok(OrderItemRecord {
                id: item.id(),
                order_id: order.id(),
                item_id: item.item_id().to_string(),
                quantity,
                unit_price: item.unit_price().clone(),
            })
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    Ok((header, items))
}

/// Rebuilds one aggregate from view rows. Header fields come from the first
/// row; every row contributes one item. No rows means no order.
pub fn from_view_rows(rows: Vec<OrderViewRow>) -> Result<Option<Order>, DomainError> {
    let Some(first) = rows.first() else {
        return Ok(None);
    };
    let id = first.order_id;
    let customer_id = first.customer_id.clone();
    let order_date = first.order_date;

    let order_items = rows
        .into_iter()
        .map(|row| {
            let quantity = u32::try_from(row.quantity).map_err(|_| {
                DomainError::Internal(format!(
                    "stored quantity {} of order item {} is negative",
                    row.quantity, row.order_item_id
                ))
            })?;
            Ok(OrderItem::restore(
                row.order_item_id,
                OrderItemProps {
                    item_id: row.item_id,
                    quantity,
                    unit_price: row.unit_price,
                },
            ))
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    Ok(Some(Order::restore(
        id,
        OrderProps {
            customer_id,
            order_date,
            order_items,
        },
    )))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::TimeZone;

    use super::*;

    fn price(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    fn view_row(order_id: Uuid, item_id: &str, quantity: i32) -> OrderViewRow {
        OrderViewRow {
            order_id,
            customer_id: "cust-1".to_string(),
            order_date: Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap(),
            order_item_id: Uuid::now_v7(),
            item_id: item_id.to_string(),
            quantity,
            unit_price: price("9.99"),
        }
    }

    #[test]
    fn to_write_rows_links_every_item_to_the_order() {
        let order = Order::create(
            "cust-1",
            vec![
                OrderItem::create(OrderItemProps {
                    item_id: "sku-1".to_string(),
                    quantity: 2,
                    unit_price: price("9.99"),
                }),
                OrderItem::create(OrderItemProps {
                    item_id: "sku-2".to_string(),
                    quantity: 0,
                    unit_price: price("0.50"),
                }),
            ],
        );

        let (header, items) = to_write_rows(&order).expect("mapping failed");

        assert_eq!(header.id, order.id());
        assert_eq!(header.customer_id, "cust-1");
        assert_eq!(header.order_date, order.order_date());
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.order_id == order.id()));
        assert_eq!(items[0].id, order.order_items()[0].id());
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[1].item_id, "sku-2");
        assert_eq!(items[1].unit_price, price("0.50"));
    }

    #[test]
    fn to_write_rows_rejects_quantity_beyond_column_range() {
        let order = Order::create(
            "cust-1",
            vec![OrderItem::create(OrderItemProps {
                item_id: "sku-1".to_string(),
                quantity: u32::MAX,
                unit_price: price("1.00"),
            })],
        );

        assert!(matches!(
            to_write_rows(&order),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn from_view_rows_returns_none_without_rows() {
        assert!(from_view_rows(vec![]).expect("mapping failed").is_none());
    }

    #[test]
    fn from_view_rows_builds_one_item_per_row() {
        let order_id = Uuid::now_v7();
        let rows = vec![view_row(order_id, "sku-1", 2), view_row(order_id, "sku-2", 5)];
        let expected_item_ids: Vec<Uuid> = rows.iter().map(|r| r.order_item_id).collect();

        let order = from_view_rows(rows)
            .expect("mapping failed")
            .expect("order expected");

        assert_eq!(order.id(), order_id);
        assert_eq!(order.customer_id(), "cust-1");
        assert_eq!(
            order.order_date(),
            Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()
        );
        let ids: Vec<Uuid> = order.order_items().iter().map(|i| i.id()).collect();
        assert_eq!(ids, expected_item_ids);
        assert_eq!(order.order_items()[1].item_id(), "sku-2");
        assert_eq!(order.order_items()[1].quantity(), 5);
    }

    #[test]
    fn from_view_rows_takes_header_from_first_row() {
        let order_id = Uuid::now_v7();
        let mut second = view_row(order_id, "sku-2", 1);
        second.customer_id = "someone-else".to_string();

        let order = from_view_rows(vec![view_row(order_id, "sku-1", 1), second])
            .expect("mapping failed")
            .expect("order expected");

        assert_eq!(order.customer_id(), "cust-1");
        assert_eq!(order.order_items().len(), 2);
    }

    #[test]
    fn from_view_rows_rejects_negative_stored_quantity() {
        let rows = vec![view_row(Uuid::now_v7(), "sku-1", -1)];
        assert!(matches!(from_view_rows(rows), Err(DomainError::Internal(_))));
    }
}
