use diesel::dsl::exists;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::limits;
use crate::domain::order::Order;
use crate::domain::ports::OrderRepository;
use crate::schema::{order_items, order_view, orders};

use super::models::{from_view_rows, to_write_rows, OrderItemRecord, OrderRecord, OrderViewRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

/// Writes to the `orders` / `order_items` tables and reads from `order_view`.
///
/// Upserts are existence-check-then-write rather than `ON CONFLICT`. Two
/// concurrent saves of the same order race on the check; header fields end up
/// last-writer-wins.
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn order_exists(conn: &mut PgConnection, id: Uuid) -> QueryResult<bool> {
    let found = diesel::select(exists(orders::table.filter(orders::id.eq(id)))).get_result(conn)?;
    log::debug!("order {} exists: {}", id, found);
    Ok(found)
}

fn order_item_exists(conn: &mut PgConnection, id: Uuid) -> QueryResult<bool> {
    let found = diesel::select(exists(order_items::table.filter(order_items::id.eq(id))))
        .get_result(conn)?;
    log::debug!("order item {} exists: {}", id, found);
    Ok(found)
}

fn upsert_order(conn: &mut PgConnection, record: &OrderRecord) -> QueryResult<()> {
    if order_exists(conn, record.id)? {
        diesel::update(orders::table.filter(orders::id.eq(record.id)))
            .set(record)
            .execute(conn)?;
    } else {
        diesel::insert_into(orders::table)
            .values(record)
            .execute(conn)?;
    }
    Ok(())
}

// Quantity is written as-is on both branches; a re-save never increments it.
fn upsert_order_item(conn: &mut PgConnection, record: &OrderItemRecord) -> QueryResult<()> {
    if order_item_exists(conn, record.id)? {
        diesel::update(order_items::table.filter(order_items::id.eq(record.id)))
            .set(record)
            .execute(conn)?;
    } else {
        diesel::insert_into(order_items::table)
            .values(record)
            .execute(conn)?;
    }
    Ok(())
}

impl OrderRepository for DieselOrderRepository {
    fn save(&self, order: &Order) -> Result<(), DomainError> {
        if order.order_items().is_empty() {
            return Err(DomainError::InvalidInput(
                "an order must contain at least one item".to_string(),
            ));
        }
        limits::check_order(order)?;
        let (header, items) = to_write_rows(order)?;
        log::debug!("saving order {} with {} item(s)", header.id, items.len());

        let mut conn = self.pool.get()?;

        // Every statement runs on the transaction's connection and returns
        // before the next one starts, so all item writes finish before commit.
        conn.transaction::<_, DomainError, _>(|conn| {
            upsert_order(conn, &header)?;
            for item in &items {
                upsert_order_item(conn, item)?;
            }
            Ok(())
        })
        .inspect_err(|e| log::error!("saving order {} failed: {}", header.id, e))
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = order_view::table
            .filter(order_view::h_id.eq(id))
            .order(order_view::d_id.asc())
            .select(OrderViewRow::as_select())
            .load(&mut conn)?;

        from_view_rows(rows)
    }
}
