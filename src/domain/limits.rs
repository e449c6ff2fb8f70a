//! Bounds every stored order must respect. They match the `orders` /
//! `order_items` column types, so a value that passes is stored unchanged.

use bigdecimal::BigDecimal;

use super::errors::DomainError;
use super::order::Order;

/// `VARCHAR(255)`, counted in characters.
pub const MAX_IDENTIFIER_CHARS: usize = 255;

/// `NUMERIC(12, 2)`: at most two fractional digits.
pub const MAX_UNIT_PRICE_SCALE: i64 = 2;

/// `NUMERIC(12, 2)`: ten integer digits, so prices stay below 10^10.
pub const UNIT_PRICE_UPPER_BOUND: i64 = 10_000_000_000;

pub fn check_identifier(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidInput(format!("{} is required", field)));
    }
    if value.chars().count() > MAX_IDENTIFIER_CHARS {
        return Err(DomainError::InvalidInput(format!(
            "{} must be at most {} characters",
            field, MAX_IDENTIFIER_CHARS
        )));
    }
    Ok(())
}

pub fn check_unit_price(item_id: &str, price: &BigDecimal) -> Result<(), DomainError> {
    if *price < BigDecimal::from(0) {
        return Err(DomainError::InvalidInput(format!(
            "unit_price of item '{}' must not be negative",
            item_id
        )));
    }
    if *price >= BigDecimal::from(UNIT_PRICE_UPPER_BOUND) {
        return Err(DomainError::InvalidInput(format!(
            "unit_price of item '{}' must be below {}",
            item_id, UNIT_PRICE_UPPER_BOUND
        )));
    }
    // Trailing zeros ("9.990") don't count against the scale.
    let (_, scale) = price.normalized().as_bigint_and_exponent();
    if scale > MAX_UNIT_PRICE_SCALE {
        return Err(DomainError::InvalidInput(format!(
            "unit_price of item '{}' has more than {} decimal places",
            item_id, MAX_UNIT_PRICE_SCALE
        )));
    }
    Ok(())
}

/// Checks the header and every item against the storage bounds.
pub fn check_order(order: &Order) -> Result<(), DomainError> {
    check_identifier("customer_id", order.customer_id())?;
    for item in order.order_items() {
        check_identifier("item_id", item.item_id())?;
        check_unit_price(item.item_id(), item.unit_price())?;
    }
    Ok(())
}
