//! Checkout and sales log models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded sale line.
///
/// `price_at_sale` is the price snapshot taken at checkout. It is nullable
/// only because rows predating the snapshot feature exist; readers fall back
/// to the current selling-unit price, then zero.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SalesLog {
    pub id: Uuid,
    pub selling_unit_id: Uuid,
    pub qty_sold: i32,
    pub price_at_sale: Option<Decimal>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// One line of a cashier cart before checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub selling_unit_id: Uuid,
    pub qty: i32,
}

/// Resolve the price a historical sale should be valued at.
pub fn effective_sale_price(
    price_at_sale: Option<Decimal>,
    current_price: Option<Decimal>,
) -> Decimal {
    price_at_sale
        .or(current_price)
        .unwrap_or(Decimal::ZERO)
}
