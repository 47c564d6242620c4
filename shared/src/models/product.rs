//! Finished product and menu models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A finished product (hasil produksi).
///
/// `stock_qty` counts finished goods and is incremented by the production
/// processor with the declared actual yield. Sales do not decrement it;
/// sold quantities are derived from the sales log.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub stock_qty: Decimal,
    /// Target yield per batch, snapshotted into each production log.
    pub product_result_expected: Option<Decimal>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: DateTime<Utc>,
}

/// One line of a product's bill of materials.
///
/// A product's full recipe is the set of all entries with its id;
/// `quantity_per_batch` scales linearly with the batch count.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecipeEntry {
    pub id: Uuid,
    pub product_id: Uuid,
    pub ingredient_id: Uuid,
    pub quantity_per_batch: Decimal,
}

/// A sellable menu entry for a product (e.g. "Kue Balok isi 6").
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SellingUnit {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub price: Decimal,
    /// Units of product consumed per sale of this entry.
    pub qty_content: Decimal,
}
