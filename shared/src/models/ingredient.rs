//! Raw material (bahan baku) models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A raw material tracked in the warehouse.
///
/// `stock_qty` is a cached projection of the ingredient ledger: it must
/// always equal the sum of `change_qty` over the ingredient's log entries.
/// `is_active` is a soft-delete flag; `None` counts as active for rows that
/// predate the column.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    /// Free-form unit label shown to staff, e.g. "Kg" or "Pcs".
    pub unit: String,
    pub stock_qty: Decimal,
    pub min_stock_alert: Option<Decimal>,
    pub is_active: Option<bool>,
    pub created_at: DateTime<Utc>,
}

/// One immutable entry in the ingredient ledger.
///
/// Positive `change_qty` is a restock, negative is consumption. Entries are
/// never updated or deleted; they are the source of truth for stock levels.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct IngredientLog {
    pub id: Uuid,
    pub ingredient_id: Uuid,
    pub change_qty: Decimal,
    /// Stored as text; see [`ActionType`] for the accepted values.
    pub action_type: String,
    pub notes: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Stock-affecting event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    #[serde(rename = "RESTOCK")]
    Restock,
    #[serde(rename = "PRODUCTION")]
    Production,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Restock => "RESTOCK",
            ActionType::Production => "PRODUCTION",
        }
    }
}
