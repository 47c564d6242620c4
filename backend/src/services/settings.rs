//! System settings service
//!
//! The factory reset wipes operational data in child-first order inside
//! one transaction. Staff profiles survive so the team can log back in
//! after the wipe.

use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;

/// Service for destructive system operations
#[derive(Clone)]
pub struct SettingsService {
    db: PgPool,
}

/// Row counts removed by a factory reset
#[derive(Debug, Serialize)]
pub struct ResetSummary {
    pub sales_logs: u64,
    pub production_logs: u64,
    pub ingredient_logs: u64,
    pub selling_units: u64,
    pub product_recipes: u64,
    pub products: u64,
    pub ingredients: u64,
}

impl SettingsService {
    /// Create a new SettingsService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Wipe all operational data, preserving staff profiles
    pub async fn factory_reset(&self) -> AppResult<ResetSummary> {
        let mut tx = self.db.begin().await?;

        let sales_logs = sqlx::query("DELETE FROM sales_logs")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let production_logs = sqlx::query("DELETE FROM production_logs")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let ingredient_logs = sqlx::query("DELETE FROM ingredient_logs")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let selling_units = sqlx::query("DELETE FROM selling_units")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let product_recipes = sqlx::query("DELETE FROM product_recipes")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let products = sqlx::query("DELETE FROM products")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let ingredients = sqlx::query("DELETE FROM ingredients")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        let summary = ResetSummary {
            sales_logs,
            production_logs,
            ingredient_logs,
            selling_units,
            product_recipes,
            products,
            ingredients,
        };

        tracing::warn!(?summary, "Factory reset completed");

        Ok(summary)
    }
}
