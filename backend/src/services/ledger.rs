//! Stock ledger service
//!
//! The ingredient_logs table is the append-only source of truth for
//! every stock movement. Each append runs in a transaction that inserts
//! the log row and applies the delta to the cached stock_qty with a
//! server-side conditional increment, so concurrent appends cannot lose
//! updates or drive stock below zero.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{ActionType, IngredientLog};

/// Service for append-only stock movements
#[derive(Clone)]
pub struct LedgerService {
    db: PgPool,
}

/// Restock request payload
#[derive(Debug, Deserialize)]
pub struct RestockInput {
    pub ingredient_id: Uuid,
    pub qty: Decimal,
    pub notes: Option<String>,
}

/// Filters for the stock mutation report
#[derive(Debug, Deserialize)]
pub struct LedgerFilter {
    pub ingredient_id: Option<Uuid>,
    pub action_type: Option<ActionType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Ledger entry joined with ingredient details for reporting
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub ingredient_id: Uuid,
    pub ingredient_name: String,
    pub unit: String,
    pub change_qty: Decimal,
    pub action_type: String,
    pub notes: Option<String>,
    pub created_by: Uuid,
    pub created_by_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl LedgerService {
    /// Create a new LedgerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a manual restock (positive delta)
    pub async fn restock(&self, actor: Uuid, input: RestockInput) -> AppResult<IngredientLog> {
        if input.qty <= Decimal::ZERO {
            return Err(AppError::Validation {
                field: "qty".to_string(),
                message: "Restock quantity must be positive".to_string(),
                message_id: "Jumlah restock harus lebih dari 0".to_string(),
            });
        }

        let notes = input
            .notes
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Restock manual".to_string());

        let mut tx = self.db.begin().await?;
        let log = Self::append_in_tx(
            &mut tx,
            input.ingredient_id,
            input.qty,
            ActionType::Restock,
            &notes,
            actor,
        )
        .await?;
        tx.commit().await?;

        Ok(log)
    }

    /// Append one movement inside an existing transaction: insert the
    /// log row, then apply the delta to the cached stock_qty. The
    /// UPDATE only matches when the result stays non-negative; zero
    /// rows affected means the deduction would overdraw the stock.
    pub async fn append_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        ingredient_id: Uuid,
        change_qty: Decimal,
        action_type: ActionType,
        notes: &str,
        actor: Uuid,
    ) -> AppResult<IngredientLog> {
        let log = sqlx::query_as::<_, IngredientLog>(
            r#"
            INSERT INTO ingredient_logs (ingredient_id, change_qty, action_type, notes, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, ingredient_id, change_qty, action_type, notes, created_by, created_at
            "#,
        )
        .bind(ingredient_id)
        .bind(change_qty)
        .bind(action_type.as_str())
        .bind(notes)
        .bind(actor)
        .fetch_one(&mut **tx)
        .await?;

        let result = sqlx::query(
            r#"
            UPDATE ingredients
            SET stock_qty = stock_qty + $2
            WHERE id = $1 AND stock_qty + $2 >= 0
            "#,
        )
        .bind(ingredient_id)
        .bind(change_qty)
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() == 0 {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM ingredients WHERE id = $1)",
            )
            .bind(ingredient_id)
            .fetch_one(&mut **tx)
            .await?;

            if !exists {
                return Err(AppError::NotFound(format!(
                    "Ingredient {} not found",
                    ingredient_id
                )));
            }
            return Err(AppError::InsufficientStock(format!(
                "Stock for ingredient {} would go negative",
                ingredient_id
            )));
        }

        Ok(log)
    }

    /// Stock mutation report, newest first
    pub async fn list_logs(&self, filter: LedgerFilter) -> AppResult<Vec<LedgerEntry>> {
        let entries = sqlx::query_as::<_, LedgerEntry>(
            r#"
            SELECT l.id, l.ingredient_id, i.name AS ingredient_name, i.unit,
                   l.change_qty, l.action_type, l.notes, l.created_by,
                   pr.full_name AS created_by_name, l.created_at
            FROM ingredient_logs l
            JOIN ingredients i ON i.id = l.ingredient_id
            JOIN profiles pr ON pr.id = l.created_by
            WHERE ($1::uuid IS NULL OR l.ingredient_id = $1)
              AND ($2::text IS NULL OR l.action_type = $2)
              AND ($3::date IS NULL OR l.created_at >= $3::date)
              AND ($4::date IS NULL OR l.created_at < $4::date + INTERVAL '1 day')
            ORDER BY l.created_at DESC
            "#,
        )
        .bind(filter.ingredient_id)
        .bind(filter.action_type.map(|a| a.as_str()))
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }
}
