//! Production processor service
//!
//! Records a production batch as one all-or-nothing transaction:
//! ingredient rows are locked, every recipe requirement is checked
//! before anything is written, and acceptance appends one ledger entry
//! per ingredient plus the finished-goods increment. A rejected batch
//! reports every failing ingredient at once so staff can fix the whole
//! list in one restock trip.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::ledger::LedgerService;
use shared::models::{
    check_batch_requirements, classify_yield, ActionType, ProductionLog, RecipeRequirement,
    YieldClass,
};

/// Service for recording production batches
#[derive(Clone)]
pub struct ProductionService {
    db: PgPool,
}

/// Production request payload
#[derive(Debug, Deserialize)]
pub struct ProductionInput {
    pub product_id: Uuid,
    pub batch_qty: Decimal,
    pub product_result_actual: Decimal,
    pub notes: Option<String>,
}

/// Recipe requirement joined with the locked ingredient state
#[derive(Debug, sqlx::FromRow)]
struct RequirementRow {
    ingredient_id: Uuid,
    ingredient_name: String,
    unit: String,
    quantity_per_batch: Decimal,
    stock_qty: Decimal,
    is_active: Option<bool>,
}

/// Production history entry with yield classification
#[derive(Debug, Serialize)]
pub struct ProductionReportEntry {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub batch_qty: Decimal,
    pub product_result_actual: Option<Decimal>,
    pub product_result_expected: Option<Decimal>,
    pub variance: Option<Decimal>,
    pub yield_class: Option<YieldClass>,
    pub notes: Option<String>,
    pub created_by: Uuid,
    pub created_by_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ProductionReportRow {
    id: Uuid,
    product_id: Uuid,
    product_name: String,
    batch_qty: Decimal,
    product_result_actual: Option<Decimal>,
    product_result_expected: Option<Decimal>,
    notes: Option<String>,
    created_by: Uuid,
    created_by_name: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProductionReportRow> for ProductionReportEntry {
    fn from(row: ProductionReportRow) -> Self {
        let classified = match (row.product_result_actual, row.product_result_expected) {
            (Some(actual), Some(expected)) => Some(classify_yield(actual, expected)),
            _ => None,
        };
        ProductionReportEntry {
            id: row.id,
            product_id: row.product_id,
            product_name: row.product_name,
            batch_qty: row.batch_qty,
            product_result_actual: row.product_result_actual,
            product_result_expected: row.product_result_expected,
            variance: classified.map(|(v, _)| v),
            yield_class: classified.map(|(_, c)| c),
            notes: row.notes,
            created_by: row.created_by,
            created_by_name: row.created_by_name,
            created_at: row.created_at,
        }
    }
}

impl ProductionService {
    /// Create a new ProductionService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a production batch
    pub async fn record_batch(
        &self,
        actor: Uuid,
        input: ProductionInput,
    ) -> AppResult<ProductionLog> {
        if input.batch_qty <= Decimal::ZERO {
            return Err(AppError::Validation {
                field: "batch_qty".to_string(),
                message: "Batch count must be positive".to_string(),
                message_id: "Jumlah batch harus lebih dari 0".to_string(),
            });
        }
        if input.product_result_actual < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "product_result_actual".to_string(),
                message: "Actual yield must not be negative".to_string(),
                message_id: "Hasil produksi aktual tidak boleh negatif".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        // Lock the product row first, then the recipe's ingredient rows.
        // The expected yield is snapshotted into the log at this moment.
        let expected: Option<Decimal> = sqlx::query_scalar(
            "SELECT product_result_expected FROM products WHERE id = $1 FOR UPDATE",
        )
        .bind(input.product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", input.product_id)))?;

        let requirements = sqlx::query_as::<_, RequirementRow>(
            r#"
            SELECT r.ingredient_id, i.name AS ingredient_name, i.unit,
                   r.quantity_per_batch, i.stock_qty, i.is_active
            FROM product_recipes r
            JOIN ingredients i ON i.id = r.ingredient_id
            WHERE r.product_id = $1
            ORDER BY i.name ASC
            FOR UPDATE OF i
            "#,
        )
        .bind(input.product_id)
        .fetch_all(&mut *tx)
        .await?;

        if requirements.is_empty() {
            return Err(AppError::RecipeMissing);
        }

        let requirements: Vec<RecipeRequirement> = requirements
            .into_iter()
            .map(|row| RecipeRequirement {
                ingredient_id: row.ingredient_id,
                ingredient_name: row.ingredient_name,
                unit: row.unit,
                quantity_per_batch: row.quantity_per_batch,
                stock_qty: row.stock_qty,
                is_active: row.is_active,
            })
            .collect();

        let violations = check_batch_requirements(&requirements, input.batch_qty);
        if !violations.is_empty() {
            return Err(AppError::ProductionBlocked { violations });
        }

        let log = sqlx::query_as::<_, ProductionLog>(
            r#"
            INSERT INTO production_logs
                (product_id, batch_qty, product_result_actual, product_result_expected, notes, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, product_id, batch_qty, product_result_actual,
                      product_result_expected, notes, created_by, created_at
            "#,
        )
        .bind(input.product_id)
        .bind(input.batch_qty)
        .bind(input.product_result_actual)
        .bind(expected)
        .bind(&input.notes)
        .bind(actor)
        .fetch_one(&mut *tx)
        .await?;

        for req in &requirements {
            let deduction = -(req.quantity_per_batch * input.batch_qty);
            let notes = format!("Auto-deduct: Produksi {} Batch", input.batch_qty.normalize());
            LedgerService::append_in_tx(
                &mut tx,
                req.ingredient_id,
                deduction,
                ActionType::Production,
                &notes,
                actor,
            )
            .await?;
        }

        sqlx::query("UPDATE products SET stock_qty = stock_qty + $2 WHERE id = $1")
            .bind(input.product_id)
            .bind(input.product_result_actual)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            product_id = %input.product_id,
            batch_qty = %input.batch_qty,
            actual = %input.product_result_actual,
            "Production batch recorded"
        );

        Ok(log)
    }

    /// Production history, newest first, with yield classification
    pub async fn list_batches(
        &self,
        product_id: Option<Uuid>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        limit: Option<u32>,
    ) -> AppResult<Vec<ProductionReportEntry>> {
        let limit = limit.unwrap_or(100).clamp(1, 500) as i64;
        let rows = sqlx::query_as::<_, ProductionReportRow>(
            r#"
            SELECT p.id, p.product_id, pr.name AS product_name, p.batch_qty,
                   p.product_result_actual, p.product_result_expected,
                   p.notes, p.created_by, u.full_name AS created_by_name, p.created_at
            FROM production_logs p
            JOIN products pr ON pr.id = p.product_id
            JOIN profiles u ON u.id = p.created_by
            WHERE ($1::uuid IS NULL OR p.product_id = $1)
              AND ($2::date IS NULL OR p.created_at >= $2::date)
              AND ($3::date IS NULL OR p.created_at < $3::date + INTERVAL '1 day')
            ORDER BY p.created_at DESC
            LIMIT $4
            "#,
        )
        .bind(product_id)
        .bind(start_date)
        .bind(end_date)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(ProductionReportEntry::from).collect())
    }
}
