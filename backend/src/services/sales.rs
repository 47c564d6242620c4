//! Cashier checkout and sales history service
//!
//! Checkout writes one sales_logs row per cart line with the price
//! snapshotted at sale time. Finished-goods stock is checked per line
//! against the parent product but never decremented here; sold
//! quantities are derived from the log.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{CartLine, SalesLog};
use shared::types::{PaginatedResponse, Pagination, PaginationMeta};
use shared::validation::validate_cart_qty;

/// Service for checkout and sales reporting
#[derive(Clone)]
pub struct SalesService {
    db: PgPool,
}

/// Checkout request payload
#[derive(Debug, Deserialize)]
pub struct CheckoutInput {
    pub lines: Vec<CartLine>,
}

/// Result of a completed checkout
#[derive(Debug, Serialize)]
pub struct CheckoutResult {
    pub sales: Vec<SalesLog>,
    pub total: Decimal,
}

/// Filters for the sales history report
#[derive(Debug, Deserialize)]
pub struct SalesFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub product_id: Option<Uuid>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Sales row joined with product context for display
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct SalesEntry {
    pub id: Uuid,
    pub selling_unit_id: Uuid,
    pub selling_unit_name: String,
    pub product_id: Uuid,
    pub product_name: String,
    pub qty_sold: i32,
    pub price_at_sale: Option<Decimal>,
    pub current_price: Decimal,
    pub created_by: Uuid,
    pub created_by_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Sales history page plus totals over the filtered range
#[derive(Debug, Serialize)]
pub struct SalesReport {
    #[serde(flatten)]
    pub page: PaginatedResponse<SalesEntry>,
    pub total_revenue: Decimal,
    pub total_items_sold: i64,
}

/// Selling unit joined with its parent product, locked during checkout
#[derive(Debug, sqlx::FromRow)]
struct CheckoutUnitRow {
    unit_name: String,
    price: Decimal,
    product_name: String,
    product_stock: Decimal,
    product_active: Option<bool>,
}

impl SalesService {
    /// Create a new SalesService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a cashier checkout as one transaction
    pub async fn checkout(&self, actor: Uuid, input: CheckoutInput) -> AppResult<CheckoutResult> {
        if input.lines.is_empty() {
            return Err(AppError::Validation {
                field: "lines".to_string(),
                message: "Cart must not be empty".to_string(),
                message_id: "Keranjang masih kosong".to_string(),
            });
        }
        for line in &input.lines {
            validate_cart_qty(line.qty).map_err(|m| AppError::Validation {
                field: "qty".to_string(),
                message: m.to_string(),
                message_id: "Jumlah beli harus lebih dari 0".to_string(),
            })?;
        }

        // Lock product rows in a stable order so two concurrent checkouts
        // with overlapping carts cannot deadlock on each other.
        let mut lines = input.lines;
        lines.sort_by_key(|l| l.selling_unit_id);

        let mut tx = self.db.begin().await?;
        let mut sales = Vec::with_capacity(lines.len());
        let mut total = Decimal::ZERO;

        for line in &lines {
            // The client sends its own availability view; this re-check
            // against the locked product row is the authoritative one.
            let unit = sqlx::query_as::<_, CheckoutUnitRow>(
                r#"
                SELECT su.name AS unit_name, su.price,
                       p.name AS product_name, p.stock_qty AS product_stock,
                       p.is_active AS product_active
                FROM selling_units su
                JOIN products p ON p.id = su.product_id
                WHERE su.id = $1
                FOR UPDATE OF p
                "#,
            )
            .bind(line.selling_unit_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Selling unit {} not found", line.selling_unit_id))
            })?;

            if unit.product_active == Some(false) {
                return Err(AppError::Validation {
                    field: "selling_unit_id".to_string(),
                    message: format!("Product '{}' is archived", unit.product_name),
                    message_id: format!("Produk '{}' sudah diarsipkan", unit.product_name),
                });
            }

            let requested = Decimal::from(line.qty);
            if unit.product_stock < requested {
                return Err(AppError::InsufficientStock(format!(
                    "Stok {} tidak cukup untuk '{}' (Butuh: {}, Ada: {})",
                    unit.product_name, unit.unit_name, line.qty, unit.product_stock
                )));
            }

            let sale = sqlx::query_as::<_, SalesLog>(
                r#"
                INSERT INTO sales_logs (selling_unit_id, qty_sold, price_at_sale, created_by)
                VALUES ($1, $2, $3, $4)
                RETURNING id, selling_unit_id, qty_sold, price_at_sale, created_by, created_at
                "#,
            )
            .bind(line.selling_unit_id)
            .bind(line.qty)
            .bind(unit.price)
            .bind(actor)
            .fetch_one(&mut *tx)
            .await?;

            total += unit.price * Decimal::from(line.qty);
            sales.push(sale);
        }

        tx.commit().await?;

        tracing::info!(lines = sales.len(), total = %total, "Checkout recorded");

        Ok(CheckoutResult { sales, total })
    }

    /// Paginated sales history with range totals
    pub async fn list_sales(&self, filter: SalesFilter) -> AppResult<SalesReport> {
        let pagination = Pagination {
            page: filter.page.unwrap_or(1).max(1),
            per_page: filter.per_page.unwrap_or(10).clamp(1, 100),
        };

        let entries = sqlx::query_as::<_, SalesEntry>(
            r#"
            SELECT s.id, s.selling_unit_id, su.name AS selling_unit_name,
                   p.id AS product_id, p.name AS product_name,
                   s.qty_sold, s.price_at_sale, su.price AS current_price,
                   s.created_by, pr.full_name AS created_by_name, s.created_at
            FROM sales_logs s
            JOIN selling_units su ON su.id = s.selling_unit_id
            JOIN products p ON p.id = su.product_id
            JOIN profiles pr ON pr.id = s.created_by
            WHERE ($1::date IS NULL OR s.created_at >= $1::date)
              AND ($2::date IS NULL OR s.created_at < $2::date + INTERVAL '1 day')
              AND ($3::uuid IS NULL OR p.id = $3)
            ORDER BY s.created_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(filter.product_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        let (total_count, total_revenue, total_items_sold) =
            sqlx::query_as::<_, (i64, Option<Decimal>, Option<i64>)>(
                r#"
                SELECT COUNT(*),
                       SUM(COALESCE(s.price_at_sale, su.price, 0) * s.qty_sold),
                       SUM(s.qty_sold)::bigint
                FROM sales_logs s
                JOIN selling_units su ON su.id = s.selling_unit_id
                JOIN products p ON p.id = su.product_id
                WHERE ($1::date IS NULL OR s.created_at >= $1::date)
                  AND ($2::date IS NULL OR s.created_at < $2::date + INTERVAL '1 day')
                  AND ($3::uuid IS NULL OR p.id = $3)
                "#,
            )
            .bind(filter.start_date)
            .bind(filter.end_date)
            .bind(filter.product_id)
            .fetch_one(&self.db)
            .await?;

        Ok(SalesReport {
            page: PaginatedResponse {
                data: entries,
                pagination: PaginationMeta::new(&pagination, total_count as u64),
            },
            total_revenue: total_revenue.unwrap_or(Decimal::ZERO),
            total_items_sold: total_items_sold.unwrap_or(0),
        })
    }
}
