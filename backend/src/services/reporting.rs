//! Reporting aggregator service
//!
//! Read-only rollups over the sales, production, and ingredient logs.
//! Revenue always values a sale at COALESCE(price_at_sale, current
//! price, 0) so rows predating the snapshot feature still count.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Ingredient;
use shared::timeseries::{
    fill_daily_buckets, fill_monthly_buckets, first_of_month, shift_months, RevenueBucket,
    RevenuePoint,
};
use shared::validation::is_critical_stock;

/// Service for dashboard metrics and sales rollups
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// Top-line numbers for the dashboard
#[derive(Debug, Serialize)]
pub struct DashboardMetrics {
    pub revenue_today: Decimal,
    pub items_sold_today: i64,
    pub transactions_today: i64,
    pub critical_stock_count: i64,
    pub active_products: i64,
    pub production_batches_today: i64,
    pub staff_count: i64,
    pub recent_batches: Vec<RecentBatch>,
}

/// Recent production batch shown on the dashboard
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct RecentBatch {
    pub product_name: String,
    pub batch_qty: Decimal,
    pub product_result_expected: Option<Decimal>,
    pub product_result_actual: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// One row of the best-sellers ranking
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct BestSeller {
    pub selling_unit_id: Uuid,
    pub selling_unit_name: String,
    pub product_name: String,
    pub total_qty: i64,
    pub total_revenue: Decimal,
}

#[derive(Debug, sqlx::FromRow)]
struct DailyRevenueRow {
    day: NaiveDate,
    revenue: Decimal,
    items_sold: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct MonthlyRevenueRow {
    month_start: NaiveDate,
    revenue: Decimal,
    items_sold: i64,
}

/// Row shape for the sales CSV export
#[derive(Debug, sqlx::FromRow)]
struct ExportRow {
    created_at: DateTime<Utc>,
    product_name: String,
    selling_unit_name: String,
    qty_sold: i32,
    unit_price: Decimal,
    line_total: Decimal,
    cashier: String,
}

/// Row shape for the stock mutation CSV export
#[derive(Debug, sqlx::FromRow)]
struct StockExportRow {
    created_at: DateTime<Utc>,
    ingredient_name: String,
    unit: String,
    action_type: String,
    change_qty: Decimal,
    notes: Option<String>,
    staff: String,
}

impl ReportingService {
    /// Create a new ReportingService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Dashboard metrics for today (server-local calendar day, UTC)
    pub async fn dashboard(&self) -> AppResult<DashboardMetrics> {
        let (revenue_today, items_sold_today, transactions_today) =
            sqlx::query_as::<_, (Option<Decimal>, Option<i64>, i64)>(
                r#"
                SELECT SUM(COALESCE(s.price_at_sale, su.price, 0) * s.qty_sold),
                       SUM(s.qty_sold)::bigint,
                       COUNT(*)
                FROM sales_logs s
                JOIN selling_units su ON su.id = s.selling_unit_id
                WHERE s.created_at >= CURRENT_DATE
                "#,
            )
            .fetch_one(&self.db)
            .await?;

        let critical_stock_count = self.critical_stock().await?.len() as i64;

        let active_products: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products WHERE is_active IS DISTINCT FROM FALSE",
        )
        .fetch_one(&self.db)
        .await?;

        let production_batches_today: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM production_logs WHERE created_at >= CURRENT_DATE",
        )
        .fetch_one(&self.db)
        .await?;

        let staff_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM profiles WHERE role = 'staff' AND is_active IS DISTINCT FROM FALSE",
        )
        .fetch_one(&self.db)
        .await?;

        let recent_batches = sqlx::query_as::<_, RecentBatch>(
            r#"
            SELECT pr.name AS product_name, p.batch_qty,
                   p.product_result_expected, p.product_result_actual, p.created_at
            FROM production_logs p
            JOIN products pr ON pr.id = p.product_id
            ORDER BY p.created_at DESC
            LIMIT 5
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(DashboardMetrics {
            revenue_today: revenue_today.unwrap_or(Decimal::ZERO),
            items_sold_today: items_sold_today.unwrap_or(0),
            transactions_today,
            critical_stock_count,
            active_products,
            production_batches_today,
            staff_count,
            recent_batches,
        })
    }

    /// Active ingredients at or below their alert threshold
    pub async fn critical_stock(&self) -> AppResult<Vec<Ingredient>> {
        let ingredients = sqlx::query_as::<_, Ingredient>(
            r#"
            SELECT id, name, unit, stock_qty, min_stock_alert, is_active, created_at
            FROM ingredients
            WHERE is_active IS DISTINCT FROM FALSE
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(ingredients
            .into_iter()
            .filter(|i| is_critical_stock(i.stock_qty, i.min_stock_alert))
            .collect())
    }

    /// Revenue per day over the last 7 calendar days. Days without
    /// sales appear as zero buckets so charts keep a fixed width.
    pub async fn weekly_revenue(&self) -> AppResult<Vec<RevenueBucket>> {
        let today = Utc::now().date_naive();
        let start = today - Duration::days(6);

        let rows = sqlx::query_as::<_, DailyRevenueRow>(
            r#"
            SELECT s.created_at::date AS day,
                   SUM(COALESCE(s.price_at_sale, su.price, 0) * s.qty_sold) AS revenue,
                   SUM(s.qty_sold)::bigint AS items_sold
            FROM sales_logs s
            JOIN selling_units su ON su.id = s.selling_unit_id
            WHERE s.created_at >= $1::date
            GROUP BY day
            ORDER BY day ASC
            "#,
        )
        .bind(start)
        .fetch_all(&self.db)
        .await?;

        let points: Vec<RevenuePoint> = rows
            .into_iter()
            .map(|r| RevenuePoint {
                period_start: r.day,
                revenue: r.revenue,
                items_sold: r.items_sold,
            })
            .collect();

        Ok(fill_daily_buckets(start, 7, &points))
    }

    /// Revenue per month of the current calendar year, January through
    /// the current month in calendar order. Empty months appear as
    /// zero buckets.
    pub async fn monthly_revenue(&self) -> AppResult<Vec<RevenueBucket>> {
        let today = Utc::now().date_naive();
        let months = today.month();
        let start = shift_months(first_of_month(today), -(today.month0() as i32));

        let rows = sqlx::query_as::<_, MonthlyRevenueRow>(
            r#"
            SELECT date_trunc('month', s.created_at)::date AS month_start,
                   SUM(COALESCE(s.price_at_sale, su.price, 0) * s.qty_sold) AS revenue,
                   SUM(s.qty_sold)::bigint AS items_sold
            FROM sales_logs s
            JOIN selling_units su ON su.id = s.selling_unit_id
            WHERE s.created_at >= $1::date
            GROUP BY month_start
            ORDER BY month_start ASC
            "#,
        )
        .bind(start)
        .fetch_all(&self.db)
        .await?;

        let points: Vec<RevenuePoint> = rows
            .into_iter()
            .map(|r| RevenuePoint {
                period_start: r.month_start,
                revenue: r.revenue,
                items_sold: r.items_sold,
            })
            .collect();

        Ok(fill_monthly_buckets(start, months, &points))
    }

    /// Top 10 selling units by quantity sold over a date range
    pub async fn best_sellers(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<Vec<BestSeller>> {
        let sellers = sqlx::query_as::<_, BestSeller>(
            r#"
            SELECT s.selling_unit_id, su.name AS selling_unit_name, p.name AS product_name,
                   SUM(s.qty_sold)::bigint AS total_qty,
                   SUM(COALESCE(s.price_at_sale, su.price, 0) * s.qty_sold) AS total_revenue
            FROM sales_logs s
            JOIN selling_units su ON su.id = s.selling_unit_id
            JOIN products p ON p.id = su.product_id
            WHERE ($1::date IS NULL OR s.created_at >= $1::date)
              AND ($2::date IS NULL OR s.created_at < $2::date + INTERVAL '1 day')
            GROUP BY s.selling_unit_id, su.name, p.name
            ORDER BY total_qty DESC
            LIMIT 10
            "#,
        )
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.db)
        .await?;

        Ok(sellers)
    }

    /// Sales history as CSV for spreadsheet hand-off
    pub async fn export_sales_csv(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<String> {
        let rows = sqlx::query_as::<_, ExportRow>(
            r#"
            SELECT s.created_at, p.name AS product_name, su.name AS selling_unit_name,
                   s.qty_sold,
                   COALESCE(s.price_at_sale, su.price, 0) AS unit_price,
                   COALESCE(s.price_at_sale, su.price, 0) * s.qty_sold AS line_total,
                   pr.full_name AS cashier
            FROM sales_logs s
            JOIN selling_units su ON su.id = s.selling_unit_id
            JOIN products p ON p.id = su.product_id
            JOIN profiles pr ON pr.id = s.created_by
            WHERE ($1::date IS NULL OR s.created_at >= $1::date)
              AND ($2::date IS NULL OR s.created_at < $2::date + INTERVAL '1 day')
            ORDER BY s.created_at ASC
            "#,
        )
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.db)
        .await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "date",
                "product",
                "selling_unit",
                "qty",
                "unit_price",
                "line_total",
                "cashier",
            ])
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;

        for row in rows {
            writer
                .write_record([
                    row.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    row.product_name,
                    row.selling_unit_name,
                    row.qty_sold.to_string(),
                    row.unit_price.to_string(),
                    row.line_total.to_string(),
                    row.cashier,
                ])
                .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV encoding: {}", e)))
    }

    /// Stock mutation history as CSV, one row per ledger entry
    pub async fn export_stock_csv(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<String> {
        let rows = sqlx::query_as::<_, StockExportRow>(
            r#"
            SELECT l.created_at, i.name AS ingredient_name, i.unit,
                   l.action_type, l.change_qty, l.notes,
                   pr.full_name AS staff
            FROM ingredient_logs l
            JOIN ingredients i ON i.id = l.ingredient_id
            JOIN profiles pr ON pr.id = l.created_by
            WHERE ($1::date IS NULL OR l.created_at >= $1::date)
              AND ($2::date IS NULL OR l.created_at < $2::date + INTERVAL '1 day')
            ORDER BY l.created_at ASC
            "#,
        )
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.db)
        .await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "date",
                "ingredient",
                "unit",
                "action",
                "change_qty",
                "notes",
                "staff",
            ])
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;

        for row in rows {
            writer
                .write_record([
                    row.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    row.ingredient_name,
                    row.unit,
                    row.action_type,
                    row.change_qty.to_string(),
                    row.notes.unwrap_or_default(),
                    row.staff,
                ])
                .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV encoding: {}", e)))
    }
}
