//! Product catalog service
//!
//! Products carry their own finished-goods stock counter, incremented
//! by production runs. Selling units are the sellable denominations of
//! a product, each with its own price.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Product, SellingUnit};
use shared::validation::validate_price;

/// Service for product catalog operations
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Create/update payload for products
#[derive(Debug, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub product_result_expected: Option<Decimal>,
    pub image_url: Option<String>,
}

/// Create/update payload for selling units
#[derive(Debug, Deserialize)]
pub struct SellingUnitInput {
    pub name: String,
    pub price: Decimal,
    pub qty_content: Decimal,
}

/// Product with its selling units attached
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub selling_units: Vec<SellingUnit>,
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List products, optionally including archived rows
    pub async fn list(&self, include_archived: bool) -> AppResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, stock_qty, product_result_expected, image_url, is_active, created_at
            FROM products
            WHERE $1 OR is_active IS DISTINCT FROM FALSE
            ORDER BY name ASC
            "#,
        )
        .bind(include_archived)
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }

    /// Fetch a product with its selling units
    pub async fn get(&self, id: Uuid) -> AppResult<ProductDetail> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, stock_qty, product_result_expected, image_url, is_active, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

        let selling_units = self.list_selling_units(id).await?;

        Ok(ProductDetail {
            product,
            selling_units,
        })
    }

    /// Register a new product with zero starting stock
    pub async fn create(&self, input: ProductInput) -> AppResult<Product> {
        self.validate(&input)?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, stock_qty, product_result_expected, image_url)
            VALUES ($1, 0, $2, $3)
            RETURNING id, name, stock_qty, product_result_expected, image_url, is_active, created_at
            "#,
        )
        .bind(&input.name)
        .bind(input.product_result_expected)
        .bind(&input.image_url)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::DuplicateEntry(format!("Product '{}' already exists", input.name))
            }
            _ => AppError::DatabaseError(e),
        })?;

        Ok(product)
    }

    /// Update catalog fields (never stock_qty)
    pub async fn update(&self, id: Uuid, input: ProductInput) -> AppResult<Product> {
        self.validate(&input)?;

        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, product_result_expected = $3, image_url = $4
            WHERE id = $1
            RETURNING id, name, stock_qty, product_result_expected, image_url, is_active, created_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.product_result_expected)
        .bind(&input.image_url)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    /// Soft-archive a product; sales and production history stay intact
    pub async fn archive(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("UPDATE products SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }
        Ok(())
    }

    /// Reactivate a previously archived product
    pub async fn restore(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("UPDATE products SET is_active = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }
        Ok(())
    }

    /// Selling units of a product, cheapest first
    pub async fn list_selling_units(&self, product_id: Uuid) -> AppResult<Vec<SellingUnit>> {
        let units = sqlx::query_as::<_, SellingUnit>(
            r#"
            SELECT id, product_id, name, price, qty_content
            FROM selling_units
            WHERE product_id = $1
            ORDER BY price ASC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        Ok(units)
    }

    /// Add a selling unit to a product
    pub async fn add_selling_unit(
        &self,
        product_id: Uuid,
        input: SellingUnitInput,
    ) -> AppResult<SellingUnit> {
        validate_price(input.price).map_err(|m| AppError::Validation {
            field: "price".to_string(),
            message: m.to_string(),
            message_id: "Harga tidak boleh negatif".to_string(),
        })?;

        // FK violation surfaces as NotFound for a friendlier message
        let unit = sqlx::query_as::<_, SellingUnit>(
            r#"
            INSERT INTO selling_units (product_id, name, price, qty_content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, product_id, name, price, qty_content
            "#,
        )
        .bind(product_id)
        .bind(&input.name)
        .bind(input.price)
        .bind(input.qty_content)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::NotFound(format!("Product {} not found", product_id))
            }
            _ => AppError::DatabaseError(e),
        })?;

        Ok(unit)
    }

    /// Update a selling unit
    pub async fn update_selling_unit(
        &self,
        unit_id: Uuid,
        input: SellingUnitInput,
    ) -> AppResult<SellingUnit> {
        validate_price(input.price).map_err(|m| AppError::Validation {
            field: "price".to_string(),
            message: m.to_string(),
            message_id: "Harga tidak boleh negatif".to_string(),
        })?;

        sqlx::query_as::<_, SellingUnit>(
            r#"
            UPDATE selling_units
            SET name = $2, price = $3, qty_content = $4
            WHERE id = $1
            RETURNING id, product_id, name, price, qty_content
            "#,
        )
        .bind(unit_id)
        .bind(&input.name)
        .bind(input.price)
        .bind(input.qty_content)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Selling unit {} not found", unit_id)))
    }

    /// Remove a selling unit. Past sales keep their price snapshot, so
    /// deletion never rewrites revenue history.
    pub async fn delete_selling_unit(&self, unit_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM selling_units WHERE id = $1")
            .bind(unit_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Selling unit {} not found",
                unit_id
            )));
        }
        Ok(())
    }

    fn validate(&self, input: &ProductInput) -> AppResult<()> {
        shared::validation::validate_name(&input.name).map_err(|m| AppError::Validation {
            field: "name".to_string(),
            message: m.to_string(),
            message_id: "Nama produk tidak boleh kosong".to_string(),
        })?;

        if let Some(expected) = input.product_result_expected {
            if expected < Decimal::ZERO {
                return Err(AppError::Validation {
                    field: "product_result_expected".to_string(),
                    message: "Expected yield must not be negative".to_string(),
                    message_id: "Hasil produksi yang diharapkan tidak boleh negatif".to_string(),
                });
            }
        }
        Ok(())
    }
}
