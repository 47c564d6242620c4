//! Production batch models and yield classification

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded production batch.
///
/// `product_result_expected` is a snapshot of the product's target yield at
/// production time, so later recipe tuning never rewrites history.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductionLog {
    pub id: Uuid,
    pub product_id: Uuid,
    pub batch_qty: Decimal,
    pub product_result_actual: Option<Decimal>,
    pub product_result_expected: Option<Decimal>,
    pub notes: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Classification of a batch's yield against its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldClass {
    /// Actual yield hit the target exactly
    Match,
    /// Batch came in under target
    Short,
    /// Batch exceeded target
    Over,
}

/// One recipe requirement evaluated against live ingredient state
#[derive(Debug, Clone)]
pub struct RecipeRequirement {
    pub ingredient_id: Uuid,
    pub ingredient_name: String,
    pub unit: String,
    pub quantity_per_batch: Decimal,
    pub stock_qty: Decimal,
    pub is_active: Option<bool>,
}

/// Why an ingredient blocked production
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationReason {
    Inactive,
    InsufficientStock,
}

/// One failed ingredient in a rejected production request
#[derive(Debug, Clone, Serialize)]
pub struct ProductionViolation {
    pub ingredient_id: Uuid,
    pub ingredient_name: String,
    pub reason: ViolationReason,
    /// Per-ingredient detail, e.g. "Tepung (Butuh: 4, Ada: 2 Kg)"
    pub detail: String,
}

/// Evaluate every recipe requirement for a batch request. All failures are
/// collected so staff can fix the whole list in one restock trip, never just
/// the first one hit.
pub fn check_batch_requirements(
    requirements: &[RecipeRequirement],
    batch_qty: Decimal,
) -> Vec<ProductionViolation> {
    let mut violations = Vec::new();
    for req in requirements {
        if req.is_active == Some(false) {
            violations.push(ProductionViolation {
                ingredient_id: req.ingredient_id,
                ingredient_name: req.ingredient_name.clone(),
                reason: ViolationReason::Inactive,
                detail: format!("{} (bahan nonaktif)", req.ingredient_name),
            });
            continue;
        }

        let required = req.quantity_per_batch * batch_qty;
        if req.stock_qty < required {
            violations.push(ProductionViolation {
                ingredient_id: req.ingredient_id,
                ingredient_name: req.ingredient_name.clone(),
                reason: ViolationReason::InsufficientStock,
                // Normalize so NUMERIC-scaled values print "4", not "4.000000"
                detail: format!(
                    "{} (Butuh: {}, Ada: {} {})",
                    req.ingredient_name,
                    required.normalize(),
                    req.stock_qty.normalize(),
                    req.unit
                ),
            });
        }
    }
    violations
}

/// Classify a batch result. Variance is `actual - expected`.
pub fn classify_yield(actual: Decimal, expected: Decimal) -> (Decimal, YieldClass) {
    let variance = actual - expected;
    let class = if variance == Decimal::ZERO {
        YieldClass::Match
    } else if variance < Decimal::ZERO {
        YieldClass::Short
    } else {
        YieldClass::Over
    };
    (variance, class)
}
