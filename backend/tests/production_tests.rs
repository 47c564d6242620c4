//! Tests for production batch acceptance and yield classification
//!
//! A batch request is checked against every recipe requirement before
//! anything is written, and a rejection lists every failing ingredient
//! at once so staff can fix the whole list in one restock trip.

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::models::{
    check_batch_requirements, classify_yield, RecipeRequirement, ViolationReason, YieldClass,
};
use uuid::Uuid;

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn req(name: &str, unit: &str, per_batch: &str, stock: &str, active: Option<bool>) -> RecipeRequirement {
    RecipeRequirement {
        ingredient_id: Uuid::new_v4(),
        ingredient_name: name.to_string(),
        unit: unit.to_string(),
        quantity_per_batch: dec(per_batch),
        stock_qty: dec(stock),
        is_active: active,
    }
}

mod batch_acceptance {
    use super::*;

    #[test]
    fn sufficient_stock_produces_no_violations() {
        let recipe = vec![
            req("Tepung", "Kg", "2", "10", Some(true)),
            req("Gula", "Kg", "1", "5", Some(true)),
        ];
        assert!(check_batch_requirements(&recipe, dec("2")).is_empty());
    }

    #[test]
    fn exact_stock_is_accepted() {
        // Needing exactly what is on hand must pass; the boundary is >=
        let recipe = vec![req("Tepung", "Kg", "2", "4", Some(true))];
        assert!(check_batch_requirements(&recipe, dec("2")).is_empty());
    }

    #[test]
    fn short_ingredient_reports_need_and_have() {
        // 2 Kg per batch, 2 batches requested, only 2 Kg on hand
        let recipe = vec![
            req("Tepung", "Kg", "2", "2", Some(true)),
            req("Gula", "Kg", "1", "5", Some(true)),
        ];
        let violations = check_batch_requirements(&recipe, dec("2"));

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].ingredient_name, "Tepung");
        assert_eq!(violations[0].reason, ViolationReason::InsufficientStock);
        assert_eq!(violations[0].detail, "Tepung (Butuh: 4, Ada: 2 Kg)");
    }

    #[test]
    fn scaled_decimals_format_without_trailing_zeros() {
        // NUMERIC(14,3) columns decode with their scale attached; the
        // violation detail must still read "4", not "4.000000"
        let recipe = vec![RecipeRequirement {
            ingredient_id: Uuid::new_v4(),
            ingredient_name: "Tepung".to_string(),
            unit: "Kg".to_string(),
            quantity_per_batch: Decimal::new(2_000, 3),
            stock_qty: Decimal::new(2_000, 3),
            is_active: Some(true),
        }];
        let violations = check_batch_requirements(&recipe, Decimal::new(2_000, 3));

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].detail, "Tepung (Butuh: 4, Ada: 2 Kg)");
    }

    #[test]
    fn scaled_fractional_stock_keeps_significant_digits() {
        let recipe = vec![req("Mentega", "Kg", "0.500", "0.250", Some(true))];
        let violations = check_batch_requirements(&recipe, dec("1"));

        assert_eq!(violations[0].detail, "Mentega (Butuh: 0.5, Ada: 0.25 Kg)");
    }

    #[test]
    fn all_failing_ingredients_are_listed() {
        let recipe = vec![
            req("Tepung", "Kg", "2", "1", Some(true)),
            req("Gula", "Kg", "1", "0", Some(true)),
            req("Mentega", "Kg", "0.5", "10", Some(true)),
        ];
        let violations = check_batch_requirements(&recipe, dec("2"));

        let names: Vec<&str> = violations.iter().map(|v| v.ingredient_name.as_str()).collect();
        assert_eq!(names, vec!["Tepung", "Gula"]);
    }

    #[test]
    fn archived_ingredient_blocks_even_with_stock() {
        let recipe = vec![req("Tepung", "Kg", "2", "100", Some(false))];
        let violations = check_batch_requirements(&recipe, dec("1"));

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].reason, ViolationReason::Inactive);
    }

    #[test]
    fn archived_and_short_are_reported_together() {
        let recipe = vec![
            req("Tepung", "Kg", "2", "1", Some(true)),
            req("Gula", "Kg", "1", "100", Some(false)),
        ];
        let violations = check_batch_requirements(&recipe, dec("1"));

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].reason, ViolationReason::InsufficientStock);
        assert_eq!(violations[1].reason, ViolationReason::Inactive);
    }

    #[test]
    fn legacy_rows_without_flag_count_as_active() {
        let recipe = vec![req("Tepung", "Kg", "1", "5", None)];
        assert!(check_batch_requirements(&recipe, dec("3")).is_empty());
    }
}

mod yield_classification {
    use super::*;

    #[test]
    fn exact_yield_is_a_match() {
        let (variance, class) = classify_yield(dec("24"), dec("24"));
        assert_eq!(variance, Decimal::ZERO);
        assert_eq!(class, YieldClass::Match);
    }

    #[test]
    fn under_target_is_short_with_negative_variance() {
        let (variance, class) = classify_yield(dec("20"), dec("24"));
        assert_eq!(variance, dec("-4"));
        assert_eq!(class, YieldClass::Short);
    }

    #[test]
    fn over_target_is_over_with_positive_variance() {
        let (variance, class) = classify_yield(dec("26"), dec("24"));
        assert_eq!(variance, dec("2"));
        assert_eq!(class, YieldClass::Over);
    }
}

mod property_tests {
    use super::*;

    fn qty_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=10_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    fn stock_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=100_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// No violations exactly when every ingredient is active and covers
        /// the scaled requirement
        #[test]
        fn prop_acceptance_matches_requirements(
            per_batch in qty_strategy(),
            stock in stock_strategy(),
            batch_raw in 1i64..=100i64
        ) {
            let batch_qty = Decimal::from(batch_raw);
            let recipe = vec![req("Bahan", "Kg", &per_batch.to_string(), &stock.to_string(), Some(true))];
            let violations = check_batch_requirements(&recipe, batch_qty);

            if stock >= per_batch * batch_qty {
                prop_assert!(violations.is_empty());
            } else {
                prop_assert_eq!(violations.len(), 1);
            }
        }

        /// A batch count that passes keeps passing for any smaller count
        #[test]
        fn prop_smaller_batches_never_fail_when_larger_passes(
            per_batch in qty_strategy(),
            stock in stock_strategy(),
            larger in 2i64..=50i64
        ) {
            let recipe = vec![req("Bahan", "Kg", &per_batch.to_string(), &stock.to_string(), Some(true))];
            if check_batch_requirements(&recipe, Decimal::from(larger)).is_empty() {
                for smaller in 1..larger {
                    prop_assert!(check_batch_requirements(&recipe, Decimal::from(smaller)).is_empty());
                }
            }
        }

        /// Variance sign always agrees with the classification
        #[test]
        fn prop_yield_class_matches_variance_sign(
            actual in stock_strategy(),
            expected in stock_strategy()
        ) {
            let (variance, class) = classify_yield(actual, expected);
            prop_assert_eq!(variance, actual - expected);
            match class {
                YieldClass::Match => prop_assert_eq!(variance, Decimal::ZERO),
                YieldClass::Short => prop_assert!(variance < Decimal::ZERO),
                YieldClass::Over => prop_assert!(variance > Decimal::ZERO),
            }
        }
    }
}
