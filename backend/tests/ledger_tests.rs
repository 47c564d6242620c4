//! Tests for the stock ledger rules
//!
//! The ledger is append-only and the cached stock projection must always
//! equal the sum of accepted deltas, never dipping below zero. A rejected
//! append leaves the projection untouched.

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::validation::{required_quantity, validate_positive_qty, would_go_negative};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Pure model of the ledger append: apply the delta only when the
/// projection stays non-negative, mirroring the conditional UPDATE.
fn try_append(stock: Decimal, change_qty: Decimal) -> Result<Decimal, Decimal> {
    if would_go_negative(stock, change_qty) {
        Err(stock)
    } else {
        Ok(stock + change_qty)
    }
}

mod append_guard {
    use super::*;

    #[test]
    fn restock_increases_projection() {
        assert_eq!(try_append(dec("0"), dec("10")), Ok(dec("10")));
    }

    #[test]
    fn deduction_to_exactly_zero_is_accepted() {
        assert_eq!(try_append(dec("8"), dec("-8")), Ok(dec("0")));
    }

    #[test]
    fn overdraw_is_rejected_and_projection_unchanged() {
        // 10 on hand, one batch of 8 accepted, second batch of 8 rejected
        let stock = try_append(dec("10"), dec("-8")).unwrap();
        assert_eq!(stock, dec("2"));

        let result = try_append(stock, dec("-8"));
        assert_eq!(result, Err(dec("2")));
    }

    #[test]
    fn fractional_quantities_are_exact() {
        // Decimal arithmetic must not lose precision the way floats would
        let stock = try_append(dec("1"), dec("-0.1")).unwrap();
        let stock = try_append(stock, dec("-0.2")).unwrap();
        assert_eq!(stock, dec("0.7"));
    }

    #[test]
    fn projection_equals_sum_of_accepted_deltas() {
        let deltas = [dec("10"), dec("-4"), dec("-6"), dec("-1"), dec("3")];
        let mut stock = Decimal::ZERO;
        let mut accepted_sum = Decimal::ZERO;

        for delta in deltas {
            if let Ok(next) = try_append(stock, delta) {
                stock = next;
                accepted_sum += delta;
            }
        }

        // The -1 append is rejected at zero stock; everything else lands
        assert_eq!(stock, accepted_sum);
        assert_eq!(stock, dec("3"));
    }
}

mod restock_validation {
    use super::*;

    #[test]
    fn restock_quantity_must_be_positive() {
        assert!(validate_positive_qty(dec("0.5")).is_ok());
        assert!(validate_positive_qty(Decimal::ZERO).is_err());
        assert!(validate_positive_qty(dec("-5")).is_err());
    }

    #[test]
    fn production_requirement_scales_with_batch_count() {
        assert_eq!(required_quantity(dec("2"), dec("2")), dec("4"));
        assert_eq!(required_quantity(dec("0.25"), dec("8")), dec("2"));
    }
}

mod property_tests {
    use super::*;

    /// Strategy for signed stock deltas with 3 decimal places
    fn delta_strategy() -> impl Strategy<Value = Decimal> {
        (-50_000i64..=50_000i64).prop_map(|n| Decimal::new(n, 3))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// The projection never goes negative, whatever order deltas arrive in
        #[test]
        fn prop_projection_never_negative(deltas in prop::collection::vec(delta_strategy(), 1..40)) {
            let mut stock = Decimal::ZERO;
            for delta in deltas {
                if let Ok(next) = try_append(stock, delta) {
                    stock = next;
                }
                prop_assert!(stock >= Decimal::ZERO);
            }
        }

        /// The projection always equals the sum of accepted deltas
        #[test]
        fn prop_projection_is_sum_of_accepted(deltas in prop::collection::vec(delta_strategy(), 1..40)) {
            let mut stock = Decimal::ZERO;
            let mut accepted_sum = Decimal::ZERO;
            for delta in deltas {
                if let Ok(next) = try_append(stock, delta) {
                    stock = next;
                    accepted_sum += delta;
                }
            }
            prop_assert_eq!(stock, accepted_sum);
        }

        /// A rejected append is exactly the case where the guard fires
        #[test]
        fn prop_rejection_matches_guard(stock_raw in 0i64..=100_000i64, delta in delta_strategy()) {
            let stock = Decimal::new(stock_raw, 3);
            let result = try_append(stock, delta);
            if would_go_negative(stock, delta) {
                prop_assert_eq!(result, Err(stock));
            } else {
                prop_assert_eq!(result, Ok(stock + delta));
            }
        }
    }
}
